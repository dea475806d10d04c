use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

use upvite::config::{self, Config};
use upvite::ingest;
use upvite::link::{self, EventOverrides};
use upvite::model::{template_label, InvitationFields, Recipient};
use upvite::repo::BatchRepository;
use upvite::slug::slugify;
use upvite::store::RestStore;
use upvite::view;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to YAML config file
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse a recipient file and preview the import without saving
    Import {
        /// CSV or Excel file with first name and surname columns
        file: PathBuf,
    },
    /// Import a recipient file and save it as an invitation batch
    Send {
        file: PathBuf,
        /// Invitation text shown to every recipient
        #[arg(long)]
        text: String,
        /// Event date
        #[arg(long)]
        date: String,
        /// Event location
        #[arg(long)]
        location: String,
        /// Template slug; defaults to the configured template
        #[arg(long)]
        template: Option<String>,
    },
    /// List saved batches with aggregate statistics
    List,
    /// Delete a batch by invitation id
    Delete { id: Uuid },
    /// Export a batch as CSV with share links
    Export {
        id: Uuid,
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Build a share link for a single recipient without saving
    Link {
        #[arg(long)]
        first: String,
        #[arg(long)]
        last: String,
        #[arg(long)]
        template: Option<String>,
        /// Carry the event details inline on the link
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    let cfg = config::load(Some(&args.config))?;

    match args.command {
        Command::Import { file } => {
            let recipients = read_recipients(&file)?;
            for recipient in &recipients {
                println!(
                    "{} {} -> {}",
                    recipient.first_name,
                    recipient.last_name,
                    slugify(&recipient.first_name, &recipient.last_name)
                );
            }
            println!("Imported {} recipient(s)", recipients.len());
        }
        Command::Send {
            file,
            text,
            date,
            location,
            template,
        } => {
            let recipients = read_recipients(&file)?;
            let template = template.unwrap_or_else(|| cfg.app.default_template.clone());
            let fields = InvitationFields {
                text,
                event_date: date,
                event_location: location,
            };
            let mut repo = build_repo(&cfg)?;
            let batch = repo.create(&recipients, &template, &fields).await?;
            println!(
                "Saved batch {} with {} invitation(s)",
                batch.invitation.id,
                batch.items.len()
            );
            for item in &batch.items {
                println!(
                    "  {}{}",
                    cfg.app.public_origin,
                    link::encode(&template, &item.slug, None)
                );
            }
        }
        Command::List => {
            let mut repo = build_repo(&cfg)?;
            let batches = repo.list().await?.to_vec();
            let stats = view::overview(&batches);
            println!("Total invitations: {}", stats.total_invitations);
            println!("Saved batches: {}", stats.batch_count);
            println!("Most used template: {}", stats.most_used_template);
            for batch in &batches {
                println!(
                    "{}  {}  {} invitation(s)  created {}",
                    batch.invitation.id,
                    template_label(&batch.invitation.template_slug),
                    batch.items.len(),
                    batch.invitation.created_at.format("%Y-%m-%d")
                );
            }
        }
        Command::Delete { id } => {
            let mut repo = build_repo(&cfg)?;
            let deleted = repo.delete(id).await?;
            println!("Deleted batch {}", deleted);
        }
        Command::Export { id, out } => {
            let mut repo = build_repo(&cfg)?;
            repo.list().await?;
            let batch = repo
                .batches()
                .iter()
                .find(|batch| batch.invitation.id == id)
                .ok_or_else(|| anyhow!("no batch with id {}", id))?;
            let exported = view::export_csv(batch, &cfg.app.public_origin);
            match out {
                Some(path) => {
                    std::fs::write(&path, exported)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("Wrote {}", path.display());
                }
                None => println!("{}", exported),
            }
        }
        Command::Link {
            first,
            last,
            template,
            text,
            date,
            location,
        } => {
            let template = template.unwrap_or_else(|| cfg.app.default_template.clone());
            let slug = slugify(&first, &last);
            let overrides = match (text, date, location) {
                (Some(text), Some(date), Some(location)) => Some(EventOverrides {
                    text,
                    date,
                    location,
                }),
                _ => None,
            };
            println!(
                "{}{}",
                cfg.app.public_origin,
                link::encode(&template, &slug, overrides.as_ref())
            );
        }
    }

    Ok(())
}

fn read_recipients(file: &Path) -> Result<Vec<Recipient>> {
    let bytes =
        std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let name = file
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    Ok(ingest::import_recipients(&bytes, name)?)
}

fn build_repo(cfg: &Config) -> Result<BatchRepository> {
    let store = RestStore::from_config(cfg)?;
    Ok(BatchRepository::new(Arc::new(store), cfg.principal()))
}
