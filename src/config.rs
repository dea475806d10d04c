//! Configuration loader and validator for the invitation builder.
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

use crate::model::Principal;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Root configuration struct mirroring the YAML schema exactly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub app: App,
    pub store: Store,
    #[serde(default)]
    pub auth: Option<Auth>,
}

/// App-level settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct App {
    /// Origin prepended to share links in CSV exports (no trailing slash).
    pub public_origin: String,
    pub default_template: String,
}

/// Remote store endpoint and credentials.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Store {
    pub url: String,
    pub api_key: String,
}

/// Acting principal. Absent when running signed out; owner-scoped
/// operations then fail before any remote call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Auth {
    pub user_id: Uuid,
}

impl Config {
    /// The signed-in principal, if the config carries one.
    pub fn principal(&self) -> Option<Principal> {
        self.auth.as_ref().map(|auth| Principal {
            user_id: auth.user_id,
        })
    }
}

/// Load configuration from a YAML file and validate it.
/// - If `path` is None, uses `config.yaml` in the current working directory.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or_else(|| Path::new("config.yaml"));
    let content = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&content)?;
    validate(&cfg)?;
    Ok(cfg)
}

const TEMPLATES: [&str; 3] = ["classic", "minimal", "bold"];

/// Validate a configuration instance.
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.app.public_origin.trim().is_empty() {
        return Err(ConfigError::Invalid("app.public_origin must be non-empty"));
    }
    if cfg.app.public_origin.ends_with('/') {
        return Err(ConfigError::Invalid(
            "app.public_origin must not end with a slash",
        ));
    }
    if !TEMPLATES.contains(&cfg.app.default_template.as_str()) {
        return Err(ConfigError::Invalid(
            "app.default_template must be one of classic, minimal, bold",
        ));
    }
    if cfg.store.url.trim().is_empty() {
        return Err(ConfigError::Invalid("store.url must be non-empty"));
    }
    if cfg.store.api_key.trim().is_empty() {
        return Err(ConfigError::Invalid("store.api_key must be non-empty"));
    }
    Ok(())
}

/// Example configuration document.
pub fn example() -> &'static str {
    r#"app:
  public_origin: "https://upvite.example"
  default_template: "classic"

store:
  url: "https://YOUR-PROJECT.supabase.co"
  api_key: "YOUR_SERVICE_ROLE_KEY"

auth:
  user_id: "8f9e3a50-6f3c-4b6e-9a44-2d6d1f6cbb01"
"#
}
