//! Derived read-only statistics and exports over the batch collection.

use crate::link;
use crate::model::{template_label, Batch};

/// Aggregate numbers shown on the profile overview. Holds no state of
/// its own; recompute whenever the batch collection changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOverview {
    pub total_invitations: usize,
    pub batch_count: usize,
    pub most_used_template: String,
}

/// Derive the overview from the current batches.
///
/// The most-used template is the label with the highest cumulative
/// recipient count; the scan runs in batch insertion order with a strict
/// greater-than, so the first label to reach the maximum wins ties.
pub fn overview(batches: &[Batch]) -> BatchOverview {
    if batches.is_empty() {
        return BatchOverview {
            total_invitations: 0,
            batch_count: 0,
            most_used_template: "None yet".to_string(),
        };
    }

    let mut counts: Vec<(&'static str, usize)> = Vec::new();
    for batch in batches {
        let label = template_label(&batch.invitation.template_slug);
        match counts.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, count)) => *count += batch.items.len(),
            None => counts.push((label, batch.items.len())),
        }
    }
    let mut top_label = "Unknown";
    let mut top_count = 0;
    for (label, count) in counts {
        if count > top_count {
            top_count = count;
            top_label = label;
        }
    }

    BatchOverview {
        total_invitations: batches.iter().map(|batch| batch.items.len()).sum(),
        batch_count: batches.len(),
        most_used_template: top_label.to_string(),
    }
}

/// Render a batch as CSV with one share link per item.
///
/// Header `first_name,last_name,share_url`, values joined as-is;
/// embedded commas are not quoted.
pub fn export_csv(batch: &Batch, origin: &str) -> String {
    let mut lines = vec!["first_name,last_name,share_url".to_string()];
    for item in &batch.items {
        let path = link::encode(&batch.invitation.template_slug, &item.slug, None);
        lines.push(format!(
            "{},{},{}{}",
            item.first_name, item.last_name, origin, path
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Invitation, InvitationItem};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn batch(template_slug: &str, names: &[(&str, &str)]) -> Batch {
        let invitation_id = Uuid::new_v4();
        let items = names
            .iter()
            .map(|(first, last)| InvitationItem {
                id: Some(Uuid::new_v4()),
                invitation_id,
                first_name: first.to_string(),
                last_name: last.to_string(),
                slug: crate::slug::slugify(first, last),
            })
            .collect();
        Batch {
            invitation: Invitation {
                id: invitation_id,
                owner_id: Uuid::new_v4(),
                template_slug: template_slug.to_string(),
                text_content: "You are invited".to_string(),
                event_date: "2025-06-01".to_string(),
                event_location: "Baku".to_string(),
                created_at: Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap(),
            },
            items,
        }
    }

    #[test]
    fn empty_collection_has_no_top_template() {
        let stats = overview(&[]);
        assert_eq!(stats.total_invitations, 0);
        assert_eq!(stats.batch_count, 0);
        assert_eq!(stats.most_used_template, "None yet");
    }

    #[test]
    fn counts_recipients_across_batches() {
        let batches = vec![
            batch("classic", &[("Ali", "Aliyev"), ("Leyla", "Huseynova")]),
            batch("bold", &[("Nigar", "Mammadova")]),
        ];
        let stats = overview(&batches);
        assert_eq!(stats.total_invitations, 3);
        assert_eq!(stats.batch_count, 2);
        assert_eq!(stats.most_used_template, "Classic");
    }

    #[test]
    fn first_template_to_reach_the_max_wins_ties() {
        let batches = vec![
            batch("bold", &[("Ali", "Aliyev")]),
            batch("minimal", &[("Leyla", "Huseynova")]),
        ];
        assert_eq!(overview(&batches).most_used_template, "Bold");
    }

    #[test]
    fn batches_with_no_items_leave_the_top_template_unknown() {
        let batches = vec![batch("classic", &[])];
        assert_eq!(overview(&batches).most_used_template, "Unknown");
    }

    #[test]
    fn unknown_slugs_accumulate_under_the_classic_label() {
        let batches = vec![
            batch("neon", &[("Ali", "Aliyev")]),
            batch("classic", &[("Leyla", "Huseynova"), ("Nigar", "Mammadova")]),
        ];
        assert_eq!(overview(&batches).most_used_template, "Classic");
    }

    #[test]
    fn export_renders_the_exact_csv_shape() {
        let exported = export_csv(
            &batch("classic", &[("Ali", "Aliyev"), ("Leyla", "Huseynova")]),
            "https://upvite.example",
        );
        assert_eq!(
            exported,
            "first_name,last_name,share_url\n\
             Ali,Aliyev,https://upvite.example/invite/classic/ali-aliyev\n\
             Leyla,Huseynova,https://upvite.example/invite/classic/leyla-huseynova"
        );
    }

    #[test]
    fn export_does_not_quote_embedded_commas() {
        let exported = export_csv(&batch("bold", &[("Ali, Jr", "Aliyev")]), "https://x.example");
        assert!(exported.contains("Ali, Jr,Aliyev,"));
    }
}
