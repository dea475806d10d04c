use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recipient produced by the ingestion pipeline, before persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub first_name: String,
    pub last_name: String,
}

/// One persisted invitation row: a single "send" of a template plus a
/// message to N recipients, owned by exactly one principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub template_slug: String,
    pub text_content: String,
    pub event_date: String,
    pub event_location: String,
    pub created_at: DateTime<Utc>,
}

/// One per-recipient row under an invitation. `id` is remote-assigned
/// and stays `None` until the row has been persisted. The slug is unique
/// within its parent invitation, not globally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvitationItem {
    pub id: Option<Uuid>,
    pub invitation_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub slug: String,
}

/// An invitation together with its full set of items; the unit the UI
/// and the aggregate view operate on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub invitation: Invitation,
    pub items: Vec<InvitationItem>,
}

/// The authenticated owner context under which repository operations run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
}

/// The invitation-level fields configured once per batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvitationFields {
    pub text: String,
    pub event_date: String,
    pub event_location: String,
}

/// Display label for a template slug. Unknown slugs fall back to the
/// classic template's label.
pub fn template_label(template_slug: &str) -> &'static str {
    match template_slug {
        "minimal" => "Minimal",
        "bold" => "Bold",
        _ => "Classic",
    }
}
