//! Wire row types for the two remote tables.
//!
//! Keep these structs shaped exactly like the store's rows; domain
//! conversions live here so higher layers never see column names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Invitation, InvitationItem};

/// Insert payload for one `invitations` row; the store assigns `id`
/// and `created_at`.
#[derive(Debug, Clone, Serialize)]
pub struct NewInvitationRow {
    pub user_id: Uuid,
    pub template_slug: String,
    pub text_content: String,
    pub event_date: String,
    pub event_location: String,
}

/// A persisted `invitations` row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvitationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub template_slug: String,
    pub text_content: String,
    pub event_date: String,
    pub event_location: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for one `invitation_items` row.
#[derive(Debug, Clone, Serialize)]
pub struct NewInvitationItemRow {
    pub invitation_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub slug: String,
}

/// A persisted `invitation_items` row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvitationItemRow {
    pub id: Uuid,
    pub invitation_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub slug: String,
}

/// Embedded-select shape returned by the list query: one invitation
/// together with its nested items.
#[derive(Debug, Clone, Deserialize)]
pub struct InvitationWithItemsRow {
    #[serde(flatten)]
    pub invitation: InvitationRow,
    #[serde(rename = "invitation_items", default)]
    pub items: Vec<InvitationItemRow>,
}

impl From<InvitationRow> for Invitation {
    fn from(row: InvitationRow) -> Self {
        Invitation {
            id: row.id,
            owner_id: row.user_id,
            template_slug: row.template_slug,
            text_content: row.text_content,
            event_date: row.event_date,
            event_location: row.event_location,
            created_at: row.created_at,
        }
    }
}

impl From<InvitationItemRow> for InvitationItem {
    fn from(row: InvitationItemRow) -> Self {
        InvitationItem {
            id: Some(row.id),
            invitation_id: row.invitation_id,
            first_name: row.first_name,
            last_name: row.last_name,
            slug: row.slug,
        }
    }
}
