//! Batch synchronization layer.
//!
//! Owns the local batch collection and keeps it consistent with the
//! remote store: batches are appended on create success, replaced
//! wholesale on list, and removed on delete success. Every mutating
//! operation awaits remote confirmation before touching local state, so
//! there is never local-only unsent state to lose. The
//! `items_by_invitation` index is derived state: rebuilt as a pure
//! function of the batch list after every change, never mutated directly.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::error::InviteError;
use crate::model::{Batch, InvitationFields, InvitationItem, Principal, Recipient};
use crate::slug::slugify;
use crate::store::model::{NewInvitationItemRow, NewInvitationRow};
use crate::store::RemoteStore;

pub struct BatchRepository {
    store: Arc<dyn RemoteStore>,
    principal: Option<Principal>,
    batches: Vec<Batch>,
    items_by_invitation: HashMap<Uuid, Vec<InvitationItem>>,
}

impl BatchRepository {
    pub fn new(store: Arc<dyn RemoteStore>, principal: Option<Principal>) -> Self {
        Self {
            store,
            principal,
            batches: Vec::new(),
            items_by_invitation: HashMap::new(),
        }
    }

    /// Batches in their current local order.
    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    /// Items for one invitation, through the derived index.
    pub fn items_for(&self, invitation_id: Uuid) -> Option<&[InvitationItem]> {
        self.items_by_invitation
            .get(&invitation_id)
            .map(Vec::as_slice)
    }

    fn principal(&self) -> Result<Principal, InviteError> {
        self.principal.ok_or(InviteError::NotAuthenticated)
    }

    fn rebuild_index(&mut self) {
        self.items_by_invitation = self
            .batches
            .iter()
            .map(|batch| (batch.invitation.id, batch.items.clone()))
            .collect();
    }

    /// Persist a new batch: one invitation row, then all item rows in a
    /// single batch insert keyed to the new invitation id.
    ///
    /// A failure on the item insert leaves the invitation row behind
    /// with no items; that window is surfaced as a write failure with no
    /// compensation, and local state stays untouched.
    #[instrument(skip_all)]
    pub async fn create(
        &mut self,
        recipients: &[Recipient],
        template_slug: &str,
        fields: &InvitationFields,
    ) -> Result<Batch, InviteError> {
        let principal = self.principal()?;

        let invitation_row = self
            .store
            .insert_invitation(NewInvitationRow {
                user_id: principal.user_id,
                template_slug: template_slug.to_string(),
                text_content: fields.text.clone(),
                event_date: fields.event_date.clone(),
                event_location: fields.event_location.clone(),
            })
            .await
            .map_err(|err| InviteError::RemoteWriteFailure(err.to_string()))?;

        let payload: Vec<NewInvitationItemRow> = recipients
            .iter()
            .map(|recipient| NewInvitationItemRow {
                invitation_id: invitation_row.id,
                first_name: recipient.first_name.clone(),
                last_name: recipient.last_name.clone(),
                slug: slugify(&recipient.first_name, &recipient.last_name),
            })
            .collect();
        let item_rows = self
            .store
            .insert_items(payload)
            .await
            .map_err(|err| InviteError::RemoteWriteFailure(err.to_string()))?;

        let batch = Batch {
            invitation: invitation_row.into(),
            items: item_rows.into_iter().map(Into::into).collect(),
        };
        self.batches.push(batch.clone());
        self.rebuild_index();
        Ok(batch)
    }

    /// Full resynchronization: fetch every batch owned by the principal,
    /// most recent first, and replace the local collection wholesale.
    #[instrument(skip_all)]
    pub async fn list(&mut self) -> Result<&[Batch], InviteError> {
        let principal = self.principal()?;
        let rows = self
            .store
            .select_batches(principal.user_id)
            .await
            .map_err(|err| InviteError::RemoteReadFailure(err.to_string()))?;
        self.batches = rows
            .into_iter()
            .map(|row| Batch {
                invitation: row.invitation.into(),
                items: row.items.into_iter().map(Into::into).collect(),
            })
            .collect();
        self.rebuild_index();
        Ok(&self.batches)
    }

    /// Delete a batch: items first (no foreign-key cascade is assumed),
    /// then the invitation row scoped by owner. If the item delete is
    /// rejected the invitation row is left intact and local state is
    /// unchanged. Deleting rows that are already gone succeeds.
    #[instrument(skip_all)]
    pub async fn delete(&mut self, invitation_id: Uuid) -> Result<Uuid, InviteError> {
        let principal = self.principal()?;
        self.store
            .delete_items(invitation_id)
            .await
            .map_err(|err| InviteError::RemoteWriteFailure(err.to_string()))?;
        self.store
            .delete_invitation(invitation_id, principal.user_id)
            .await
            .map_err(|err| InviteError::RemoteWriteFailure(err.to_string()))?;
        self.batches
            .retain(|batch| batch.invitation.id != invitation_id);
        self.rebuild_index();
        Ok(invitation_id)
    }
}
