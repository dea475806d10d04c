//! Remote relational store, consumed through an abstract table contract.
//!
//! The store exposes insert/select/delete over two logical tables
//! (`invitations`, `invitation_items`). `RemoteStore` expresses that
//! contract as typed per-table methods; `RestStore` implements it
//! against a PostgREST-style HTTP endpoint. The store offers no
//! multi-statement transaction primitive to this layer; per-row insert
//! semantics are the only consistency boundary.

use std::fmt;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::Config;

pub mod model;

use model::{
    InvitationItemRow, InvitationRow, InvitationWithItemsRow, NewInvitationItemRow,
    NewInvitationRow,
};

/// A rejected store request, carrying the transport's own message.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StoreError(pub String);

/// The abstract table interface the synchronization layer runs against.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Insert one invitation row and return it with store-assigned fields.
    async fn insert_invitation(&self, row: NewInvitationRow) -> Result<InvitationRow, StoreError>;

    /// Insert all item rows for an invitation in a single batch insert.
    /// An empty payload is a valid (empty) insert.
    async fn insert_items(
        &self,
        rows: Vec<NewInvitationItemRow>,
    ) -> Result<Vec<InvitationItemRow>, StoreError>;

    /// All invitations owned by the principal with their nested items,
    /// ordered by `created_at` descending.
    async fn select_batches(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<InvitationWithItemsRow>, StoreError>;

    /// Delete every item under an invitation. Deleting zero rows is not
    /// an error.
    async fn delete_items(&self, invitation_id: Uuid) -> Result<(), StoreError>;

    /// Delete the invitation row, additionally scoped by owner. Deleting
    /// zero rows is not an error.
    async fn delete_invitation(&self, invitation_id: Uuid, owner_id: Uuid)
        -> Result<(), StoreError>;
}

/// PostgREST-style client over the two tables.
#[derive(Clone)]
pub struct RestStore {
    http: Client,
    base_url: Url,
    api_key: String,
}

impl fmt::Debug for RestStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestStore")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl RestStore {
    pub fn new(base_url: Url, api_key: String) -> Self {
        let http = Client::builder()
            .user_agent("upvite/0.1")
            .build()
            .expect("reqwest client");
        Self {
            http,
            base_url,
            api_key,
        }
    }

    pub fn from_config(cfg: &Config) -> Result<Self, StoreError> {
        let base_url = Url::parse(&cfg.store.url).map_err(|err| StoreError(err.to_string()))?;
        Ok(Self::new(base_url, cfg.store.api_key.clone()))
    }

    fn table_url(&self, table: &str) -> Result<Url, StoreError> {
        self.base_url
            .join(&format!("rest/v1/{}", table))
            .map_err(|err| StoreError(err.to_string()))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    async fn execute_json<T: serde::de::DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        action: &'static str,
    ) -> Result<T, StoreError> {
        let res = self
            .execute(builder, action)
            .await?;
        res.json::<T>()
            .await
            .map_err(|err| StoreError(format!("{}: invalid response JSON: {}", action, err)))
    }

    async fn execute(
        &self,
        builder: RequestBuilder,
        action: &'static str,
    ) -> Result<reqwest::Response, StoreError> {
        let res = builder
            .send()
            .await
            .map_err(|err| StoreError(format!("{}: failed to reach store: {}", action, err)))?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            warn!(%status, action, "store request rejected");
            return Err(StoreError(format!("{} failed with {}: {}", action, status, body)));
        }
        debug!(%status, action, "store request ok");
        Ok(res)
    }
}

#[async_trait]
impl RemoteStore for RestStore {
    async fn insert_invitation(&self, row: NewInvitationRow) -> Result<InvitationRow, StoreError> {
        let url = self.table_url("invitations")?;
        let rows: Vec<InvitationRow> = self
            .execute_json(
                self.request(Method::POST, url)
                    .header("Prefer", "return=representation")
                    .json(&[row]),
                "insert invitation",
            )
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError("insert invitation returned no rows".to_string()))
    }

    async fn insert_items(
        &self,
        rows: Vec<NewInvitationItemRow>,
    ) -> Result<Vec<InvitationItemRow>, StoreError> {
        let url = self.table_url("invitation_items")?;
        self.execute_json(
            self.request(Method::POST, url)
                .header("Prefer", "return=representation")
                .json(&rows),
            "insert invitation items",
        )
        .await
    }

    async fn select_batches(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<InvitationWithItemsRow>, StoreError> {
        let mut url = self.table_url("invitations")?;
        url.query_pairs_mut()
            .append_pair("select", "*,invitation_items(*)")
            .append_pair("user_id", &format!("eq.{}", owner_id))
            .append_pair("order", "created_at.desc");
        self.execute_json(self.request(Method::GET, url), "select batches")
            .await
    }

    async fn delete_items(&self, invitation_id: Uuid) -> Result<(), StoreError> {
        let mut url = self.table_url("invitation_items")?;
        url.query_pairs_mut()
            .append_pair("invitation_id", &format!("eq.{}", invitation_id));
        self.execute(self.request(Method::DELETE, url), "delete invitation items")
            .await?;
        Ok(())
    }

    async fn delete_invitation(
        &self,
        invitation_id: Uuid,
        owner_id: Uuid,
    ) -> Result<(), StoreError> {
        let mut url = self.table_url("invitations")?;
        url.query_pairs_mut()
            .append_pair("id", &format!("eq.{}", invitation_id))
            .append_pair("user_id", &format!("eq.{}", owner_id));
        self.execute(self.request(Method::DELETE, url), "delete invitation")
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_urls_join_under_rest_v1() {
        let store = RestStore::new(
            Url::parse("https://project.supabase.co/").unwrap(),
            "key".to_string(),
        );
        let url = store.table_url("invitations").unwrap();
        assert_eq!(url.as_str(), "https://project.supabase.co/rest/v1/invitations");
    }

    #[test]
    fn debug_output_hides_the_api_key() {
        let store = RestStore::new(
            Url::parse("https://project.supabase.co/").unwrap(),
            "secret".to_string(),
        );
        let rendered = format!("{:?}", store);
        assert!(!rendered.contains("secret"));
    }
}
