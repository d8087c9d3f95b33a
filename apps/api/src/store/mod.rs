//! Pack and session persistence.
//!
//! Services only see the `PackStore` / `SessionStore` traits. `AppState`
//! carries both as `Arc<dyn ...>`, backed by Postgres in production and by
//! `MemoryStore` when no database is configured.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::pack::Pack;
use crate::models::session::{ChatMessage, ConfidenceScore, RolePlaySession};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Hands one backend out as both store traits.
pub fn shared<S>(store: S) -> (Arc<dyn PackStore>, Arc<dyn SessionStore>)
where
    S: PackStore + SessionStore + 'static,
{
    let store = Arc::new(store);
    (store.clone(), store)
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Stored row is invalid: {0}")]
    Corrupt(String),

    #[error("Pack {0} does not exist")]
    MissingPack(Uuid),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait PackStore: Send + Sync {
    async fn insert_pack(&self, pack: &Pack) -> Result<(), StoreError>;

    /// Returns `None` both when the pack is missing and when it belongs to someone else.
    async fn find_pack(&self, owner_id: Uuid, pack_id: Uuid) -> Result<Option<Pack>, StoreError>;

    /// Newest first.
    async fn list_packs(&self, owner_id: Uuid) -> Result<Vec<Pack>, StoreError>;

    /// Returns whether a row was removed.
    async fn delete_pack(&self, owner_id: Uuid, pack_id: Uuid) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn find_session_by_pack(
        &self,
        pack_id: Uuid,
    ) -> Result<Option<RolePlaySession>, StoreError>;

    async fn find_session(&self, session_id: Uuid) -> Result<Option<RolePlaySession>, StoreError>;

    /// Creates the pack's session (confidence 5) or replaces its whole message log.
    /// Last write wins.
    async fn upsert_messages(
        &self,
        pack_id: Uuid,
        messages: &[ChatMessage],
        now: DateTime<Utc>,
    ) -> Result<RolePlaySession, StoreError>;

    /// Returns whether a session was updated.
    async fn update_confidence(
        &self,
        session_id: Uuid,
        score: ConfidenceScore,
        now: DateTime<Utc>,
    ) -> Result<bool, StoreError>;

    async fn delete_session_for_pack(&self, pack_id: Uuid) -> Result<(), StoreError>;
}
