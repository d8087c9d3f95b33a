//! Test doubles shared by unit tests across modules.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::auth::{IdentityError, IdentityProvider};
use crate::llm_client::{CompletionProvider, LlmError};
use crate::market::estimator::estimate;
use crate::models::pack::Pack;
use crate::models::session::{ChatMessage, ConfidenceScore, RolePlaySession};
use crate::store::{PackStore, SessionStore, StoreError};

/// Canned or always-failing language model that counts its calls.
pub struct StubProvider {
    reply: Option<String>,
    calls: AtomicUsize,
}

impl StubProvider {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionProvider for StubProvider {
    async fn complete(&self, _prompt: &str, _max_tokens: u32) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(LlmError::Api {
                status: 529,
                message: "Overloaded".to_string(),
            }),
        }
    }
}

fn down() -> StoreError {
    StoreError::Unavailable("store is down".to_string())
}

/// Pack store whose every operation fails.
pub struct FailingPackStore;

#[async_trait]
impl PackStore for FailingPackStore {
    async fn insert_pack(&self, _: &Pack) -> Result<(), StoreError> {
        Err(down())
    }

    async fn find_pack(&self, _: Uuid, _: Uuid) -> Result<Option<Pack>, StoreError> {
        Err(down())
    }

    async fn list_packs(&self, _: Uuid) -> Result<Vec<Pack>, StoreError> {
        Err(down())
    }

    async fn delete_pack(&self, _: Uuid, _: Uuid) -> Result<bool, StoreError> {
        Err(down())
    }
}

/// Session store whose every operation fails.
pub struct FailingSessionStore;

#[async_trait]
impl SessionStore for FailingSessionStore {
    async fn find_session_by_pack(&self, _: Uuid) -> Result<Option<RolePlaySession>, StoreError> {
        Err(down())
    }

    async fn find_session(&self, _: Uuid) -> Result<Option<RolePlaySession>, StoreError> {
        Err(down())
    }

    async fn upsert_messages(
        &self,
        _: Uuid,
        _: &[ChatMessage],
        _: DateTime<Utc>,
    ) -> Result<RolePlaySession, StoreError> {
        Err(down())
    }

    async fn update_confidence(
        &self,
        _: Uuid,
        _: ConfidenceScore,
        _: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        Err(down())
    }

    async fn delete_session_for_pack(&self, _: Uuid) -> Result<(), StoreError> {
        Err(down())
    }
}

/// Fixed token → user table.
pub struct StaticIdentity {
    users: HashMap<String, Uuid>,
}

impl StaticIdentity {
    pub fn new<'a>(users: impl IntoIterator<Item = (&'a str, Uuid)>) -> Self {
        Self {
            users: users
                .into_iter()
                .map(|(token, id)| (token.to_string(), id))
                .collect(),
        }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn resolve(&self, token: &str) -> Result<Uuid, IdentityError> {
        self.users.get(token).copied().ok_or(IdentityError::Rejected)
    }
}

/// A remote software engineer pack (market average $120,000).
pub fn sample_pack(owner_id: Uuid) -> Pack {
    Pack {
        id: Uuid::new_v4(),
        user_id: owner_id,
        job_title: "Software Engineer".to_string(),
        city_or_remote: "Remote".to_string(),
        current_salary: 95_000,
        target_salary: Some(130_000),
        achievements: vec![
            "Led the payments migration".to_string(),
            "Reduced on-call pages by half".to_string(),
            "Onboarded three new hires".to_string(),
        ],
        market_data: estimate("software engineer", "remote"),
        negotiation_content: "# Salary Negotiation Package".to_string(),
        created_at: Utc::now(),
    }
}
