use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::pack::Pack;
use crate::models::session::{ChatMessage, ConfidenceScore, RolePlaySession};
use crate::store::{PackStore, SessionStore, StoreError};

/// Process-local store used when no database is configured. Nothing survives a restart.
///
/// Locks are always taken packs first, then sessions. Deleting a pack drops
/// its session under both locks, the same cascade the Postgres schema applies.
#[derive(Default)]
pub struct MemoryStore {
    packs: RwLock<HashMap<Uuid, Pack>>,
    /// Keyed by pack id; at most one session per pack.
    sessions: RwLock<HashMap<Uuid, RolePlaySession>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, StoreError> {
    lock.read()
        .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, StoreError> {
    lock.write()
        .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
}

#[async_trait]
impl PackStore for MemoryStore {
    async fn insert_pack(&self, pack: &Pack) -> Result<(), StoreError> {
        write(&self.packs)?.insert(pack.id, pack.clone());
        Ok(())
    }

    async fn find_pack(&self, owner_id: Uuid, pack_id: Uuid) -> Result<Option<Pack>, StoreError> {
        Ok(read(&self.packs)?
            .get(&pack_id)
            .filter(|pack| pack.user_id == owner_id)
            .cloned())
    }

    async fn list_packs(&self, owner_id: Uuid) -> Result<Vec<Pack>, StoreError> {
        let mut packs: Vec<Pack> = read(&self.packs)?
            .values()
            .filter(|pack| pack.user_id == owner_id)
            .cloned()
            .collect();
        packs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(packs)
    }

    async fn delete_pack(&self, owner_id: Uuid, pack_id: Uuid) -> Result<bool, StoreError> {
        let mut packs = write(&self.packs)?;
        match packs.get(&pack_id) {
            Some(pack) if pack.user_id == owner_id => {
                let mut sessions = write(&self.sessions)?;
                packs.remove(&pack_id);
                sessions.remove(&pack_id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn find_session_by_pack(
        &self,
        pack_id: Uuid,
    ) -> Result<Option<RolePlaySession>, StoreError> {
        Ok(read(&self.sessions)?.get(&pack_id).cloned())
    }

    async fn find_session(&self, session_id: Uuid) -> Result<Option<RolePlaySession>, StoreError> {
        Ok(read(&self.sessions)?
            .values()
            .find(|session| session.id == session_id)
            .cloned())
    }

    async fn upsert_messages(
        &self,
        pack_id: Uuid,
        messages: &[ChatMessage],
        now: DateTime<Utc>,
    ) -> Result<RolePlaySession, StoreError> {
        let packs = read(&self.packs)?;
        if !packs.contains_key(&pack_id) {
            return Err(StoreError::MissingPack(pack_id));
        }
        let mut sessions = write(&self.sessions)?;
        let session = sessions
            .entry(pack_id)
            .and_modify(|session| {
                session.messages = messages.to_vec();
                session.updated_at = now;
            })
            .or_insert_with(|| RolePlaySession {
                id: Uuid::new_v4(),
                pack_id,
                messages: messages.to_vec(),
                confidence_score: ConfidenceScore::default(),
                created_at: now,
                updated_at: now,
            });
        Ok(session.clone())
    }

    async fn update_confidence(
        &self,
        session_id: Uuid,
        score: ConfidenceScore,
        now: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let mut sessions = write(&self.sessions)?;
        match sessions.values_mut().find(|session| session.id == session_id) {
            Some(session) => {
                session.confidence_score = score;
                session.updated_at = now;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_session_for_pack(&self, pack_id: Uuid) -> Result<(), StoreError> {
        write(&self.sessions)?.remove(&pack_id);
        Ok(())
    }
}
