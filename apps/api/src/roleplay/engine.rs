//! Dialogue Engine — drives one role-play turn end to end.
//!
//! Flow: ownership check → reply (model, else keyword fallback) →
//!       append user + assistant messages → upsert session → return reply.
//!
//! Session writes are last-write-wins: two racing turns on the same pack each
//! overwrite the whole log, and one of them is lost.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::CompletionProvider;
use crate::models::pack::Pack;
use crate::models::session::{ChatMessage, ChatRole, ConfidenceScore, RolePlaySession};
use crate::roleplay::prompts::{build_manager_prompt, DIALOGUE_MAX_TOKENS};
use crate::roleplay::responder::FallbackResponder;
use crate::store::{PackStore, SessionStore};

/// Body of a role-play turn: the new utterance plus the transcript so far.
#[derive(Debug, Clone, Deserialize)]
pub struct TurnRequest {
    pub message: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

#[derive(Clone)]
pub struct DialogueEngine {
    packs: Arc<dyn PackStore>,
    sessions: Arc<dyn SessionStore>,
    llm: Arc<dyn CompletionProvider>,
    fallback: Arc<FallbackResponder>,
}

impl DialogueEngine {
    pub fn new(
        packs: Arc<dyn PackStore>,
        sessions: Arc<dyn SessionStore>,
        llm: Arc<dyn CompletionProvider>,
        fallback: Arc<FallbackResponder>,
    ) -> Self {
        Self {
            packs,
            sessions,
            llm,
            fallback,
        }
    }

    /// Runs one turn and returns the manager's reply.
    ///
    /// A failed session write is logged, not surfaced: the reply has already
    /// been produced, so the caller still gets it.
    pub async fn submit_turn(
        &self,
        owner_id: Uuid,
        pack_id: Uuid,
        request: TurnRequest,
    ) -> Result<String, AppError> {
        let utterance = request.message.trim();
        if utterance.is_empty() {
            return Err(AppError::Validation("message cannot be empty".to_string()));
        }
        check_transcript(&request.messages)?;

        let pack = self
            .packs
            .find_pack(owner_id, pack_id)
            .await?
            .ok_or_else(|| AppError::pack_not_found(pack_id))?;

        let reply = self.produce_reply(&pack, &request.messages, utterance).await;

        let mut transcript = request.messages;
        let user_at = next_timestamp(transcript.last(), Utc::now());
        transcript.push(ChatMessage::new(ChatRole::User, utterance, user_at));
        let reply_at = next_timestamp(transcript.last(), Utc::now());
        transcript.push(ChatMessage::new(ChatRole::Assistant, reply.clone(), reply_at));

        match self
            .sessions
            .upsert_messages(pack_id, &transcript, reply_at)
            .await
        {
            Ok(session) => debug!(
                "Session {} for pack {pack_id} now has {} messages",
                session.id,
                session.messages.len()
            ),
            Err(e) => error!("Failed to persist role-play session for pack {pack_id}: {e}"),
        }

        Ok(reply)
    }

    /// Model reply, or a keyword-matched canned reply if the model is unavailable.
    async fn produce_reply(&self, pack: &Pack, history: &[ChatMessage], utterance: &str) -> String {
        let prompt = build_manager_prompt(pack, history, utterance);

        match self.llm.complete(&prompt, DIALOGUE_MAX_TOKENS).await {
            Ok(reply) => reply,
            Err(e) => {
                let (category, reply) = self.fallback.respond(utterance);
                warn!("Role-play model unavailable, using {category:?} fallback: {e}");
                reply.to_string()
            }
        }
    }

    /// Stored transcript for a pack, if a turn has ever been taken.
    pub async fn get_session(
        &self,
        owner_id: Uuid,
        pack_id: Uuid,
    ) -> Result<Option<RolePlaySession>, AppError> {
        self.packs
            .find_pack(owner_id, pack_id)
            .await?
            .ok_or_else(|| AppError::pack_not_found(pack_id))?;

        Ok(self.sessions.find_session_by_pack(pack_id).await?)
    }

    /// Records the user's self-reported confidence. Ownership flows through the pack.
    pub async fn set_confidence(
        &self,
        owner_id: Uuid,
        session_id: Uuid,
        score: i64,
    ) -> Result<(), AppError> {
        let score = ConfidenceScore::new(score).ok_or_else(|| {
            AppError::Validation(format!(
                "confidence_score must be between {} and {}",
                ConfidenceScore::MIN,
                ConfidenceScore::MAX
            ))
        })?;

        let not_found = || AppError::NotFound(format!("Session {session_id} not found"));

        let session = self
            .sessions
            .find_session(session_id)
            .await?
            .ok_or_else(not_found)?;

        self.packs
            .find_pack(owner_id, session.pack_id)
            .await?
            .ok_or_else(not_found)?;

        if !self
            .sessions
            .update_confidence(session_id, score, Utc::now())
            .await?
        {
            return Err(not_found());
        }

        info!("Session {session_id} confidence set to {}", score.get());
        Ok(())
    }
}

/// Prior messages come from the client; keep the log ordered and ids unique.
fn check_transcript(messages: &[ChatMessage]) -> Result<(), AppError> {
    if messages
        .windows(2)
        .any(|pair| pair[0].timestamp >= pair[1].timestamp)
    {
        return Err(AppError::Validation(
            "messages must be in strictly increasing timestamp order".to_string(),
        ));
    }

    let mut seen = HashSet::with_capacity(messages.len());
    if !messages.iter().all(|m| seen.insert(m.id)) {
        return Err(AppError::Validation("messages contain a duplicate id".to_string()));
    }
    Ok(())
}

/// Stamp for the next message: now, or 1ms after the previous message if the
/// clock has not moved past it.
fn next_timestamp(previous: Option<&ChatMessage>, now: DateTime<Utc>) -> DateTime<Utc> {
    match previous {
        Some(prev) if prev.timestamp >= now => prev.timestamp + Duration::milliseconds(1),
        _ => now,
    }
}
