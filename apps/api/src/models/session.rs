use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One utterance in a role-play transcript. Never edited after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp,
        }
    }
}

/// Self-reported confidence, 1 through 10. Has no effect on the dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ConfidenceScore(u8);

impl ConfidenceScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Returns `None` outside 1..=10.
    pub fn new(value: i64) -> Option<Self> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(ConfidenceScore)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for ConfidenceScore {
    fn default() -> Self {
        ConfidenceScore(5)
    }
}

/// The rehearsal conversation tied to one pack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RolePlaySession {
    pub id: Uuid,
    pub pack_id: Uuid,
    pub messages: Vec<ChatMessage>,
    pub confidence_score: ConfidenceScore,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
