//! Transcript data model.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Identity of a message within a transcript. Strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(pub u64);

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// One entry of the transcript. Never modified after it is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub text: String,
    pub sent_at: DateTime<Utc>,
    /// The message carries a suggestion carousel.
    #[serde(default)]
    pub has_suggestions: bool,
}

impl Message {
    pub fn new(id: MessageId, role: Role, text: impl Into<String>) -> Self {
        Self {
            id,
            role,
            text: text.into(),
            sent_at: Utc::now(),
            has_suggestions: false,
        }
    }

    pub fn with_suggestions(mut self, has_suggestions: bool) -> Self {
        self.has_suggestions = has_suggestions;
        self
    }

    /// Local `HH:MM` label shown under the bubble.
    pub fn time_label(&self) -> String {
        self.sent_at.with_timezone(&Local).format("%H:%M").to_string()
    }
}

/// Identifies one scheduled reply.
///
/// `session` changes on every reset, so a ticket minted before a reset can
/// never match the live transcript again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReplyTicket {
    pub session: u64,
    pub seq: u64,
}
