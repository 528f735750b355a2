//! Reply producers decide what the assistant says back.
//!
//! The conversation only decides *when* a reply lands. *What* it says comes
//! from a [`ReplyProducer`], invoked once the reply delay has elapsed.

use async_trait::async_trait;

use super::model::Message;

/// Text and carousel flag of an assistant reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyDraft {
    pub text: String,
    pub has_suggestions: bool,
}

/// Produces the assistant's answer for the transcript so far.
#[async_trait]
pub trait ReplyProducer: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    async fn reply(&self, transcript: &[Message]) -> ReplyDraft;
}

/// Always answers with the same acknowledgement and a suggestion carousel.
pub struct CannedReply {
    text: String,
}

impl CannedReply {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl ReplyProducer for CannedReply {
    fn name(&self) -> &str {
        "canned"
    }

    async fn reply(&self, _transcript: &[Message]) -> ReplyDraft {
        ReplyDraft {
            text: self.text.clone(),
            has_suggestions: true,
        }
    }
}
