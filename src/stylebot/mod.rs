//! StyleBot — the simulated conversational assistant.

pub mod conversation;
pub mod model;
pub mod reply;

pub use conversation::AssistantConversation;
pub use model::{Message, MessageId, ReplyTicket, Role};
pub use reply::{CannedReply, ReplyDraft, ReplyProducer};
