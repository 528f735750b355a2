//! Assistant conversation — transcript plus deferred scripted replies.
//!
//! A submit appends the user's message right away and asks for a reply
//! timer. When the timer fires the owner produces the reply text and hands
//! it back through [`AssistantConversation::deliver`]. Resetting bumps the
//! session so replies scheduled before the reset are refused.

use std::collections::VecDeque;
use std::time::Duration;

use tracing::{debug, info};

use crate::effect::{Effect, TimerEvent};

use super::model::{Message, MessageId, ReplyTicket, Role};
use super::reply::ReplyDraft;

/// Chat state of the assistant tab.
#[derive(Debug, Clone)]
pub struct AssistantConversation {
    greeting: String,
    reply_delay: Duration,
    quick_prompts: Vec<String>,
    session: u64,
    next_id: u64,
    next_seq: u64,
    transcript: Vec<Message>,
    input: String,
    /// Replies scheduled but not yet delivered, in scheduling order.
    pending: VecDeque<ReplyTicket>,
}

impl AssistantConversation {
    pub fn new(greeting: impl Into<String>, reply_delay: Duration) -> Self {
        let mut conversation = Self {
            greeting: greeting.into(),
            reply_delay,
            quick_prompts: Vec::new(),
            session: 0,
            next_id: 1,
            next_seq: 0,
            transcript: Vec::new(),
            input: String::new(),
            pending: VecDeque::new(),
        };
        conversation.seed();
        conversation
    }

    /// Suggested prompts the user can drop into the input box.
    pub fn with_quick_prompts(mut self, prompts: Vec<String>) -> Self {
        self.quick_prompts = prompts;
        self
    }

    fn seed(&mut self) {
        self.next_id = 1;
        let greeting = Message::new(self.mint_id(), Role::Assistant, self.greeting.clone());
        self.transcript = vec![greeting];
    }

    fn mint_id(&mut self) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn quick_prompts(&self) -> &[String] {
        &self.quick_prompts
    }

    /// Number of replies still waiting on their timer.
    pub fn pending_replies(&self) -> usize {
        self.pending.len()
    }

    /// Replace the input buffer.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Fill the input buffer with a quick prompt. Returns `false` for an
    /// unknown index.
    pub fn use_quick_prompt(&mut self, index: usize) -> bool {
        match self.quick_prompts.get(index) {
            Some(prompt) => {
                self.input = prompt.clone();
                true
            }
            None => false,
        }
    }

    /// Submit whatever is in the input buffer.
    pub fn send(&mut self) -> Vec<Effect> {
        let text = self.input.clone();
        self.submit(&text)
    }

    /// Append a user message and request one deferred reply.
    ///
    /// Blank text is ignored and leaves everything untouched.
    pub fn submit(&mut self, text: &str) -> Vec<Effect> {
        if text.trim().is_empty() {
            debug!("Empty chat submission ignored");
            return Vec::new();
        }

        let id = self.mint_id();
        self.transcript.push(Message::new(id, Role::User, text));
        self.input.clear();

        let ticket = ReplyTicket {
            session: self.session,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.pending.push_back(ticket);

        info!(message_id = %id, pending = self.pending.len(), "User message submitted");
        vec![Effect::Schedule {
            after: self.reply_delay,
            event: TimerEvent::ReplyDue(ticket),
        }]
    }

    /// Whether `ticket` still belongs to a live, undelivered reply.
    pub fn is_pending(&self, ticket: ReplyTicket) -> bool {
        ticket.session == self.session && self.pending.contains(&ticket)
    }

    /// Append the assistant reply for `ticket`. Stale tickets are a no-op.
    pub fn deliver(&mut self, ticket: ReplyTicket, draft: ReplyDraft) -> Option<MessageId> {
        if ticket.session != self.session {
            debug!(session = ticket.session, "Reply for a previous session dropped");
            return None;
        }
        let Some(position) = self.pending.iter().position(|t| *t == ticket) else {
            debug!(seq = ticket.seq, "Reply for unknown ticket dropped");
            return None;
        };
        self.pending.remove(position);

        let id = self.mint_id();
        self.transcript.push(
            Message::new(id, Role::Assistant, draft.text).with_suggestions(draft.has_suggestions),
        );
        info!(message_id = %id, "Assistant reply delivered");
        Some(id)
    }

    /// Back to the seeded greeting; every pending reply is cancelled.
    pub fn reset(&mut self) -> Vec<Effect> {
        let effects: Vec<Effect> = self
            .pending
            .drain(..)
            .map(|ticket| Effect::Cancel(TimerEvent::ReplyDue(ticket)))
            .collect();
        self.session += 1;
        self.input.clear();
        self.seed();
        debug!(cancelled = effects.len(), session = self.session, "Conversation reset");
        effects
    }
}
