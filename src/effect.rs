//! Side-effect requests produced by the state machines.
//!
//! Transitions never touch timers or the notification sink directly. They
//! return [`Effect`]s and the [`App`](crate::app::App) carries them out.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::stylebot::ReplyTicket;

/// Payload of a deferred action sitting in the timer queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// The splash screen has been visible long enough.
    SplashElapsed,
    /// The scripted assistant reply for a submitted message is due.
    ReplyDue(ReplyTicket),
}

/// User-visible acknowledgements. The text lives in the content catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// A post was "shared" from the upload overlay.
    UploadShared,
    /// The AI insight chip on a feed card was tapped.
    InsightTapped,
}

/// Something a transition asks the owner to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Schedule a one-shot timer.
    Schedule { after: Duration, event: TimerEvent },
    /// Cancel any pending timer carrying this payload.
    Cancel(TimerEvent),
    /// Fire-and-forget notification.
    Notify(Notice),
    /// Tear down the assistant conversation (its view was unmounted).
    ResetConversation,
}
