//! App shell — top-level phase and in-app navigation.
//!
//! The shell decides which single screen is visible: the splash, the
//! onboarding carousel, or the main phase with one active tab and an
//! optional upload overlay. Transitions return [`Effect`](crate::effect::Effect)s
//! instead of touching timers or the notification sink.

pub mod explore;
pub mod phase;
pub mod state;
pub mod tab;
pub mod view;

pub use explore::{ExploreFilter, ExploreState};
pub use phase::AppPhase;
pub use state::{ShellEvent, ShellState};
pub use tab::Tab;
pub use view::{HeaderView, MainView, ShellView};
