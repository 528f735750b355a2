//! Read-only render snapshots of the shell.

use serde::Serialize;

use super::explore::ExploreState;
use super::tab::Tab;

/// Header bar above the tab content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    pub title: String,
    pub show_search: bool,
}

/// What the main phase shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MainView {
    pub tab: Tab,
    /// `None` on full-screen tabs (assistant, notifications, messages).
    pub header: Option<HeaderView>,
    pub show_back: bool,
    pub show_bot_shortcut: bool,
    /// Modal upload sheet drawn above the tab.
    pub upload_open: bool,
    /// Filter and hashtag while the Explore tab is active.
    pub explore: Option<ExploreState>,
}

/// Exactly one of the three top-level screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "screen")]
pub enum ShellView {
    Splash,
    Onboarding { step: usize, len: usize, is_last: bool },
    Main(MainView),
}
