//! Tabs of the main shell and the chrome rules that depend on them.

use serde::{Deserialize, Serialize};

/// Mutually exclusive content views of the main phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Home,
    Explore,
    StyleBot,
    Community,
    Profile,
    Notifications,
    Messages,
}

impl Tab {
    pub const ALL: [Tab; 7] = [
        Tab::Home,
        Tab::Explore,
        Tab::StyleBot,
        Tab::Community,
        Tab::Profile,
        Tab::Notifications,
        Tab::Messages,
    ];

    /// Tabs reachable from the bottom navigation bar.
    pub fn is_primary(&self) -> bool {
        matches!(self, Self::Home | Self::Explore | Self::Community | Self::Profile)
    }

    /// Where the back button leads, for screens that have one.
    pub fn back_target(&self) -> Option<Tab> {
        match self {
            Self::StyleBot | Self::Notifications | Self::Messages => Some(Self::Home),
            _ => None,
        }
    }

    /// Whether the shared header bar is drawn above this tab.
    pub fn shows_header(&self) -> bool {
        !matches!(self, Self::StyleBot | Self::Notifications | Self::Messages)
    }

    /// Whether the header offers the search shortcut.
    pub fn shows_search(&self) -> bool {
        !matches!(self, Self::Explore)
    }

    /// Whether the floating assistant shortcut is visible.
    pub fn shows_bot_shortcut(&self) -> bool {
        !matches!(self, Self::StyleBot)
    }

    /// Capitalized name, used as the header title off the home tab.
    pub fn title(&self) -> String {
        let name = self.to_string();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Home => write!(f, "home"),
            Self::Explore => write!(f, "explore"),
            Self::StyleBot => write!(f, "stylebot"),
            Self::Community => write!(f, "community"),
            Self::Profile => write!(f, "profile"),
            Self::Notifications => write!(f, "notifications"),
            Self::Messages => write!(f, "messages"),
        }
    }
}

impl std::str::FromStr for Tab {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "home" => Ok(Self::Home),
            "explore" => Ok(Self::Explore),
            "stylebot" | "bot" => Ok(Self::StyleBot),
            "community" => Ok(Self::Community),
            "profile" => Ok(Self::Profile),
            "notifications" => Ok(Self::Notifications),
            "messages" => Ok(Self::Messages),
            _ => Err(format!("Unknown tab: {}", s)),
        }
    }
}
