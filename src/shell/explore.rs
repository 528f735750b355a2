//! Explore screen state: result filter and the selected hashtag chip.

use serde::{Deserialize, Serialize};

/// Which results the Explore screen lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExploreFilter {
    #[default]
    Posts,
    Users,
    Styles,
}

impl ExploreFilter {
    pub const ALL: [ExploreFilter; 3] = [Self::Posts, Self::Users, Self::Styles];

    /// Hashtag chips are only offered above the post grid.
    pub fn shows_hashtags(&self) -> bool {
        matches!(self, Self::Posts)
    }
}

impl std::fmt::Display for ExploreFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Posts => write!(f, "posts"),
            Self::Users => write!(f, "users"),
            Self::Styles => write!(f, "styles"),
        }
    }
}

impl std::str::FromStr for ExploreFilter {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "posts" => Ok(Self::Posts),
            "users" => Ok(Self::Users),
            "styles" => Ok(Self::Styles),
            _ => Err(format!("Unknown filter: {}", s)),
        }
    }
}

/// Local state of the Explore screen. Dropped when the screen is left.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExploreState {
    pub filter: ExploreFilter,
    pub hashtag: Option<String>,
}

impl ExploreState {
    pub fn select_filter(&mut self, filter: ExploreFilter) {
        self.filter = filter;
    }

    /// Select a hashtag chip. Returns `false` when no chips are shown.
    pub fn select_hashtag(&mut self, tag: String) -> bool {
        if !self.filter.shows_hashtags() {
            return false;
        }
        self.hashtag = Some(tag);
        true
    }
}
