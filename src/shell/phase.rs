//! Top-level app phase.

use serde::{Deserialize, Serialize};

/// Top-level application mode.
///
/// Progresses linearly: Splash → Onboarding → Main. No phase is re-entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppPhase {
    #[default]
    Splash,
    Onboarding,
    Main,
}

impl AppPhase {
    /// The next phase in the linear progression, if any.
    pub fn next(&self) -> Option<AppPhase> {
        match self {
            Self::Splash => Some(Self::Onboarding),
            Self::Onboarding => Some(Self::Main),
            Self::Main => None,
        }
    }
}

impl std::fmt::Display for AppPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Splash => "splash",
            Self::Onboarding => "onboarding",
            Self::Main => "main",
        };
        write!(f, "{s}")
    }
}
