//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Default time the splash screen stays up before onboarding starts.
pub const DEFAULT_SPLASH_DELAY: Duration = Duration::from_millis(2000);

/// Default delay between a user message and the scripted assistant reply.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// How long the splash phase lasts before advancing to onboarding.
    pub splash_delay: Duration,
    /// How long the assistant "thinks" before replying.
    pub reply_delay: Duration,
    /// Optional catalog file; the built-in catalog is used when unset.
    pub catalog_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            splash_delay: DEFAULT_SPLASH_DELAY,
            reply_delay: DEFAULT_REPLY_DELAY,
            catalog_path: None,
        }
    }
}

impl AppConfig {
    /// Build config from environment variables. Unset variables keep their
    /// defaults; set but unparseable ones are an error.
    ///
    /// - `FESHINE_SPLASH_DELAY_MS`
    /// - `FESHINE_REPLY_DELAY_MS`
    /// - `FESHINE_CATALOG`
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            splash_delay: millis_from_env("FESHINE_SPLASH_DELAY_MS", DEFAULT_SPLASH_DELAY)?,
            reply_delay: millis_from_env("FESHINE_REPLY_DELAY_MS", DEFAULT_REPLY_DELAY)?,
            catalog_path: std::env::var("FESHINE_CATALOG")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

fn millis_from_env(key: &str, default: Duration) -> Result<Duration, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => parse_millis(&raw).ok_or_else(|| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected milliseconds, got {:?}", raw),
        }),
        Err(_) => Ok(default),
    }
}

fn parse_millis(raw: &str) -> Option<Duration> {
    raw.trim().parse::<u64>().ok().map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_timings() {
        let config = AppConfig::default();
        assert_eq!(config.splash_delay, Duration::from_millis(2000));
        assert_eq!(config.reply_delay, Duration::from_millis(1000));
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn parse_millis_accepts_padded_numbers() {
        assert_eq!(parse_millis(" 250 "), Some(Duration::from_millis(250)));
        assert_eq!(parse_millis("0"), Some(Duration::ZERO));
    }

    #[test]
    fn parse_millis_rejects_garbage() {
        assert_eq!(parse_millis("soon"), None);
        assert_eq!(parse_millis("-5"), None);
        assert_eq!(parse_millis(""), None);
    }

    #[test]
    fn millis_from_env_rejects_invalid_value() {
        // SAFETY: no other test touches this variable.
        unsafe { std::env::set_var("FESHINE_TEST_BAD_DELAY_MS", "fast") };
        let err = millis_from_env("FESHINE_TEST_BAD_DELAY_MS", DEFAULT_REPLY_DELAY).unwrap_err();
        assert!(err.to_string().contains("FESHINE_TEST_BAD_DELAY_MS"));
        unsafe { std::env::remove_var("FESHINE_TEST_BAD_DELAY_MS") };
    }

    #[test]
    fn millis_from_env_defaults_when_unset() {
        let delay = millis_from_env("FESHINE_TEST_UNSET_DELAY_MS", DEFAULT_SPLASH_DELAY).unwrap();
        assert_eq!(delay, DEFAULT_SPLASH_DELAY);
    }
}
