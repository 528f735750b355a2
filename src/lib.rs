//! Feshine: headless navigation and assistant core of the fashion app
//! prototype.

pub mod app;
pub mod cli;
pub mod config;
pub mod content;
pub mod effect;
pub mod error;
pub mod notify;
pub mod onboarding;
pub mod shell;
pub mod stylebot;
pub mod timer;

pub use app::App;

use crate::config::AppConfig;
use crate::content::Catalog;
use crate::error::Error;

/// Read configuration from the environment and load the catalog it names.
pub async fn load_settings() -> Result<(AppConfig, Catalog), Error> {
    let config = AppConfig::from_env()?;
    let catalog = match config.catalog_path.as_deref() {
        Some(path) => Catalog::load(path).await?,
        None => Catalog::builtin()?,
    };
    Ok((config, catalog))
}
