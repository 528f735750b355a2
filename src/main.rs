use std::sync::Arc;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use feshine::App;
use feshine::cli::{self, ConsoleNotifier};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Keep the guard alive so buffered log lines are flushed on exit.
    let _log_guard = init_tracing();

    let (config, catalog) = feshine::load_settings().await?;

    eprintln!("✨ {} v{}", catalog.brand, env!("CARGO_PKG_VERSION"));
    eprintln!("   Splash: {} ms", config.splash_delay.as_millis());
    eprintln!("   Reply delay: {} ms", config.reply_delay.as_millis());
    eprintln!("   Onboarding slides: {}\n", catalog.slides.len());

    let app = App::with_canned_replies(&config, catalog, Arc::new(ConsoleNotifier));
    cli::run(app).await?;

    Ok(())
}

/// Log to stderr, or to a daily file under `FESHINE_LOG_DIR` when set.
fn init_tracing() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match std::env::var("FESHINE_LOG_DIR") {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "feshine.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Some(guard)
        }
        Err(_) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}
