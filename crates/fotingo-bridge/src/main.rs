//! Fotingo Bridge - Pipeline lifecycle hooks for the fotingo release CLI

mod cli;
mod exit_codes;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use cli::Cli;

#[tokio::main]
async fn main() {
    let guard = init_tracing();

    let cli = Cli::parse();
    let code = match cli.execute().await {
        Ok(()) => exit_codes::SUCCESS,
        Err(err) => {
            tracing::error!("{:#}", err);
            exit_codes::for_error(&err)
        }
    };

    // process::exit skips destructors; flush the file appender first
    drop(guard);
    std::process::exit(code);
}

/// Set up tracing: console output controlled by RUST_LOG (default info),
/// plus a debug-level JSON file under ~/.fotingo-bridge/logs/ when a log
/// directory is available. Returns the file appender's worker guard, which
/// must stay alive until shutdown.
fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_filter(console_filter);
    let registry = tracing_subscriber::registry().with(console);

    match log_directory() {
        Some(log_dir) => {
            let appender = tracing_appender::rolling::daily(&log_dir, "fotingo-bridge.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(writer)
                        .with_filter(EnvFilter::new("debug")),
                )
                .init();
            Some(guard)
        }
        None => {
            registry.init();
            None
        }
    }
}

/// Log directory under the home directory, created on first use
fn log_directory() -> Option<std::path::PathBuf> {
    let dir = dirs::home_dir()?.join(".fotingo-bridge").join("logs");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}
