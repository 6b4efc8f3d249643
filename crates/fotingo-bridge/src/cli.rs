//! CLI definition and hook dispatch
//!
//! Each invocation of this binary lives for exactly one lifecycle hook, so
//! the configuration gate cannot carry over from an earlier `verify`
//! process. The `publish` and `success` subcommands therefore run the verify
//! gate themselves before acting; a verify failure other than the
//! missing-configuration signal propagates and aborts the hook.

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use fotingo_bridge_core::{
    BridgeError, FotingoClient, FotingoSession, ReleaseContext, TracingLogger,
};

/// Fotingo Bridge - Pipeline lifecycle hooks for the fotingo release CLI
#[derive(Debug, Parser)]
#[command(name = "fotingo-bridge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the release context JSON ("-" reads stdin)
    #[arg(short, long, global = true, default_value = "-")]
    pub context: String,

    /// Explicit path to the fotingo executable
    #[arg(long, global = true, env = "FOTINGO_BIN")]
    pub fotingo_bin: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Lifecycle hooks
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Verify that fotingo is configured before the pipeline runs
    Verify,

    /// Create a fotingo release for the published version (auto-confirm)
    Publish,

    /// Create a fotingo release after a successful pipeline run
    Success,
}

impl Cli {
    /// Execute the selected lifecycle hook
    pub async fn execute(self) -> anyhow::Result<()> {
        let ctx = self.load_context()?;
        let client = match &self.fotingo_bin {
            Some(path) => FotingoClient::with_program(path),
            None => FotingoClient::resolve().map_err(BridgeError::from)?,
        };
        let logger = TracingLogger;
        let mut session = FotingoSession::new(client);

        match self.command {
            Commands::Verify => {
                session.verify_conditions(&ctx, &logger).await?;
            }
            Commands::Publish => {
                session.verify_conditions(&ctx, &logger).await?;
                session.publish(&ctx, &logger).await?;
            }
            Commands::Success => {
                session.verify_conditions(&ctx, &logger).await?;
                session.success(&ctx, &logger).await?;
            }
        }
        Ok(())
    }

    /// Read and parse the release context
    fn load_context(&self) -> Result<ReleaseContext, BridgeError> {
        let raw = if self.context == "-" {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        } else {
            std::fs::read_to_string(&self.context)?
        };
        Ok(serde_json::from_str(&raw)?)
    }
}
