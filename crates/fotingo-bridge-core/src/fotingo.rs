//! Fotingo client
//!
//! Locates the fotingo executable and builds invocations with the
//! environment fotingo expects: the context overlay, a `CI=true` marker so
//! fotingo never prompts, and `FOTINGO_GIT_REMOTE` when the pipeline knows
//! the repository URL.

use std::path::{Path, PathBuf};

use crate::context::ReleaseContext;
use crate::error::InvokeError;
use crate::invoker::Invocation;
use crate::logger::ReleaseLogger;

/// Name of the fotingo executable on the search path
pub const FOTINGO_PROGRAM: &str = "fotingo";

/// Environment variable fotingo reads the git remote from
const GIT_REMOTE_VAR: &str = "FOTINGO_GIT_REMOTE";

/// Client for invoking fotingo subcommands
#[derive(Debug, Clone)]
pub struct FotingoClient {
    program: PathBuf,
}

impl FotingoClient {
    /// Locate fotingo via the standard executable lookup
    pub fn resolve() -> Result<Self, InvokeError> {
        let program = which::which(FOTINGO_PROGRAM).map_err(|e| InvokeError::NotFound {
            name: FOTINGO_PROGRAM.to_string(),
            source: e,
        })?;
        Ok(Self { program })
    }

    /// Use an explicit path to the fotingo executable
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Path of the executable this client invokes
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Run a fotingo subcommand, streaming its output to the logger
    pub async fn call<I, S>(
        &self,
        args: I,
        ctx: &ReleaseContext,
        logger: &dyn ReleaseLogger,
    ) -> Result<String, InvokeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        logger.log(&format!("Running fotingo from {}", self.program.display()));

        let mut invocation = Invocation::new(&self.program)
            .args(args)
            .with_env(ctx.env.clone())
            .with_env_var("CI", "true");

        if let Some(url) = &ctx.options.repository_url {
            invocation = invocation.with_env_var(GIT_REMOTE_VAR, url);
        }

        invocation.run(logger).await
    }
}
