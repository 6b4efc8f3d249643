//! Per-run session: configuration gate and lifecycle hooks
//!
//! A [`FotingoSession`] is created once per pipeline run and owns the
//! configuration state that the hooks share. `verify_conditions` writes the
//! state exactly once; `publish` and `success` read it to decide whether to
//! invoke fotingo at all. Reading the state before it has been written is
//! treated as not configured, so hooks fail safe into a skip.

use crate::context::{NextRelease, ReleaseContext};
use crate::error::{InvokeError, Result};
use crate::fotingo::FotingoClient;
use crate::issues::issues_in_release;
use crate::logger::ReleaseLogger;

/// Exit code fotingo uses to signal missing configuration
const MISSING_CONFIGURATION_EXIT_CODE: i32 = 20;

/// Message marker older fotingo versions print instead of exiting with 20
const MISSING_CONFIGURATION_MARKER: &str = "Missing required configuration";

/// Configuration state of the external fotingo tool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigState {
    /// Verification has not run yet
    #[default]
    Unknown,
    /// Verification succeeded
    Configured,
    /// Verification reported missing configuration
    NotConfigured,
}

/// Whether a release invocation confirms automatically
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Confirm {
    /// Pass `-y` so fotingo creates the release without prompting
    Auto,
    /// Let fotingo use its own confirmation behavior
    Manual,
}

/// State and entry points for one pipeline run
#[derive(Debug)]
pub struct FotingoSession {
    client: FotingoClient,
    state: ConfigState,
}

impl FotingoSession {
    /// Create a session around the given client
    pub fn new(client: FotingoClient) -> Self {
        Self {
            client,
            state: ConfigState::Unknown,
        }
    }

    /// Current configuration state
    pub fn config_state(&self) -> ConfigState {
        self.state
    }

    /// Whether fotingo verified as configured
    ///
    /// Unknown state reads as not configured.
    pub fn is_configured(&self) -> bool {
        self.state == ConfigState::Configured
    }

    /// Verify-conditions hook: run `fotingo verify` and record the result
    ///
    /// A failure carrying the missing-configuration signature is suppressed
    /// and recorded as [`ConfigState::NotConfigured`]; any other failure is
    /// propagated and leaves the state untouched, aborting the pipeline.
    pub async fn verify_conditions(
        &mut self,
        ctx: &ReleaseContext,
        logger: &dyn ReleaseLogger,
    ) -> Result<()> {
        match self.client.call(["verify"], ctx, logger).await {
            Ok(_) => {
                self.state = ConfigState::Configured;
                Ok(())
            }
            Err(err) if is_missing_configuration(&err) => {
                tracing::debug!("fotingo reported missing configuration: {}", err);
                self.state = ConfigState::NotConfigured;
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Publish hook: create the fotingo release with auto-confirm
    pub async fn publish(&self, ctx: &ReleaseContext, logger: &dyn ReleaseLogger) -> Result<()> {
        self.release(ctx, logger, Confirm::Auto).await
    }

    /// Success hook: create the fotingo release without auto-confirm
    pub async fn success(&self, ctx: &ReleaseContext, logger: &dyn ReleaseLogger) -> Result<()> {
        self.release(ctx, logger, Confirm::Manual).await
    }

    /// Shared release invocation behind `publish` and `success`
    ///
    /// Skips with a logged reason when the gate reports not configured, on a
    /// dry run, without a next release, on a pre-release branch or when no
    /// issue references resolve. Invocation failures are logged and never
    /// propagated: a failed fotingo call must not fail the pipeline.
    async fn release(
        &self,
        ctx: &ReleaseContext,
        logger: &dyn ReleaseLogger,
        confirm: Confirm,
    ) -> Result<()> {
        if !self.is_configured() {
            logger.log("Skipping fotingo. Missing configuration parameters");
            return Ok(());
        }
        if ctx.options.dry_run {
            logger.log("Skipping fotingo release. Dry run");
            return Ok(());
        }
        let Some(next_release) = &ctx.next_release else {
            logger.error("Could not find next release. Exiting");
            return Ok(());
        };
        if ctx.branch.is_prerelease() {
            logger.log("Skipping fotingo release. This is a pre-release");
            return Ok(());
        }
        let issues = issues_in_release(&ctx.commits);
        if issues.is_empty() {
            logger.log("No issues found in this release. Skipping fotingo release");
            return Ok(());
        }

        let name = release_name(ctx, next_release);
        logger.log(&format!(
            "Creating release {} with issues: {}",
            name,
            issues.join(",")
        ));

        let args = release_args(&name, &issues, confirm);
        if let Err(err) = self.client.call(args, ctx, logger).await {
            logger.error("fotingo release command failed");
            logger.error(&err.to_string());
        }
        Ok(())
    }
}

/// Whether an invocation failure means "fotingo is not configured"
///
/// The documented signal is exit code 20; the message marker is kept as a
/// fallback for fotingo versions that only print it.
fn is_missing_configuration(err: &InvokeError) -> bool {
    match err.exit_code() {
        Some(code) => code == MISSING_CONFIGURATION_EXIT_CODE,
        None => err.to_string().contains(MISSING_CONFIGURATION_MARKER),
    }
}

/// Release name: `<repo>-<version>` when the repository name resolves
fn release_name(ctx: &ReleaseContext, next_release: &NextRelease) -> String {
    match ctx.options.repository_name() {
        Some(repo) => format!("{}-{}", repo, next_release.version),
        None => next_release.version.clone(),
    }
}

/// Argument list for `fotingo release`
fn release_args(name: &str, issues: &[String], confirm: Confirm) -> Vec<String> {
    let mut args = vec!["release".to_string()];
    if confirm == Confirm::Auto {
        args.push("-y".to_string());
    }
    args.push("-n".to_string());
    args.push(name.to_string());
    for issue in issues {
        args.push("-i".to_string());
        args.push(issue.trim().to_string());
    }
    args
}
