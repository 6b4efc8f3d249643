//! External command invoker
//!
//! Runs one external command to completion. Each stdout line is forwarded to
//! the caller's logger as it arrives and each stderr line to the error sink;
//! the returned future resolves exactly once, with the accumulated stdout on
//! a zero exit and an error otherwise. No timeouts and no cancellation: a
//! hung subprocess hangs the caller.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

use crate::error::InvokeError;
use crate::logger::ReleaseLogger;

/// A single external command invocation
///
/// Immutable once submitted to [`Invocation::run`]. The environment overlay
/// merges on top of the inherited process environment.
#[derive(Debug, Clone)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    env: HashMap<String, String>,
}

impl Invocation {
    /// Create an invocation of the given program
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: HashMap::new(),
        }
    }

    /// Append a single argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Add a single environment variable to the overlay
    pub fn with_env_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Merge a set of environment variables into the overlay
    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env.extend(env);
        self
    }

    /// Program name used in error messages
    fn command_name(&self) -> String {
        self.program
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string())
    }

    /// Run the command to completion, streaming output to the logger
    ///
    /// Resolves with the accumulated stdout (forwarded lines joined with
    /// newlines) on exit code 0, fails with [`InvokeError::ExitCode`] on any
    /// other exit code and with [`InvokeError::Launch`] when the process
    /// cannot be started.
    pub async fn run(&self, logger: &dyn ReleaseLogger) -> Result<String, InvokeError> {
        let command = self.command_name();
        tracing::debug!("running {} with args {:?}", command, self.args);

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        for (key, value) in &self.env {
            cmd.env(key, value);
        }

        let mut child = cmd.spawn().map_err(|e| InvokeError::Launch {
            command: command.clone(),
            source: e,
        })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        // Drain both pipes concurrently so neither can fill and block the child
        let drain_stdout = async {
            let mut collected = Vec::new();
            if let Some(stdout) = stdout {
                let mut lines = BufReader::new(stdout).lines();
                loop {
                    match lines.next_line().await {
                        Ok(Some(line)) => {
                            logger.log(&line);
                            collected.push(line);
                        }
                        Ok(None) => break,
                        Err(e) => {
                            tracing::debug!("stdout read error from {}: {}", command, e);
                            break;
                        }
                    }
                }
            }
            collected
        };
        let drain_stderr = async {
            if let Some(stderr) = stderr {
                let mut lines = BufReader::new(stderr).lines();
                loop {
                    match lines.next_line().await {
                        Ok(Some(line)) => logger.error(&line),
                        Ok(None) => break,
                        Err(e) => {
                            tracing::debug!("stderr read error from {}: {}", command, e);
                            break;
                        }
                    }
                }
            }
        };

        let (collected, ()) = tokio::join!(drain_stdout, drain_stderr);

        let status = child.wait().await.map_err(|e| InvokeError::Launch {
            command: command.clone(),
            source: e,
        })?;

        if status.success() {
            Ok(collected.join("\n"))
        } else {
            let code = status.code().unwrap_or(-1);
            tracing::debug!("{} exited with code {}", command, code);
            Err(InvokeError::ExitCode { command, code })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::BufferLogger;

    #[tokio::test]
    async fn test_zero_exit_accumulates_stdout() {
        let logger = BufferLogger::new();
        let output = Invocation::new("sh")
            .args(["-c", "printf 'one\\ntwo\\n'"])
            .run(&logger)
            .await
            .unwrap();

        assert_eq!(output, "one\ntwo");
        assert_eq!(logger.logs(), vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_non_zero_exit_fails_with_code_in_message() {
        let logger = BufferLogger::new();
        let err = Invocation::new("sh")
            .args(["-c", "exit 7"])
            .run(&logger)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("exited with code 7"), "{err}");
        assert_eq!(err.exit_code(), Some(7));
    }

    #[tokio::test]
    async fn test_launch_error_surfaces_unchanged() {
        let logger = BufferLogger::new();
        let err = Invocation::new("/definitely/not/a/real/binary")
            .run(&logger)
            .await
            .unwrap_err();

        assert!(matches!(err, InvokeError::Launch { .. }));
        assert!(logger.entries().is_empty());
    }

    #[tokio::test]
    async fn test_env_overlay_merges_on_inherited_environment() {
        let logger = BufferLogger::new();
        let output = Invocation::new("sh")
            .args(["-c", "echo $BRIDGE_TEST_VAR"])
            .with_env_var("BRIDGE_TEST_VAR", "overlay")
            .run(&logger)
            .await
            .unwrap();

        assert_eq!(output, "overlay");
    }

    #[tokio::test]
    async fn test_stderr_forwarded_to_error_sink() {
        let logger = BufferLogger::new();
        let output = Invocation::new("sh")
            .args(["-c", "echo oops 1>&2"])
            .run(&logger)
            .await
            .unwrap();

        assert_eq!(output, "");
        assert_eq!(logger.errors(), vec!["oops"]);
        assert!(logger.logs().is_empty());
    }

    #[tokio::test]
    async fn test_output_forwarded_even_on_failure() {
        let logger = BufferLogger::new();
        let err = Invocation::new("sh")
            .args(["-c", "echo partial; exit 3"])
            .run(&logger)
            .await
            .unwrap_err();

        assert_eq!(err.exit_code(), Some(3));
        assert_eq!(logger.logs(), vec!["partial"]);
    }

    #[tokio::test]
    async fn test_read_error_mid_stream_keeps_forwarded_lines() {
        // \377 is invalid UTF-8, which fails the line read mid-stream
        let logger = BufferLogger::new();
        let output = Invocation::new("sh")
            .args(["-c", r"printf 'ok\n\377\n'"])
            .run(&logger)
            .await
            .unwrap();

        assert_eq!(output, "ok");
        assert_eq!(logger.logs(), vec!["ok"]);
    }

    #[tokio::test]
    async fn test_working_directory() {
        let temp = tempfile::TempDir::new().unwrap();
        let logger = BufferLogger::new();
        let output = Invocation::new("sh")
            .args(["-c", "pwd"])
            .with_cwd(temp.path())
            .run(&logger)
            .await
            .unwrap();

        let expected = temp.path().canonicalize().unwrap();
        assert_eq!(
            std::path::Path::new(&output).canonicalize().unwrap(),
            expected
        );
    }
}
