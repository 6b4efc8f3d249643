//! Fotingo Bridge Core - Library for bridging release pipelines to fotingo
//!
//! This crate provides the pieces needed to drive the `fotingo` release CLI
//! from a release-automation pipeline: a streaming subprocess invoker, the
//! fotingo client (executable resolution and environment injection), the
//! per-run session that gates work on fotingo's configuration state, and the
//! lifecycle hooks (verify conditions, publish, success) built on top.

pub mod context;
pub mod error;
pub mod fotingo;
pub mod invoker;
pub mod issues;
pub mod logger;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use context::{Branch, BranchType, Commit, NextRelease, ReleaseContext, RunOptions};
pub use error::{BridgeError, InvokeError, Result};
pub use fotingo::FotingoClient;
pub use invoker::Invocation;
pub use issues::issues_in_release;
pub use logger::{BufferLogger, LogEntry, ReleaseLogger, TracingLogger};
pub use session::{ConfigState, FotingoSession};
