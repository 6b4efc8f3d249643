//! Release context supplied by the hosting pipeline
//!
//! The pipeline hands each lifecycle hook a JSON context describing the
//! commits in the release, the branch being released, the upcoming release
//! (if any) and the run options. Field names follow the pipeline's camelCase
//! wire format.

use std::collections::HashMap;

use git_url_parse::GitUrl;
use serde::{Deserialize, Serialize};

/// Full context for one lifecycle hook invocation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseContext {
    /// Commits included in the release
    #[serde(default)]
    pub commits: Vec<Commit>,

    /// Branch being released
    #[serde(default)]
    pub branch: Branch,

    /// The release about to be published, absent when nothing is releasable
    #[serde(default)]
    pub next_release: Option<NextRelease>,

    /// Run options
    #[serde(default)]
    pub options: RunOptions,

    /// Environment overlay to pass through to subprocesses
    #[serde(default)]
    pub env: HashMap<String, String>,
}

/// A single commit in the release
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    /// Full commit message, subject and body
    pub message: String,
}

impl Commit {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Branch descriptor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Branch {
    /// Branch name
    #[serde(default)]
    pub name: String,

    /// Whether this branch is the main release line
    #[serde(default)]
    pub main: bool,

    /// Release-type classification assigned by the pipeline
    #[serde(rename = "type", default)]
    pub branch_type: Option<BranchType>,
}

/// Branch classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchType {
    /// A regular release branch
    Release,
    /// A pre-release branch
    Prerelease,
    /// A maintenance branch for an older release line
    Maintenance,
}

impl Branch {
    /// Whether this branch produces pre-releases rather than final releases
    ///
    /// A branch explicitly classified as prerelease qualifies, as does a
    /// release branch that is not the main line.
    pub fn is_prerelease(&self) -> bool {
        match self.branch_type {
            Some(BranchType::Prerelease) => true,
            Some(BranchType::Release) => !self.main,
            _ => false,
        }
    }
}

/// The upcoming release
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextRelease {
    /// Version string, e.g. "1.0.0"
    pub version: String,

    /// Git tag for the release
    #[serde(default)]
    pub git_tag: Option<String>,

    /// Release notes
    #[serde(default)]
    pub notes: Option<String>,

    /// Release type (major, minor, patch)
    #[serde(rename = "type", default)]
    pub release_type: Option<String>,
}

/// Options for the pipeline run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOptions {
    /// Whether this is a dry run
    #[serde(default)]
    pub dry_run: bool,

    /// URL of the repository being released
    #[serde(default)]
    pub repository_url: Option<String>,

    /// Tag format configured for the pipeline
    #[serde(default)]
    pub tag_format: Option<String>,
}

impl RunOptions {
    /// Repository name derived from the repository URL, when parseable
    pub fn repository_name(&self) -> Option<String> {
        let url = self.repository_url.as_deref()?;
        GitUrl::parse(url).ok().map(|parsed| parsed.name)
    }
}
