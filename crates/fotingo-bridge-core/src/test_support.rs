//! Shared helpers for crate tests

use std::fs;
use std::path::{Path, PathBuf};

use crate::context::{Branch, Commit, NextRelease, ReleaseContext, RunOptions};

/// Write an executable shell script standing in for the fotingo binary
pub fn fake_fotingo(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("fotingo");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }
    path
}

/// A context with everything a release invocation needs to proceed
pub fn release_context() -> ReleaseContext {
    ReleaseContext {
        commits: vec![
            Commit::new("feat: add something\nFixes #TEST-1234"),
            Commit::new("fix: fix something\nFixes #TEST-12"),
        ],
        branch: Branch {
            name: "main".to_string(),
            main: true,
            branch_type: None,
        },
        next_release: Some(NextRelease {
            version: "1.0.0".to_string(),
            git_tag: Some("1.0.0".to_string()),
            notes: Some("This is a release".to_string()),
            release_type: Some("major".to_string()),
        }),
        options: RunOptions {
            dry_run: false,
            repository_url: Some(
                "https://github.com/tagoro9/semantic-release-fotingo".to_string(),
            ),
            tag_format: None,
        },
        env: std::collections::HashMap::new(),
    }
}
