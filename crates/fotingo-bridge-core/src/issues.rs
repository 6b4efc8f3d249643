//! Issue reference extraction from commit messages
//!
//! Commits annotate the issues they resolve with a `Fixes #KEY` line in the
//! message body. Every such reference in the release becomes a `-i` flag on
//! the fotingo release invocation.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::Commit;

/// Regex for `Fixes #KEY` annotations
///
/// Matches anywhere in the message, not just at line starts; the word
/// boundary keeps words ending in "fixes" from matching.
static FIXES_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bfixes\s+#(?P<issue>[A-Za-z0-9][A-Za-z0-9_-]*)")
        .expect("Invalid regex")
});

/// Extract the issue keys fixed by the given commits
///
/// Keys are returned in commit order, then occurrence order within each
/// message.
pub fn issues_in_release(commits: &[Commit]) -> Vec<String> {
    commits
        .iter()
        .flat_map(|commit| {
            FIXES_REGEX
                .captures_iter(&commit.message)
                .map(|caps| caps["issue"].trim().to_string())
                .collect::<Vec<_>>()
        })
        .collect()
}
