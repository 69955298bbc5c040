//! HEAD commit lookup

use chrono::{DateTime, TimeZone, Utc};
use git2::{ErrorCode, Repository};
use serde::{Deserialize, Serialize};

use crate::Result;

/// Information about a single commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Full commit id (hex)
    pub id: String,

    /// First line of the commit message
    pub summary: String,

    /// Commit author name
    pub author: String,

    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
}

impl CommitInfo {
    /// Abbreviated commit id (7 characters).
    pub fn short_id(&self) -> &str {
        self.id.get(..7).unwrap_or(&self.id)
    }
}

/// The commit HEAD points at, or `None` on an unborn branch.
pub fn head_commit(repo: &Repository) -> Result<Option<CommitInfo>> {
    let head = match repo.head() {
        Ok(head) => head,
        Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let commit = head.peel_to_commit()?;

    let timestamp = Utc
        .timestamp_opt(commit.time().seconds(), 0)
        .single()
        .unwrap_or_default();

    let summary = commit
        .message()
        .unwrap_or("")
        .lines()
        .next()
        .unwrap_or("")
        .to_string();

    let author = commit.author().name().unwrap_or("Unknown").to_string();

    Ok(Some(CommitInfo {
        id: commit.id().to_string(),
        summary,
        author,
        timestamp,
    }))
}
