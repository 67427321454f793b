// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Commit-related domain types
//!
//! These types represent individual commits as the dashboard displays
//! them, after adaptation from the wire payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A person attached to a commit, either as author or committer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitIdentity {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// The repository a commit belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRepoRef {
    pub id: String,
    pub project_id: i64,
    pub name: String,
}

/// A single commit with its churn stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub repo: CommitRepoRef,
    pub author: CommitIdentity,
    pub committer: CommitIdentity,
    pub committed_at: DateTime<Utc>,
    pub message: String,
    pub is_merge: bool,
    pub added_lines: u64,
    pub deleted_lines: u64,
    pub files_changed: u32,
}

impl Commit {
    /// Abbreviated sha for table cells.
    pub fn short_sha(&self) -> &str {
        let end = self
            .sha
            .char_indices()
            .nth(7)
            .map(|(idx, _)| idx)
            .unwrap_or(self.sha.len());
        &self.sha[..end]
    }

    /// First line of the commit message.
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Total lines touched.
    pub fn churn(&self) -> u64 {
        self.added_lines + self.deleted_lines
    }
}

/// One fetched page of commits plus the cursor that continues it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitPage {
    pub commits: Vec<Commit>,
    pub next_cursor: Option<String>,
}

impl CommitPage {
    pub fn has_next(&self) -> bool {
        self.next_cursor.is_some()
    }
}
