// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Project, repository and branch domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tracked project (a group of repositories).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub repo_count: u32,
    pub last_activity_at: Option<DateTime<Utc>>,
}

/// A repository inside a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repo {
    pub id: String,
    pub project_id: i64,
    pub name: String,
    pub default_branch: String,
    pub description: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Tip-of-branch commit info shown in the branch list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchTip {
    pub sha: String,
    pub message: String,
    pub committed_at: DateTime<Utc>,
    pub author_name: String,
    pub author_email: String,
}

/// A branch of a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: String,
    pub name: String,
    pub is_default: bool,
    pub is_protected: bool,
    pub latest_commit: Option<BranchTip>,
}

/// One fetched page of branches plus the cursor that continues it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchPage {
    pub branches: Vec<Branch>,
    pub next_cursor: Option<String>,
}
