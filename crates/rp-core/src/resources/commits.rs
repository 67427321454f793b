// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Repository commit and branch listings

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use rp_api_contract::{BranchDto, BranchTipDto, CommitDto, PageQuery, RepoCommitsQuery};
use rp_client_api::AnalyticsApi;
use rp_domain_types::{
    Branch, BranchPage, BranchTip, Commit, CommitIdentity, CommitPage, CommitRepoRef,
};

use crate::error::QueryResult;
use crate::key::QueryKey;

pub fn repo_commits_key(
    repo_id: &str,
    limit: Option<u32>,
    cursor: Option<&str>,
    after: Option<DateTime<Utc>>,
) -> QueryKey {
    QueryKey::new("repo-commits")
        .text("repo_id", Some(repo_id))
        .int("limit", limit.map(i64::from))
        .text("cursor", cursor)
        // `after` is a point in time, not a day; it participates at full
        // precision rather than through date normalization.
        .text("after", after.map(|at| at.to_rfc3339()).as_deref())
}

/// One page of a repository's commit history, newest first.
pub async fn fetch_repo_commits(
    client: &dyn AnalyticsApi,
    token: &CancellationToken,
    repo_id: &str,
    limit: Option<u32>,
    cursor: Option<&str>,
    after: Option<DateTime<Utc>>,
) -> QueryResult<CommitPage> {
    let query = RepoCommitsQuery {
        limit,
        cursor: cursor.map(str::to_string),
        after,
    };
    let page = super::cancellable(token, client.repo_commits(repo_id, &query)).await?;
    Ok(CommitPage {
        commits: page.items.into_iter().map(adapt_commit).collect(),
        next_cursor: page.next_cursor,
    })
}

pub fn repo_branches_key(repo_id: &str, limit: Option<u32>, cursor: Option<&str>) -> QueryKey {
    QueryKey::new("repo-branches")
        .text("repo_id", Some(repo_id))
        .int("limit", limit.map(i64::from))
        .text("cursor", cursor)
}

/// One page of a repository's branches.
pub async fn fetch_repo_branches(
    client: &dyn AnalyticsApi,
    token: &CancellationToken,
    repo_id: &str,
    limit: Option<u32>,
    cursor: Option<&str>,
) -> QueryResult<BranchPage> {
    let query = PageQuery {
        limit,
        cursor: cursor.map(str::to_string),
    };
    let page = super::cancellable(token, client.repo_branches(repo_id, &query)).await?;
    Ok(BranchPage {
        branches: page.items.into_iter().map(adapt_branch).collect(),
        next_cursor: page.next_cursor,
    })
}

pub(crate) fn adapt_commit(dto: CommitDto) -> Commit {
    Commit {
        sha: dto.sha,
        repo: CommitRepoRef {
            id: dto.repo.id,
            project_id: dto.repo.project_id,
            name: dto.repo.name,
        },
        author: adapt_identity(dto.author),
        committer: adapt_identity(dto.committer),
        committed_at: dto.committed_at,
        message: dto.message,
        is_merge: dto.is_merge,
        added_lines: dto.added_lines,
        deleted_lines: dto.deleted_lines,
        files_changed: dto.files_changed,
    }
}

fn adapt_identity(dto: rp_api_contract::CommitPersonDto) -> CommitIdentity {
    CommitIdentity {
        id: dto.id,
        name: dto.name,
        email: dto.email,
    }
}

fn adapt_branch(dto: BranchDto) -> Branch {
    Branch {
        id: dto.id,
        name: dto.name,
        is_default: dto.is_default,
        is_protected: dto.is_protected,
        latest_commit: dto.latest_commit.map(adapt_tip),
    }
}

fn adapt_tip(dto: BranchTipDto) -> BranchTip {
    BranchTip {
        sha: dto.sha,
        message: dto.message,
        committed_at: dto.committed_at,
        author_name: dto.author.name,
        author_email: dto.author.email,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rp_api_contract::{BranchTipAuthorDto, CommitPersonDto, CommitRepoRefDto};

    fn commit_dto(sha: &str) -> CommitDto {
        CommitDto {
            sha: sha.to_string(),
            repo: CommitRepoRefDto {
                id: "r1".to_string(),
                project_id: 1,
                name: "ingest".to_string(),
            },
            author: CommitPersonDto {
                id: "a1".to_string(),
                name: "Mara".to_string(),
                email: "mara@example.dev".to_string(),
            },
            committer: CommitPersonDto {
                id: "a1".to_string(),
                name: "Mara".to_string(),
                email: "mara@example.dev".to_string(),
            },
            committed_at: Utc.with_ymd_and_hms(2025, 3, 30, 9, 15, 0).unwrap(),
            message: "Fix cursor windowing\n\nDetails.".to_string(),
            is_merge: false,
            added_lines: 12,
            deleted_lines: 3,
            files_changed: 2,
        }
    }

    #[test]
    fn commit_adapter_maps_every_displayed_field() {
        let commit = adapt_commit(commit_dto("abcdef1234567890"));
        assert_eq!(commit.short_sha(), "abcdef1");
        assert_eq!(commit.subject(), "Fix cursor windowing");
        assert_eq!(commit.repo.name, "ingest");
        assert_eq!(commit.author.email, "mara@example.dev");
        assert_eq!(commit.churn(), 15);
    }

    #[test]
    fn branch_adapter_flattens_the_tip_author() {
        let branch = adapt_branch(BranchDto {
            id: "ingest-main".to_string(),
            name: "main".to_string(),
            is_default: true,
            is_protected: true,
            latest_commit: Some(BranchTipDto {
                sha: "abc".to_string(),
                message: "tip".to_string(),
                committed_at: Utc.with_ymd_and_hms(2025, 3, 30, 9, 15, 0).unwrap(),
                author: BranchTipAuthorDto {
                    name: "Mara".to_string(),
                    email: "mara@example.dev".to_string(),
                },
            }),
        });

        let tip = branch.latest_commit.expect("tip present");
        assert_eq!(tip.author_name, "Mara");
        assert_eq!(tip.author_email, "mara@example.dev");
    }

    #[test]
    fn after_participates_in_the_key_at_full_precision() {
        let noon = Utc.with_ymd_and_hms(2025, 3, 31, 12, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2025, 3, 31, 13, 0, 0).unwrap();
        let a = repo_commits_key("r1", Some(50), None, Some(noon));
        let b = repo_commits_key("r1", Some(50), None, Some(later));
        assert_ne!(a, b, "same-day timestamps are distinct queries");
    }
}
