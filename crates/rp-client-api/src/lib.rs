// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Client-side abstraction over the analytics REST API
//!
//! The query layer and the terminal dashboard are written against the
//! [`AnalyticsApi`] trait rather than a concrete HTTP client. Two
//! implementations exist: the reqwest-based client in `rp-rest-client`
//! and the in-memory fixture client in `rp-rest-mock-client` used by
//! tests. Keeping the trait in its own crate lets consumers swap the
//! transport without pulling HTTP dependencies into their builds.

use async_trait::async_trait;
use thiserror::Error;

use rp_api_contract::{
    BranchDto, CommitDto, CursorPageDto, DeveloperCommitsQuery, DeveloperProfileSummaryDto,
    DevelopersSummaryDto, InsightDto, InsightsQuery, MetricsQuery, MetricsSummaryDto, PageQuery,
    ProblemDetails, ProjectDetailDto, ProjectDto, RepoCommitsQuery, RepoDto, SyncStatusDto,
    TimelineSummaryDto,
};

/// Errors surfaced by any `AnalyticsApi` implementation
#[derive(Debug, Clone, Error)]
pub enum ClientApiError {
    /// The server answered with a structured problem+json body.
    #[error("API error {status}: {problem:?}")]
    Api { status: u16, problem: ProblemDetails },

    /// Non-2xx response whose body was not a problem document.
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// Connection-level failure before any response arrived.
    #[error("Network error: {0}")]
    Network(String),

    /// The response body did not match the contract types.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Request parameters failed contract validation locally.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The caller abandoned the request before it finished. Query state
    /// treats this as a non-event: no error surfaces, no data is cleared.
    #[error("Request cancelled")]
    Cancelled,

    /// Catch-all for implementation-specific failures.
    #[error("Client error: {0}")]
    Internal(String),
}

impl ClientApiError {
    /// True when retrying the identical request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientApiError::Network(_) => true,
            ClientApiError::Http { status, .. } | ClientApiError::Api { status, .. } => {
                *status >= 500 || *status == 429
            }
            _ => false,
        }
    }
}

pub type ClientApiResult<T> = Result<T, ClientApiError>;

/// Read-only surface of the analytics service
///
/// One method per endpoint. Every method issues a single GET and decodes
/// the typed payload; pagination and caching live in `rp-core`, never in
/// implementations of this trait.
#[async_trait]
pub trait AnalyticsApi: Send + Sync {
    /// Aggregate metrics for the overview dashboard.
    async fn metrics_summary(&self, query: &MetricsQuery) -> ClientApiResult<MetricsSummaryDto>;

    /// Timeline aggregate with peak-day/peak-hour markers.
    async fn timeline_summary(&self, query: &MetricsQuery) -> ClientApiResult<TimelineSummaryDto>;

    /// Team-wide developer contribution summary.
    async fn developers_summary(
        &self,
        query: &MetricsQuery,
    ) -> ClientApiResult<DevelopersSummaryDto>;

    /// Profile summary for a single developer.
    async fn developer_profile(
        &self,
        author_id: &str,
        query: &DeveloperCommitsQuery,
    ) -> ClientApiResult<DeveloperProfileSummaryDto>;

    /// Cursor-paginated commits authored by one developer.
    async fn developer_commits(
        &self,
        author_id: &str,
        query: &DeveloperCommitsQuery,
    ) -> ClientApiResult<CursorPageDto<CommitDto>>;

    /// All projects visible to the caller.
    async fn list_projects(&self) -> ClientApiResult<Vec<ProjectDto>>;

    /// Detail payload for one project.
    async fn get_project(&self, project_id: i64) -> ClientApiResult<ProjectDetailDto>;

    /// Repositories belonging to one project.
    async fn list_project_repos(&self, project_id: i64) -> ClientApiResult<Vec<RepoDto>>;

    /// Cursor-paginated commits of a repository.
    async fn repo_commits(
        &self,
        repo_id: &str,
        query: &RepoCommitsQuery,
    ) -> ClientApiResult<CursorPageDto<CommitDto>>;

    /// Cursor-paginated branches of a repository.
    async fn repo_branches(
        &self,
        repo_id: &str,
        query: &PageQuery,
    ) -> ClientApiResult<CursorPageDto<BranchDto>>;

    /// Insight cards for the filtered window.
    async fn insights(&self, query: &InsightsQuery) -> ClientApiResult<Vec<InsightDto>>;

    /// Current state of the server-side indexing job.
    async fn sync_status(&self) -> ClientApiResult<SyncStatusDto>;

    /// Human-readable description of this client, for logs.
    fn description(&self) -> &str;
}
