// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Mock analytics client implementing the `AnalyticsApi` trait for testing
//!
//! This crate provides an in-memory implementation of the analytics API
//! that serves a deterministic fixture dataset without making network
//! calls. It is designed for testing the query layer and the dashboard
//! with realistic behavior: filters actually filter, cursors actually
//! page, and latency and failures can be injected per client.

pub mod fixtures;

pub use fixtures::FixtureDataset;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use rp_api_contract::*;
use rp_client_api::{AnalyticsApi, ClientApiError, ClientApiResult};

/// Mock client backed by [`FixtureDataset`]
#[derive(Debug, Clone)]
pub struct MockAnalyticsClient {
    dataset: Arc<RwLock<FixtureDataset>>,
    /// Configurable delay for operations (in milliseconds)
    delay_ms: u64,
    /// Whether every call should fail
    simulate_failures: bool,
    /// Number of upcoming calls that should fail before recovering
    transient_failures: Arc<RwLock<u32>>,
    /// Per-endpoint call counters, for request-deduplication assertions
    calls: Arc<RwLock<HashMap<&'static str, u64>>>,
}

impl MockAnalyticsClient {
    /// Create a new mock client serving the standard fixture dataset
    pub fn new() -> Self {
        Self::with_dataset(FixtureDataset::standard())
    }

    /// Create a mock client serving a custom dataset
    pub fn with_dataset(dataset: FixtureDataset) -> Self {
        Self {
            dataset: Arc::new(RwLock::new(dataset)),
            delay_ms: 0,
            simulate_failures: false,
            transient_failures: Arc::new(RwLock::new(0)),
            calls: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a mock client with custom delay
    pub fn with_delay(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            ..Self::new()
        }
    }

    /// Create a mock client that fails every call
    pub fn with_failures(simulate_failures: bool) -> Self {
        Self {
            simulate_failures,
            ..Self::new()
        }
    }

    /// Create a mock client whose next `count` calls fail, then recover
    pub fn with_transient_failures(count: u32) -> Self {
        let client = Self::new();
        {
            let failures = client.transient_failures.clone();
            // Constructor context, the lock is uncontended.
            if let Ok(mut slot) = failures.try_write() {
                *slot = count;
            };
        }
        client
    }

    /// Override the per-call delay on an existing client
    pub fn set_delay(&mut self, delay_ms: u64) {
        self.delay_ms = delay_ms;
    }

    /// Number of calls made against one endpoint so far
    pub async fn call_count(&self, endpoint: &str) -> u64 {
        self.calls.read().await.get(endpoint).copied().unwrap_or(0)
    }

    /// Replace the advertised sync status (for polling tests)
    pub async fn set_sync_status(&self, sync: SyncStatusDto) {
        self.dataset.write().await.sync = sync;
    }

    /// Record the call, apply latency, then apply failure injection.
    async fn begin(&self, endpoint: &'static str) -> ClientApiResult<()> {
        {
            let mut calls = self.calls.write().await;
            *calls.entry(endpoint).or_insert(0) += 1;
        }

        if self.delay_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.delay_ms)).await;
        }

        if self.simulate_failures {
            return Err(ClientApiError::Network(
                "simulated connection failure".to_string(),
            ));
        }

        let mut remaining = self.transient_failures.write().await;
        if *remaining > 0 {
            *remaining -= 1;
            return Err(ClientApiError::Network(
                "simulated transient failure".to_string(),
            ));
        }

        Ok(())
    }

    fn not_found(what: &str, id: &str) -> ClientApiError {
        ClientApiError::Http {
            status: 404,
            message: format!("{what} {id} not found"),
        }
    }
}

impl Default for MockAnalyticsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalyticsApi for MockAnalyticsClient {
    async fn metrics_summary(&self, query: &MetricsQuery) -> ClientApiResult<MetricsSummaryDto> {
        self.begin("metrics_summary").await?;
        let ds = self.dataset.read().await;
        let commits = ds.filtered_commits(
            query.since,
            query.until,
            query.project_id,
            query.repo_ids.as_deref(),
            query.author_ids.as_deref(),
        );

        let latest_limit = query.latest_limit.unwrap_or(10) as usize;
        Ok(MetricsSummaryDto {
            kpi: FixtureDataset::kpi(&commits),
            series: FixtureDataset::series(&commits),
            authors_top: FixtureDataset::authors_top(&commits),
            latest_commits: commits.iter().take(latest_limit).map(|c| (*c).clone()).collect(),
            recommendations: ds.insights.clone(),
        })
    }

    async fn timeline_summary(&self, query: &MetricsQuery) -> ClientApiResult<TimelineSummaryDto> {
        self.begin("timeline_summary").await?;
        let ds = self.dataset.read().await;
        let commits = ds.filtered_commits(
            query.since,
            query.until,
            query.project_id,
            query.repo_ids.as_deref(),
            query.author_ids.as_deref(),
        );

        Ok(TimelineSummaryDto {
            kpi: FixtureDataset::timeline_kpi(&commits),
            series: FixtureDataset::series(&commits),
        })
    }

    async fn developers_summary(
        &self,
        query: &MetricsQuery,
    ) -> ClientApiResult<DevelopersSummaryDto> {
        self.begin("developers_summary").await?;
        let ds = self.dataset.read().await;
        let commits = ds.filtered_commits(
            query.since,
            query.until,
            query.project_id,
            query.repo_ids.as_deref(),
            None,
        );

        Ok(DevelopersSummaryDto {
            kpi: FixtureDataset::kpi(&commits),
            authors: FixtureDataset::authors_top(&commits),
        })
    }

    async fn developer_profile(
        &self,
        author_id: &str,
        query: &DeveloperCommitsQuery,
    ) -> ClientApiResult<DeveloperProfileSummaryDto> {
        self.begin("developer_profile").await?;
        let ds = self.dataset.read().await;
        if !ds.commits.iter().any(|c| c.author.id == author_id) {
            return Err(Self::not_found("author", author_id));
        }

        let author_filter = [author_id.to_string()];
        let commits = ds.filtered_commits(
            query.since,
            query.until,
            query.project_id,
            query.repo_ids.as_deref(),
            Some(&author_filter),
        );

        let (items, next_cursor) = FixtureDataset::page(
            &commits,
            query.cursor.as_deref(),
            query.limit.unwrap_or(20) as usize,
        );

        Ok(DeveloperProfileSummaryDto {
            kpi: FixtureDataset::kpi(&commits),
            series: FixtureDataset::series(&commits),
            latest_commits: CursorPageDto {
                items: items.into_iter().cloned().collect(),
                next_cursor,
            },
            recommendations: ds.insights.clone(),
        })
    }

    async fn developer_commits(
        &self,
        author_id: &str,
        query: &DeveloperCommitsQuery,
    ) -> ClientApiResult<CursorPageDto<CommitDto>> {
        self.begin("developer_commits").await?;
        let ds = self.dataset.read().await;
        if !ds.commits.iter().any(|c| c.author.id == author_id) {
            return Err(Self::not_found("author", author_id));
        }

        let author_filter = [author_id.to_string()];
        let commits = ds.filtered_commits(
            query.since,
            query.until,
            query.project_id,
            query.repo_ids.as_deref(),
            Some(&author_filter),
        );

        let (items, next_cursor) = FixtureDataset::page(
            &commits,
            query.cursor.as_deref(),
            query.limit.unwrap_or(20) as usize,
        );

        Ok(CursorPageDto {
            items: items.into_iter().cloned().collect(),
            next_cursor,
        })
    }

    async fn list_projects(&self) -> ClientApiResult<Vec<ProjectDto>> {
        self.begin("list_projects").await?;
        Ok(self.dataset.read().await.projects.clone())
    }

    async fn get_project(&self, project_id: i64) -> ClientApiResult<ProjectDetailDto> {
        self.begin("get_project").await?;
        self.dataset
            .read()
            .await
            .projects
            .iter()
            .find(|p| p.id == project_id)
            .cloned()
            .ok_or_else(|| Self::not_found("project", &project_id.to_string()))
    }

    async fn list_project_repos(&self, project_id: i64) -> ClientApiResult<Vec<RepoDto>> {
        self.begin("list_project_repos").await?;
        let ds = self.dataset.read().await;
        if !ds.projects.iter().any(|p| p.id == project_id) {
            return Err(Self::not_found("project", &project_id.to_string()));
        }
        Ok(ds.repos.iter().filter(|r| r.project_id == project_id).cloned().collect())
    }

    async fn repo_commits(
        &self,
        repo_id: &str,
        query: &RepoCommitsQuery,
    ) -> ClientApiResult<CursorPageDto<CommitDto>> {
        self.begin("repo_commits").await?;
        let ds = self.dataset.read().await;
        if !ds.repos.iter().any(|r| r.id == repo_id) {
            return Err(Self::not_found("repo", repo_id));
        }

        let commits: Vec<&CommitDto> = ds
            .commits
            .iter()
            .filter(|c| c.repo.id == repo_id)
            .filter(|c| query.after.map_or(true, |after| c.committed_at > after))
            .collect();

        let (items, next_cursor) = FixtureDataset::page(
            &commits,
            query.cursor.as_deref(),
            query.limit.unwrap_or(50) as usize,
        );

        Ok(CursorPageDto {
            items: items.into_iter().cloned().collect(),
            next_cursor,
        })
    }

    async fn repo_branches(
        &self,
        repo_id: &str,
        query: &PageQuery,
    ) -> ClientApiResult<CursorPageDto<BranchDto>> {
        self.begin("repo_branches").await?;
        let ds = self.dataset.read().await;
        let branches = ds
            .branches
            .iter()
            .find(|(id, _)| id == repo_id)
            .map(|(_, branches)| branches.clone())
            .ok_or_else(|| Self::not_found("repo", repo_id))?;

        let offset = query.cursor.as_deref().and_then(|c| c.parse::<usize>().ok()).unwrap_or(0);
        let limit = query.limit.unwrap_or(50) as usize;
        let end = (offset + limit).min(branches.len());
        let next_cursor = if end < branches.len() {
            Some(end.to_string())
        } else {
            None
        };

        Ok(CursorPageDto {
            items: branches.get(offset..end).map(|s| s.to_vec()).unwrap_or_default(),
            next_cursor,
        })
    }

    async fn insights(&self, _query: &InsightsQuery) -> ClientApiResult<Vec<InsightDto>> {
        self.begin("insights").await?;
        // The fixture serves the full set; filters are accepted for
        // signature parity with the live service.
        Ok(self.dataset.read().await.insights.clone())
    }

    async fn sync_status(&self) -> ClientApiResult<SyncStatusDto> {
        self.begin("sync_status").await?;
        Ok(self.dataset.read().await.sync.clone())
    }

    fn description(&self) -> &str {
        "Mock analytics client (fixture dataset)"
    }
}
