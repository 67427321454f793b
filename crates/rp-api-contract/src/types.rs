// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! API contract types for the RepoPulse analytics REST service
//!
//! Field names mirror the wire payloads (snake_case throughout). Dates in
//! query strings are date-only (`YYYY-MM-DD`); timestamps in bodies are
//! RFC 3339 and deserialize straight into `DateTime<Utc>`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One page of a cursor-paginated listing. `next_cursor` is an opaque
/// token; `None` means the listing is exhausted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorPageDto<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Person attached to a commit (author or committer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitPersonDto {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Repository reference embedded in commit payloads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRepoRefDto {
    pub id: String,
    pub project_id: i64,
    pub name: String,
}

/// A single commit with churn statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitDto {
    pub sha: String,
    pub repo: CommitRepoRefDto,
    pub author: CommitPersonDto,
    pub committer: CommitPersonDto,
    pub committed_at: DateTime<Utc>,
    pub message: String,
    pub is_merge: bool,
    pub added_lines: u64,
    pub deleted_lines: u64,
    pub files_changed: u32,
}

/// A tracked project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDto {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    pub is_public: bool,
    pub repo_count: u32,
    #[serde(default)]
    pub last_activity_at: Option<DateTime<Utc>>,
}

/// Project detail payload (same shape as the listing entry)
pub type ProjectDetailDto = ProjectDto;

/// A repository inside a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoDto {
    pub id: String,
    pub project_id: i64,
    pub name: String,
    pub default_branch: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Tip commit of a branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchTipDto {
    pub sha: String,
    pub message: String,
    pub committed_at: DateTime<Utc>,
    pub author: BranchTipAuthorDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchTipAuthorDto {
    pub name: String,
    pub email: String,
}

/// A branch of a repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchDto {
    pub id: String,
    pub name: String,
    pub is_default: bool,
    pub is_protected: bool,
    #[serde(default)]
    pub latest_commit: Option<BranchTipDto>,
}

/// Mean/median commit size aggregate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AvgCommitSizeDto {
    pub mean: f64,
    pub median: f64,
}

/// Commit message quality aggregate. `short_pct` may arrive as a fraction
/// in [0, 1] or as percentage points; adapters normalize it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MsgQualityDto {
    pub avg_length: f64,
    pub short_pct: f64,
}

/// Headline KPI block shared by the metrics and developers summaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsKpiDto {
    pub commits: u64,
    pub active_devs: u64,
    pub active_repos: u64,
    pub avg_commit_size: AvgCommitSizeDto,
    pub msg_quality: MsgQualityDto,
}

/// One day of commit counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCommitPointDto {
    pub date: NaiveDate,
    pub count: u64,
}

/// Commit distribution for one hour of the day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyCommitPointDto {
    pub hour: u8,
    pub commits: u64,
    pub share_pct: f64,
    pub lines_added: u64,
    pub lines_deleted: u64,
}

/// Commit distribution for one weekday (0 = Monday)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayCommitPointDto {
    pub weekday: u8,
    pub commits: u64,
    pub share_pct: f64,
}

/// One bucket of the commit size histogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeHistogramBucketDto {
    pub bucket: String,
    pub count: u64,
}

/// Activity series shared by the metrics, timeline and developer summaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSeriesDto {
    pub commits_daily: Vec<DailyCommitPointDto>,
    pub by_hour: Vec<HourlyCommitPointDto>,
    pub by_weekday: Vec<WeekdayCommitPointDto>,
    pub size_hist: Vec<SizeHistogramBucketDto>,
}

/// Per-author contribution row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorSummaryDto {
    pub author_id: String,
    pub commits: u64,
    pub lines: u64,
    pub share_pct: f64,
    pub git_name: String,
    pub git_email: String,
}

/// A textual finding derived from commit history. Severity labels are
/// free-form on the wire; adapters fold them onto a fixed scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightDto {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub severity: Option<String>,
}

/// Recommendations embedded in summary payloads share the insight shape
pub type RecommendationDto = InsightDto;

/// Aggregate metrics for the overview dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummaryDto {
    pub kpi: MetricsKpiDto,
    pub series: MetricsSeriesDto,
    pub authors_top: Vec<AuthorSummaryDto>,
    pub latest_commits: Vec<CommitDto>,
    pub recommendations: Vec<RecommendationDto>,
}

/// Timeline KPI block: the overview KPI plus peak markers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineKpiDto {
    pub commits: u64,
    pub active_devs: u64,
    pub active_repos: u64,
    pub avg_commit_size: AvgCommitSizeDto,
    pub msg_quality: MsgQualityDto,
    #[serde(default)]
    pub peak_day: Option<NaiveDate>,
    #[serde(default)]
    pub peak_hour: Option<u8>,
    #[serde(default)]
    pub offhours_pct: Option<f64>,
}

/// Aggregate metrics for the timeline view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSummaryDto {
    pub kpi: TimelineKpiDto,
    pub series: MetricsSeriesDto,
}

/// Team-wide developers summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevelopersSummaryDto {
    pub kpi: MetricsKpiDto,
    pub authors: Vec<AuthorSummaryDto>,
}

/// Single-developer profile summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeveloperProfileSummaryDto {
    pub kpi: MetricsKpiDto,
    pub series: MetricsSeriesDto,
    pub latest_commits: CursorPageDto<CommitDto>,
    pub recommendations: Vec<RecommendationDto>,
}

/// Server-side repository indexing status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncStatusDto {
    pub in_progress: bool,
    #[serde(default)]
    pub phase: Option<String>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_error: Option<String>,
    #[serde(default)]
    pub progress: Option<f64>,
}

// Query parameter structs. Optional fields are skipped entirely when
// absent, so the client never sends `param=null` or empty id lists.

/// Filter window shared by the summary endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct MetricsQuery {
    pub since: NaiveDate,
    pub until: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 100))]
    pub latest_limit: Option<u32>,
}

/// Query parameters for a developer's paginated commits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct DeveloperCommitsQuery {
    pub since: NaiveDate,
    pub until: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// Query parameters for a repository's commit listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RepoCommitsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 500))]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Only commits strictly newer than this instant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<DateTime<Utc>>,
}

/// Plain cursor/limit pagination (branch listings)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 500))]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// Query parameters for the insights listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct InsightsQuery {
    pub since: NaiveDate,
    pub until: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_ids: Option<Vec<String>>,
}

impl InsightsQuery {
    /// Fold a single author filter into the id list, deduplicating.
    pub fn merge_author_id(&mut self, author_id: &str) {
        let ids = self.author_ids.get_or_insert_with(Vec::new);
        if !ids.iter().any(|id| id == author_id) {
            ids.push(author_id.to_string());
        }
    }
}
