// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Team summary, developer profiles and their paginated commits

use tokio_util::sync::CancellationToken;

use rp_api_contract::{DeveloperCommitsQuery, DeveloperProfileSummaryDto, DevelopersSummaryDto};
use rp_client_api::AnalyticsApi;
use rp_domain_types::{
    AuthorShare, CommitPage, DeveloperProfile, DeveloperRow, DevelopersOverview,
};

use crate::error::QueryResult;
use crate::filters::SharedFilters;
use crate::key::QueryKey;

/// The team endpoint ignores author filters, so the key omits them too:
/// focusing a developer must not re-fetch the whole table.
pub fn team_key(filters: &SharedFilters) -> QueryKey {
    filters.clone().with_authors(None).query_key("developers-summary")
}

/// Team-wide developer contribution table.
pub async fn fetch_team(
    client: &dyn AnalyticsApi,
    token: &CancellationToken,
    filters: &SharedFilters,
) -> QueryResult<DevelopersOverview> {
    let mut query = super::metrics_query(filters, None);
    query.author_ids = None;
    let dto = super::cancellable(token, client.developers_summary(&query)).await?;
    Ok(adapt_team(dto))
}

pub fn profile_key(
    author_id: &str,
    filters: &SharedFilters,
    limit: Option<u32>,
    cursor: Option<&str>,
) -> QueryKey {
    scoped_key("developer-profile", author_id, filters, limit, cursor)
}

/// Profile pane for one developer, including the first page of commits.
pub async fn fetch_profile(
    client: &dyn AnalyticsApi,
    token: &CancellationToken,
    author_id: &str,
    filters: &SharedFilters,
    limit: Option<u32>,
    cursor: Option<&str>,
) -> QueryResult<DeveloperProfile> {
    let query = commits_query(filters, limit, cursor);
    let dto = super::cancellable(token, client.developer_profile(author_id, &query)).await?;
    Ok(adapt_profile(dto))
}

pub fn commits_key(
    author_id: &str,
    filters: &SharedFilters,
    limit: Option<u32>,
    cursor: Option<&str>,
) -> QueryKey {
    scoped_key("developer-commits", author_id, filters, limit, cursor)
}

/// One page of a developer's commits.
pub async fn fetch_commits(
    client: &dyn AnalyticsApi,
    token: &CancellationToken,
    author_id: &str,
    filters: &SharedFilters,
    limit: Option<u32>,
    cursor: Option<&str>,
) -> QueryResult<CommitPage> {
    let query = commits_query(filters, limit, cursor);
    let page = super::cancellable(token, client.developer_commits(author_id, &query)).await?;
    Ok(CommitPage {
        commits: page.items.into_iter().map(super::commits::adapt_commit).collect(),
        next_cursor: page.next_cursor,
    })
}

fn scoped_key(
    resource: &'static str,
    author_id: &str,
    filters: &SharedFilters,
    limit: Option<u32>,
    cursor: Option<&str>,
) -> QueryKey {
    filters
        .clone()
        .with_authors(None)
        .query_key(resource)
        .text("author_id", Some(author_id))
        .int("limit", limit.map(i64::from))
        .text("cursor", cursor)
}

fn commits_query(
    filters: &SharedFilters,
    limit: Option<u32>,
    cursor: Option<&str>,
) -> DeveloperCommitsQuery {
    DeveloperCommitsQuery {
        since: filters.since(),
        until: filters.until(),
        project_id: filters.project_id(),
        repo_ids: filters.repo_ids().map(<[String]>::to_vec),
        limit,
        cursor: cursor.map(str::to_string),
    }
}

fn adapt_team(dto: DevelopersSummaryDto) -> DevelopersOverview {
    DevelopersOverview {
        kpi: super::metrics::adapt_kpi(dto.kpi),
        authors: dto.authors.into_iter().map(adapt_row).collect(),
    }
}

fn adapt_row(dto: rp_api_contract::AuthorSummaryDto) -> DeveloperRow {
    let AuthorShare {
        author_id,
        name,
        email,
        commits,
        lines,
        share,
    } = super::metrics::adapt_author(dto);
    DeveloperRow {
        author_id,
        name,
        email,
        commits,
        lines,
        share,
    }
}

fn adapt_profile(dto: DeveloperProfileSummaryDto) -> DeveloperProfile {
    DeveloperProfile {
        kpi: super::metrics::adapt_kpi(dto.kpi),
        daily: dto.series.commits_daily.into_iter().map(super::metrics::adapt_daily).collect(),
        hourly: dto.series.by_hour.into_iter().map(super::metrics::adapt_hourly).collect(),
        weekday: dto
            .series
            .by_weekday
            .into_iter()
            .map(super::metrics::adapt_weekday)
            .collect(),
        size_histogram: dto
            .series
            .size_hist
            .into_iter()
            .map(super::metrics::adapt_bucket)
            .collect(),
        latest_commits: CommitPage {
            commits: dto
                .latest_commits
                .items
                .into_iter()
                .map(super::commits::adapt_commit)
                .collect(),
            next_cursor: dto.latest_commits.next_cursor,
        },
        recommendations: dto
            .recommendations
            .into_iter()
            .map(super::insights::adapt_insight)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::RangePreset;
    use chrono::NaiveDate;

    fn filters() -> SharedFilters {
        SharedFilters::for_preset(RangePreset::Days30, NaiveDate::from_ymd_opt(2025, 3, 31).unwrap())
    }

    #[test]
    fn team_key_ignores_author_focus() {
        let plain = team_key(&filters());
        let focused = team_key(&filters().with_authors(Some(vec!["a1".to_string()])));
        assert_eq!(plain, focused);
    }

    #[test]
    fn commit_pages_key_on_their_cursor() {
        let first = commits_key("a1", &filters(), Some(20), None);
        let second = commits_key("a1", &filters(), Some(20), Some("20"));
        assert_ne!(first, second);
    }

    #[test]
    fn profile_and_commit_listings_are_separate_resources() {
        let profile = profile_key("a1", &filters(), Some(20), None);
        let commits = commits_key("a1", &filters(), Some(20), None);
        assert_ne!(profile, commits);
    }
}
