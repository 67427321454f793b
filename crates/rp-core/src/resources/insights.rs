// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Insight cards

use tokio_util::sync::CancellationToken;

use rp_api_contract::{InsightDto, InsightsQuery};
use rp_client_api::AnalyticsApi;
use rp_domain_types::{Insight, Severity};

use crate::error::QueryResult;
use crate::filters::SharedFilters;
use crate::key::QueryKey;

/// The key reflects the effective request: a focused author is merged
/// into the author filter before either is derived.
pub fn insights_key(filters: &SharedFilters, focus_author: Option<&str>) -> QueryKey {
    let query = insights_query(filters, focus_author);
    QueryKey::new("insights")
        .date("since", query.since)
        .date("until", query.until)
        .int("project_id", query.project_id)
        .ids("repo_ids", query.repo_ids.as_deref())
        .ids("author_ids", query.author_ids.as_deref())
}

/// Insight cards for the filtered window, optionally focused on one
/// author in addition to the shared author filter.
pub async fn fetch_insights(
    client: &dyn AnalyticsApi,
    token: &CancellationToken,
    filters: &SharedFilters,
    focus_author: Option<&str>,
) -> QueryResult<Vec<Insight>> {
    let query = insights_query(filters, focus_author);
    let dtos = super::cancellable(token, client.insights(&query)).await?;
    Ok(dtos.into_iter().map(adapt_insight).collect())
}

fn insights_query(filters: &SharedFilters, focus_author: Option<&str>) -> InsightsQuery {
    let mut query = InsightsQuery {
        since: filters.since(),
        until: filters.until(),
        project_id: filters.project_id(),
        repo_ids: filters.repo_ids().map(<[String]>::to_vec),
        author_ids: filters.author_ids().map(<[String]>::to_vec),
    };
    if let Some(author_id) = focus_author {
        query.merge_author_id(author_id);
    }
    query
}

pub(crate) fn adapt_insight(dto: InsightDto) -> Insight {
    Insight {
        id: dto.id,
        title: dto.title,
        description: dto.description,
        severity: Severity::from_label(dto.severity.as_deref()),
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
    fn focused_author_merges_into_the_author_filter() {
        let query = insights_query(
            &filters().with_authors(Some(vec!["a1".to_string()])),
            Some("a2"),
        );
        assert_eq!(
            query.author_ids.as_deref(),
            Some(["a1".to_string(), "a2".to_string()].as_slice())
        );
    }

    #[test]
    fn focusing_an_already_filtered_author_changes_nothing() {
        let base = insights_key(&filters().with_authors(Some(vec!["a1".to_string()])), None);
        let focused = insights_key(&filters().with_authors(Some(vec!["a1".to_string()])), Some("a1"));
        assert_eq!(base, focused);
    }

    #[test]
    fn unknown_severity_labels_fall_back_to_info() {
        let insight = adapt_insight(InsightDto {
            id: "i1".to_string(),
            title: "Review load is concentrated".to_string(),
            description: "One author produced most changes.".to_string(),
            severity: Some("elevated".to_string()),
        });
        assert_eq!(insight.severity, Severity::Info);

        let positive = adapt_insight(InsightDto {
            id: "i2".to_string(),
            title: "Messages improving".to_string(),
            description: "Short-message share dropped.".to_string(),
            severity: Some("positive".to_string()),
        });
        assert_eq!(positive.severity, Severity::Success);
    }
}
