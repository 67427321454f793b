//! Validation helpers for API contract types

use crate::error::ApiContractError;
use crate::types::*;
use chrono::NaiveDate;
use validator::Validate;

/// Validate an ordered date window
pub fn validate_date_window(since: NaiveDate, until: NaiveDate) -> Result<(), ApiContractError> {
    if since > until {
        return Err(ApiContractError::InvalidDateWindow { since, until });
    }
    Ok(())
}

/// Validate a metrics/timeline filter query
pub fn validate_metrics_query(query: &MetricsQuery) -> Result<(), ApiContractError> {
    query.validate()?;
    validate_date_window(query.since, query.until)
}

/// Validate a developer commits query
pub fn validate_developer_commits_query(
    query: &DeveloperCommitsQuery,
) -> Result<(), ApiContractError> {
    query.validate()?;
    validate_date_window(query.since, query.until)
}

/// Validate a repository commits query
pub fn validate_repo_commits_query(query: &RepoCommitsQuery) -> Result<(), ApiContractError> {
    query.validate()?;
    Ok(())
}

/// Validate an insights filter query
pub fn validate_insights_query(query: &InsightsQuery) -> Result<(), ApiContractError> {
    query.validate()?;
    validate_date_window(query.since, query.until)
}

/// Validate UUID format for repo/author identifiers
pub fn validate_uuid(uuid_str: &str) -> Result<(), ApiContractError> {
    uuid::Uuid::parse_str(uuid_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn base_query() -> MetricsQuery {
        MetricsQuery {
            since: date(2025, 3, 1),
            until: date(2025, 3, 31),
            project_id: None,
            repo_ids: None,
            author_ids: None,
            latest_limit: None,
        }
    }

    #[test]
    fn ordered_window_passes() {
        assert!(validate_metrics_query(&base_query()).is_ok());
    }

    #[test]
    fn single_day_window_passes() {
        let mut query = base_query();
        query.until = query.since;
        assert!(validate_metrics_query(&query).is_ok());
    }

    #[test]
    fn inverted_window_is_rejected() {
        let mut query = base_query();
        query.since = date(2025, 4, 1);
        let err = validate_metrics_query(&query).unwrap_err();
        assert!(matches!(err, ApiContractError::InvalidDateWindow { .. }));
    }

    #[test]
    fn latest_limit_bounds_are_enforced() {
        let mut query = base_query();
        query.latest_limit = Some(0);
        assert!(validate_metrics_query(&query).is_err());

        query.latest_limit = Some(101);
        assert!(validate_metrics_query(&query).is_err());

        query.latest_limit = Some(20);
        assert!(validate_metrics_query(&query).is_ok());
    }

    #[test]
    fn repo_commits_limit_allows_larger_pages() {
        let query = RepoCommitsQuery {
            limit: Some(500),
            cursor: None,
            after: None,
        };
        assert!(validate_repo_commits_query(&query).is_ok());

        let query = RepoCommitsQuery {
            limit: Some(501),
            cursor: None,
            after: None,
        };
        assert!(validate_repo_commits_query(&query).is_err());
    }

    #[test]
    fn merge_author_id_deduplicates() {
        let mut query = InsightsQuery {
            since: date(2025, 3, 1),
            until: date(2025, 3, 31),
            project_id: None,
            repo_ids: None,
            author_ids: Some(vec!["a1".to_string()]),
        };
        query.merge_author_id("a1");
        query.merge_author_id("a2");
        assert_eq!(query.author_ids, Some(vec!["a1".into(), "a2".into()]));
    }

    #[test]
    fn optional_params_are_omitted_from_serialization() {
        let value = serde_json::to_value(base_query()).unwrap();
        let map = value.as_object().unwrap();
        assert!(map.contains_key("since"));
        assert!(!map.contains_key("project_id"));
        assert!(!map.contains_key("repo_ids"));
        assert_eq!(map["since"], serde_json::json!("2025-03-01"));
    }
}
