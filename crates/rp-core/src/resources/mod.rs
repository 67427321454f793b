// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Per-resource fetch pipelines
//!
//! One module per analytics resource, each with the same three pieces:
//! a key function deriving the resource's [`QueryKey`](crate::key::QueryKey)
//! from the shared filters, a fetch function that issues the client call
//! under the caller's cancellation token, and a pure adapter from wire
//! DTOs to the domain types the dashboard renders. Adapters never touch
//! the network and never panic on expected shapes; a genuinely malformed
//! payload surfaces as a decode error through the query error path.

pub mod commits;
pub mod developers;
pub mod insights;
pub mod metrics;
pub mod projects;
pub mod sync;
pub mod timeline;

use std::future::Future;

use tokio_util::sync::CancellationToken;

use rp_api_contract::MetricsQuery;
use rp_client_api::ClientApiResult;

use crate::error::QueryError;
use crate::filters::SharedFilters;

/// Race a client call against the caller's cancellation token. A fired
/// token yields [`QueryError::Cancelled`], which the cache and the status
/// reducer treat as a non-event rather than a failure.
pub async fn cancellable<T>(
    token: &CancellationToken,
    call: impl Future<Output = ClientApiResult<T>>,
) -> Result<T, QueryError> {
    tokio::select! {
        _ = token.cancelled() => Err(QueryError::Cancelled),
        outcome = call => outcome.map_err(QueryError::from),
    }
}

/// Request parameters shared by the summary endpoints.
pub(crate) fn metrics_query(filters: &SharedFilters, latest_limit: Option<u32>) -> MetricsQuery {
    MetricsQuery {
        since: filters.since(),
        until: filters.until(),
        project_id: filters.project_id(),
        repo_ids: filters.repo_ids().map(<[String]>::to_vec),
        author_ids: filters.author_ids().map(<[String]>::to_vec),
        latest_limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::RangePreset;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn cancellable_resolves_the_call_when_idle() {
        let token = CancellationToken::new();
        let result = cancellable(&token, async { Ok(5u32) }).await;
        assert_eq!(result.unwrap(), 5);
    }

    #[tokio::test]
    async fn fired_token_cancels_a_pending_call() {
        let token = CancellationToken::new();
        token.cancel();
        let result: Result<u32, _> =
            cancellable(&token, futures::future::pending::<ClientApiResult<u32>>()).await;
        assert!(matches!(result, Err(QueryError::Cancelled)));
    }

    #[test]
    fn metrics_query_mirrors_the_filter_values() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        let filters = SharedFilters::for_preset(RangePreset::Days7, today)
            .with_project(Some(3))
            .with_repos(Some(vec!["r1".to_string()]));

        let query = metrics_query(&filters, Some(10));
        assert_eq!(query.since, NaiveDate::from_ymd_opt(2025, 3, 25).unwrap());
        assert_eq!(query.until, today);
        assert_eq!(query.project_id, Some(3));
        assert_eq!(query.repo_ids.as_deref(), Some(["r1".to_string()].as_slice()));
        assert_eq!(query.author_ids, None);
        assert_eq!(query.latest_limit, Some(10));
    }
}
