// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! End-to-end tests of the query layer against the mock analytics client:
//! deduplication, pagination, filter resets, cancellation and polling.

use std::time::Duration;

use chrono::NaiveDate;
use tokio_util::sync::CancellationToken;

use rp_core::resources::{commits, developers, metrics, sync};
use rp_core::{PagedList, QueryCache, QueryState, SharedFilters, ViewStatus};
use rp_rest_mock_client::{FixtureDataset, MockAnalyticsClient};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Window covering the whole standard fixture history.
fn full_window() -> SharedFilters {
    SharedFilters::new(date(2025, 2, 25), date(2025, 3, 31)).expect("valid window")
}

#[tokio::test]
async fn concurrent_widgets_share_one_summary_request() {
    let client = MockAnalyticsClient::with_delay(20);
    let cache = QueryCache::with_default_staleness();
    let filters = full_window();
    let key = metrics::summary_key(&filters, None);
    let token = CancellationToken::new();

    let fetch = |value_client: MockAnalyticsClient| {
        let filters = filters.clone();
        let token = token.clone();
        move || async move {
            metrics::fetch_summary(&value_client, &token, &filters, None).await
        }
    };

    let (a, b) = tokio::join!(
        cache.fetch(&key, fetch(client.clone())),
        cache.fetch(&key, fetch(client.clone())),
    );

    assert_eq!(a.unwrap().kpi.commits, 150);
    assert_eq!(b.unwrap().kpi.commits, 150);
    assert_eq!(client.call_count("metrics_summary").await, 1);
}

#[tokio::test]
async fn paged_list_accumulates_every_commit_exactly_once() {
    // Three commits in one repo, pages of two: the exact limit-2 walk.
    let mut dataset = FixtureDataset::standard();
    let repo_id = dataset.repos[0].id.clone();
    dataset.commits.retain(|c| c.repo.id == repo_id);
    dataset.commits.truncate(3);
    let expected: Vec<String> = dataset.commits.iter().map(|c| c.sha.clone()).collect();

    let client = MockAnalyticsClient::with_dataset(dataset);
    let token = CancellationToken::new();
    let mut pager = PagedList::new();

    while pager.has_more() {
        let page = commits::fetch_repo_commits(
            &client,
            &token,
            &repo_id,
            Some(2),
            pager.request_cursor(),
            None,
        )
        .await
        .expect("page fetch");
        pager.record_page(page.commits, page.next_cursor);
    }

    assert_eq!(pager.pages_loaded(), 2, "ceil(3 / 2) fetches");
    assert_eq!(pager.len(), 3);
    let fetched: Vec<&str> = pager.items().iter().map(|c| c.sha.as_str()).collect();
    assert_eq!(fetched, expected.iter().map(String::as_str).collect::<Vec<_>>());
    assert!(!pager.has_more());
    assert_eq!(client.call_count("repo_commits").await, 2);
}

#[tokio::test]
async fn filter_change_discards_pages_from_the_old_filters() {
    let client = MockAnalyticsClient::new();
    let token = CancellationToken::new();
    let dataset = FixtureDataset::standard();
    let old_repo = dataset.repos[0].id.clone();
    let new_repo = dataset.repos[2].id.clone();

    let mut pager = PagedList::new();
    let page = commits::fetch_repo_commits(&client, &token, &old_repo, Some(5), None, None)
        .await
        .expect("first page");
    pager.record_page(page.commits, page.next_cursor);
    assert!(!pager.is_empty());

    // Selecting another repo derives a different key and resets the pager
    // before anything is fetched under the new selection.
    assert_ne!(
        commits::repo_commits_key(&old_repo, Some(5), None, None),
        commits::repo_commits_key(&new_repo, Some(5), None, None),
    );
    pager.reset();

    let page = commits::fetch_repo_commits(&client, &token, &new_repo, Some(5), None, None)
        .await
        .expect("page under new filters");
    pager.record_page(page.commits, page.next_cursor);

    assert!(pager.items().iter().all(|c| c.repo.id == new_repo));
}

#[tokio::test]
async fn empty_window_reduces_to_the_empty_state() {
    let client = MockAnalyticsClient::new();
    let token = CancellationToken::new();
    // A window after the fixture history ends: zero commits, valid reply.
    let filters = SharedFilters::new(date(2025, 6, 1), date(2025, 6, 2)).expect("valid window");

    let overview = metrics::fetch_summary(&client, &token, &filters, None)
        .await
        .expect("summary fetch");
    assert!(overview.is_empty());

    let state = QueryState {
        data: Some(std::sync::Arc::new(overview)),
        error: None,
        is_fetching: false,
    };
    assert!(matches!(
        state.status(|o| o.is_empty()),
        ViewStatus::Empty
    ));
}

#[tokio::test]
async fn cancelled_summary_fetch_never_surfaces_an_error() {
    let client = MockAnalyticsClient::with_delay(200);
    let cache = QueryCache::with_default_staleness();
    let filters = full_window();
    let key = metrics::summary_key(&filters, None);
    let token = CancellationToken::new();

    let pending = tokio::spawn({
        let client = client.clone();
        let cache = cache.clone();
        let filters = filters.clone();
        let key = key.clone();
        let token = token.clone();
        async move {
            cache
                .fetch(&key, move || async move {
                    metrics::fetch_summary(&client, &token, &filters, None).await
                })
                .await
        }
    });
    tokio::task::yield_now().await;
    token.cancel();

    let outcome = pending.await.expect("task join");
    assert!(matches!(outcome, Err(err) if err.is_cancelled()));

    let state: QueryState<rp_domain_types::MetricsOverview> = cache.snapshot(&key);
    assert!(state.error.is_none(), "cancellation must not surface");
    assert!(state.data.is_none());
    assert!(matches!(
        state.status(|o: &rp_domain_types::MetricsOverview| o.is_empty()),
        ViewStatus::Loading
    ));
}

#[tokio::test]
async fn retry_reissues_the_request_after_a_failure() {
    let client = MockAnalyticsClient::with_transient_failures(1);
    let cache = QueryCache::with_default_staleness();
    let filters = full_window();
    let key = metrics::summary_key(&filters, None);
    let token = CancellationToken::new();

    let fetch = || {
        let client = client.clone();
        let filters = filters.clone();
        let token = token.clone();
        move || async move { metrics::fetch_summary(&client, &token, &filters, None).await }
    };

    let failed = cache.fetch(&key, fetch()).await;
    assert!(failed.is_err());
    let state: QueryState<rp_domain_types::MetricsOverview> = cache.snapshot(&key);
    assert!(state.error.is_some());
    assert!(matches!(
        state.status(|o: &rp_domain_types::MetricsOverview| o.is_empty()),
        ViewStatus::Failed(_)
    ));

    let recovered = cache.fetch(&key, fetch()).await.expect("retry succeeds");
    assert_eq!(recovered.kpi.commits, 150);
    let state: QueryState<rp_domain_types::MetricsOverview> = cache.snapshot(&key);
    assert!(state.error.is_none());
    assert_eq!(client.call_count("metrics_summary").await, 2);
}

#[tokio::test]
async fn previous_page_replays_from_cache_without_a_request() {
    let client = MockAnalyticsClient::new();
    let cache = QueryCache::with_default_staleness();
    let filters = full_window();
    let token = CancellationToken::new();
    let author = "11111111-1111-4111-8111-111111111111";

    let mut history = rp_core::CursorHistory::new();

    let fetch_page = |cursor: Option<String>| {
        let client = client.clone();
        let filters = filters.clone();
        let token = token.clone();
        move || async move {
            developers::fetch_commits(
                &client,
                &token,
                author,
                &filters,
                Some(5),
                cursor.as_deref(),
            )
            .await
        }
    };

    let key1 = developers::commits_key(author, &filters, Some(5), history.current());
    let first = cache
        .fetch(&key1, fetch_page(None))
        .await
        .expect("first page");
    let first_sha = first.commits[0].sha.clone();
    let next = first.next_cursor.clone().expect("more pages exist");

    history.advance(next.clone());
    let key2 = developers::commits_key(author, &filters, Some(5), history.current());
    let second = cache
        .fetch(&key2, fetch_page(Some(next)))
        .await
        .expect("second page");
    assert_ne!(second.commits[0].sha, first_sha);

    assert!(history.back());
    let key_back = developers::commits_key(author, &filters, Some(5), history.current());
    assert_eq!(key_back, key1);
    let replayed = cache
        .fetch(&key_back, fetch_page(None))
        .await
        .expect("replayed page");
    assert_eq!(replayed.commits[0].sha, first_sha);

    assert_eq!(
        client.call_count("developer_commits").await,
        2,
        "going back replays the cached page"
    );
}

#[tokio::test(start_paused = true)]
async fn sync_status_repolls_once_per_interval() {
    let client = MockAnalyticsClient::new();
    let cache = QueryCache::with_default_staleness();
    let key = sync::sync_key();
    let token = CancellationToken::new();

    let fetch = || {
        let client = client.clone();
        let token = token.clone();
        move || async move { sync::fetch_sync_status(&client, &token).await }
    };

    let status = cache
        .fetch_with(&key, sync::SYNC_POLL_INTERVAL, fetch())
        .await
        .expect("first poll");
    assert_eq!(status.headline(), "idle");

    // A tick inside the window is served from cache.
    cache
        .fetch_with(&key, sync::SYNC_POLL_INTERVAL, fetch())
        .await
        .expect("cached poll");
    assert_eq!(client.call_count("sync_status").await, 1);

    tokio::time::advance(sync::SYNC_POLL_INTERVAL + Duration::from_secs(1)).await;
    cache
        .fetch_with(&key, sync::SYNC_POLL_INTERVAL, fetch())
        .await
        .expect("re-poll");
    assert_eq!(client.call_count("sync_status").await, 2);
}
