// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Server-side indexing status, polled by the dashboard header

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use rp_api_contract::SyncStatusDto;
use rp_client_api::AnalyticsApi;
use rp_domain_types::SyncStatus;

use crate::error::QueryResult;
use crate::key::QueryKey;

/// Poll cadence for the indexing status. Passed to the cache as the
/// staleness window, so a timer tick inside the window is a no-op.
pub const SYNC_POLL_INTERVAL: Duration = Duration::from_secs(5);

pub fn sync_key() -> QueryKey {
    QueryKey::new("sync-status")
}

/// Current state of the server-side indexing job.
pub async fn fetch_sync_status(
    client: &dyn AnalyticsApi,
    token: &CancellationToken,
) -> QueryResult<SyncStatus> {
    let dto = super::cancellable(token, client.sync_status()).await?;
    Ok(adapt_sync(dto))
}

fn adapt_sync(dto: SyncStatusDto) -> SyncStatus {
    SyncStatus {
        in_progress: dto.in_progress,
        phase: dto.phase,
        started_at: dto.started_at,
        finished_at: dto.finished_at,
        last_error: dto.last_error,
        progress: dto.progress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_preserves_the_progress_fields() {
        let status = adapt_sync(SyncStatusDto {
            in_progress: true,
            phase: Some("indexing".to_string()),
            started_at: None,
            finished_at: None,
            last_error: None,
            progress: Some(40.0),
        });
        assert_eq!(status.headline(), "indexing 40%");
    }
}
