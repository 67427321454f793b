// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Timeline summary with peak-day and peak-hour markers

use tokio_util::sync::CancellationToken;

use rp_api_contract::TimelineSummaryDto;
use rp_client_api::AnalyticsApi;
use rp_domain_types::{ShareOfTotal, TimelineKpi, TimelineOverview};

use crate::error::QueryResult;
use crate::filters::SharedFilters;
use crate::key::QueryKey;

pub fn timeline_key(filters: &SharedFilters) -> QueryKey {
    filters.query_key("timeline-summary")
}

/// Timeline aggregate for the filtered window.
pub async fn fetch_timeline(
    client: &dyn AnalyticsApi,
    token: &CancellationToken,
    filters: &SharedFilters,
) -> QueryResult<TimelineOverview> {
    let query = super::metrics_query(filters, None);
    let dto = super::cancellable(token, client.timeline_summary(&query)).await?;
    Ok(adapt_timeline(dto))
}

fn adapt_timeline(dto: TimelineSummaryDto) -> TimelineOverview {
    TimelineOverview {
        kpi: TimelineKpi {
            commits: dto.kpi.commits,
            peak_day: dto.kpi.peak_day,
            peak_hour: dto.kpi.peak_hour,
            offhours_share: dto.kpi.offhours_pct.map(ShareOfTotal::from_raw),
        },
        daily: dto.series.commits_daily.into_iter().map(super::metrics::adapt_daily).collect(),
        hourly: dto.series.by_hour.into_iter().map(super::metrics::adapt_hourly).collect(),
        weekday: dto
            .series
            .by_weekday
            .into_iter()
            .map(super::metrics::adapt_weekday)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rp_api_contract::{
        AvgCommitSizeDto, MetricsSeriesDto, MsgQualityDto, TimelineKpiDto,
    };

    #[test]
    fn timeline_adapter_keeps_peaks_and_normalizes_offhours() {
        let dto = TimelineSummaryDto {
            kpi: TimelineKpiDto {
                commits: 42,
                active_devs: 3,
                active_repos: 2,
                avg_commit_size: AvgCommitSizeDto {
                    mean: 10.0,
                    median: 8.0,
                },
                msg_quality: MsgQualityDto {
                    avg_length: 28.0,
                    short_pct: 0.1,
                },
                peak_day: NaiveDate::from_ymd_opt(2025, 3, 28),
                peak_hour: Some(14),
                offhours_pct: Some(0.25),
            },
            series: MetricsSeriesDto {
                commits_daily: vec![],
                by_hour: vec![],
                by_weekday: vec![],
                size_hist: vec![],
            },
        };

        let overview = adapt_timeline(dto);
        assert_eq!(overview.kpi.peak_hour, Some(14));
        assert_eq!(overview.kpi.peak_day, NaiveDate::from_ymd_opt(2025, 3, 28));
        assert_eq!(
            overview.kpi.offhours_share.map(|s| s.display()),
            Some("25%".to_string())
        );
        assert!(!overview.is_empty());
    }
}
