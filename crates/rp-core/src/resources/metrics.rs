// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Overview metrics summary
//!
//! The shared series and KPI adapters live here; the timeline and
//! developer modules reuse them for their slices of the same shapes.

use tokio_util::sync::CancellationToken;

use rp_api_contract::{
    AuthorSummaryDto, DailyCommitPointDto, HourlyCommitPointDto, MetricsKpiDto, MetricsSummaryDto,
    SizeHistogramBucketDto, WeekdayCommitPointDto,
};
use rp_client_api::AnalyticsApi;
use rp_domain_types::{
    ActivityKpi, AuthorShare, DailyActivity, HourlyActivity, MessageQuality, MetricsOverview,
    ShareOfTotal, SizeBucket, SizeStats, WeekdayActivity,
};

use crate::error::QueryResult;
use crate::filters::SharedFilters;
use crate::key::QueryKey;

pub fn summary_key(filters: &SharedFilters, latest_limit: Option<u32>) -> QueryKey {
    filters
        .query_key("metrics-summary")
        .int("latest_limit", latest_limit.map(i64::from))
}

/// Aggregate metrics for the overview tab.
pub async fn fetch_summary(
    client: &dyn AnalyticsApi,
    token: &CancellationToken,
    filters: &SharedFilters,
    latest_limit: Option<u32>,
) -> QueryResult<MetricsOverview> {
    let query = super::metrics_query(filters, latest_limit);
    let dto = super::cancellable(token, client.metrics_summary(&query)).await?;
    Ok(adapt_summary(dto))
}

fn adapt_summary(dto: MetricsSummaryDto) -> MetricsOverview {
    MetricsOverview {
        kpi: adapt_kpi(dto.kpi),
        daily: dto.series.commits_daily.into_iter().map(adapt_daily).collect(),
        hourly: dto.series.by_hour.into_iter().map(adapt_hourly).collect(),
        weekday: dto.series.by_weekday.into_iter().map(adapt_weekday).collect(),
        size_histogram: dto.series.size_hist.into_iter().map(adapt_bucket).collect(),
        top_authors: dto.authors_top.into_iter().map(adapt_author).collect(),
        latest_commits: dto
            .latest_commits
            .into_iter()
            .map(super::commits::adapt_commit)
            .collect(),
        recommendations: dto
            .recommendations
            .into_iter()
            .map(super::insights::adapt_insight)
            .collect(),
    }
}

pub(crate) fn adapt_kpi(dto: MetricsKpiDto) -> ActivityKpi {
    ActivityKpi {
        commits: dto.commits,
        active_devs: dto.active_devs,
        active_repos: dto.active_repos,
        avg_commit_size: SizeStats {
            mean: dto.avg_commit_size.mean,
            median: dto.avg_commit_size.median,
        },
        message_quality: MessageQuality {
            avg_length: dto.msg_quality.avg_length,
            short_share: ShareOfTotal::from_raw(dto.msg_quality.short_pct),
        },
    }
}

pub(crate) fn adapt_daily(dto: DailyCommitPointDto) -> DailyActivity {
    DailyActivity {
        date: dto.date,
        count: dto.count,
    }
}

pub(crate) fn adapt_hourly(dto: HourlyCommitPointDto) -> HourlyActivity {
    HourlyActivity {
        hour: dto.hour,
        commits: dto.commits,
        share: ShareOfTotal::from_raw(dto.share_pct),
        lines_added: dto.lines_added,
        lines_deleted: dto.lines_deleted,
    }
}

pub(crate) fn adapt_weekday(dto: WeekdayCommitPointDto) -> WeekdayActivity {
    WeekdayActivity {
        weekday: dto.weekday,
        commits: dto.commits,
        share: ShareOfTotal::from_raw(dto.share_pct),
    }
}

pub(crate) fn adapt_bucket(dto: SizeHistogramBucketDto) -> SizeBucket {
    SizeBucket {
        bucket: dto.bucket,
        count: dto.count,
    }
}

pub(crate) fn adapt_author(dto: AuthorSummaryDto) -> AuthorShare {
    AuthorShare {
        author_id: dto.author_id,
        name: dto.git_name,
        email: dto.git_email,
        commits: dto.commits,
        lines: dto.lines,
        share: ShareOfTotal::from_raw(dto.share_pct),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rp_api_contract::{AvgCommitSizeDto, MsgQualityDto};

    fn kpi_dto(short_pct: f64) -> MetricsKpiDto {
        MetricsKpiDto {
            commits: 150,
            active_devs: 4,
            active_repos: 3,
            avg_commit_size: AvgCommitSizeDto {
                mean: 96.5,
                median: 80.0,
            },
            msg_quality: MsgQualityDto {
                avg_length: 31.0,
                short_pct,
            },
        }
    }

    #[test]
    fn fraction_and_point_percentages_converge() {
        // The backend emits shares in both forms; both must display the
        // same way after adaptation.
        let from_fraction = adapt_kpi(kpi_dto(0.42));
        let from_points = adapt_kpi(kpi_dto(42.0));

        assert_eq!(from_fraction.message_quality.short_share.display(), "42%");
        assert_eq!(from_points.message_quality.short_share.display(), "42%");
    }

    #[test]
    fn author_share_normalizes_like_every_other_share() {
        let row = adapt_author(AuthorSummaryDto {
            author_id: "a1".to_string(),
            commits: 63,
            lines: 900,
            share_pct: 0.42,
            git_name: "Mara".to_string(),
            git_email: "mara@example.dev".to_string(),
        });
        assert_eq!(row.share.display(), "42%");
        assert_eq!(row.name, "Mara");
    }

    #[test]
    fn kpi_adapter_carries_size_stats_through() {
        let kpi = adapt_kpi(kpi_dto(0.1));
        assert_eq!(kpi.avg_commit_size.mean, 96.5);
        assert_eq!(kpi.avg_commit_size.median, 80.0);
        assert_eq!(kpi.commits, 150);
    }
}
