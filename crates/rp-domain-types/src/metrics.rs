// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Aggregated activity metrics for the overview dashboard

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::commit::Commit;
use crate::insight::Insight;
use crate::percent::ShareOfTotal;

/// Mean/median pair for commit size stats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeStats {
    pub mean: f64,
    pub median: f64,
}

/// Commit message quality aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MessageQuality {
    pub avg_length: f64,
    pub short_share: ShareOfTotal,
}

/// Headline numbers shown as KPI cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityKpi {
    pub commits: u64,
    pub active_devs: u64,
    pub active_repos: u64,
    pub avg_commit_size: SizeStats,
    pub message_quality: MessageQuality,
}

/// One day of commit activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub count: u64,
}

/// Commit distribution for one hour of the day (0..=23).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyActivity {
    pub hour: u8,
    pub commits: u64,
    pub share: ShareOfTotal,
    pub lines_added: u64,
    pub lines_deleted: u64,
}

/// Commit distribution for one weekday, 0 = Monday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayActivity {
    pub weekday: u8,
    pub commits: u64,
    pub share: ShareOfTotal,
}

impl WeekdayActivity {
    pub fn label(&self) -> &'static str {
        match self.weekday {
            0 => "Mon",
            1 => "Tue",
            2 => "Wed",
            3 => "Thu",
            4 => "Fri",
            5 => "Sat",
            6 => "Sun",
            _ => "?",
        }
    }
}

/// One bucket of the commit-size histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeBucket {
    pub bucket: String,
    pub count: u64,
}

/// Per-author contribution share within the filtered window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorShare {
    pub author_id: String,
    pub name: String,
    pub email: String,
    pub commits: u64,
    pub lines: u64,
    pub share: ShareOfTotal,
}

/// Everything the overview tab renders, adapted from one summary response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsOverview {
    pub kpi: ActivityKpi,
    pub daily: Vec<DailyActivity>,
    pub hourly: Vec<HourlyActivity>,
    pub weekday: Vec<WeekdayActivity>,
    pub size_histogram: Vec<SizeBucket>,
    pub top_authors: Vec<AuthorShare>,
    pub latest_commits: Vec<Commit>,
    pub recommendations: Vec<Insight>,
}

impl MetricsOverview {
    /// Emptiness test used by the status reducer: a summary with zero
    /// commits and no series points renders the explicit empty state.
    pub fn is_empty(&self) -> bool {
        self.kpi.commits == 0 && self.daily.is_empty() && self.latest_commits.is_empty()
    }
}

/// Timeline KPI extends the overview KPI with peak markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineKpi {
    pub commits: u64,
    pub peak_day: Option<NaiveDate>,
    pub peak_hour: Option<u8>,
    pub offhours_share: Option<ShareOfTotal>,
}

/// The timeline tab's aggregate: peaks plus the same activity series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineOverview {
    pub kpi: TimelineKpi,
    pub daily: Vec<DailyActivity>,
    pub hourly: Vec<HourlyActivity>,
    pub weekday: Vec<WeekdayActivity>,
}

impl TimelineOverview {
    pub fn is_empty(&self) -> bool {
        self.kpi.commits == 0 && self.daily.is_empty()
    }
}
