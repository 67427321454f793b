// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Developer-centric domain types

use serde::{Deserialize, Serialize};

use crate::commit::CommitPage;
use crate::insight::Insight;
use crate::metrics::{ActivityKpi, DailyActivity, HourlyActivity, SizeBucket, WeekdayActivity};
use crate::percent::ShareOfTotal;

/// One row of the developers table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeveloperRow {
    pub author_id: String,
    pub name: String,
    pub email: String,
    pub commits: u64,
    pub lines: u64,
    pub share: ShareOfTotal,
}

/// The developers tab aggregate: team KPI plus the per-author table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevelopersOverview {
    pub kpi: ActivityKpi,
    pub authors: Vec<DeveloperRow>,
}

impl DevelopersOverview {
    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }
}

/// A single developer's profile pane: personal KPI, activity series and
/// the first page of their commits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeveloperProfile {
    pub kpi: ActivityKpi,
    pub daily: Vec<DailyActivity>,
    pub hourly: Vec<HourlyActivity>,
    pub weekday: Vec<WeekdayActivity>,
    pub size_histogram: Vec<SizeBucket>,
    pub latest_commits: CommitPage,
    pub recommendations: Vec<Insight>,
}

impl DeveloperProfile {
    pub fn is_empty(&self) -> bool {
        self.kpi.commits == 0 && self.latest_commits.commits.is_empty()
    }
}
