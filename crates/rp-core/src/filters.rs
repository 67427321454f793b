// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Page-global filter state
//!
//! One [`SharedFilters`] value lives on the page (the app model in the
//! dashboard) and every widget keys its queries from it. Widgets never own
//! private copies of the shared filters; genuinely widget-local state (a
//! chart's own range toggle, say) stays out of this type entirely. Every
//! change builds a new value, so a changed filter always derives a changed
//! cache key.

use chrono::{Duration, Local, NaiveDate};

use crate::error::QueryError;
use crate::key::QueryKey;

/// Today according to the local clock, anchored at local midnight.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Enumerated date-range choices offered by the filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangePreset {
    Days7,
    Days30,
    Days90,
    Year,
}

impl RangePreset {
    pub const ALL: [RangePreset; 4] = [
        RangePreset::Days7,
        RangePreset::Days30,
        RangePreset::Days90,
        RangePreset::Year,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RangePreset::Days7 => "7d",
            RangePreset::Days30 => "30d",
            RangePreset::Days90 => "90d",
            RangePreset::Year => "1y",
        }
    }

    fn days(&self) -> i64 {
        match self {
            RangePreset::Days7 => 7,
            RangePreset::Days30 => 30,
            RangePreset::Days90 => 90,
            RangePreset::Year => 365,
        }
    }

    /// Inclusive window ending today: a 7-day preset covers today and the
    /// six days before it.
    pub fn window(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let until = today;
        let since = until - Duration::days(self.days() - 1);
        (since, until)
    }

    /// The next preset in display order, wrapping, for cycling key binds.
    pub fn next(&self) -> Self {
        match self {
            RangePreset::Days7 => RangePreset::Days30,
            RangePreset::Days30 => RangePreset::Days90,
            RangePreset::Days90 => RangePreset::Year,
            RangePreset::Year => RangePreset::Days7,
        }
    }
}

impl Default for RangePreset {
    fn default() -> Self {
        RangePreset::Days30
    }
}

/// The canonical filter set shared by every widget on a page.
///
/// `since`/`until` are private so the `since <= until` invariant can only
/// be established through the constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedFilters {
    since: NaiveDate,
    until: NaiveDate,
    project_id: Option<i64>,
    repo_ids: Option<Vec<String>>,
    author_ids: Option<Vec<String>>,
}

impl SharedFilters {
    /// Build a filter set over an explicit window.
    pub fn new(since: NaiveDate, until: NaiveDate) -> Result<Self, QueryError> {
        if since > until {
            return Err(QueryError::InvalidWindow { since, until });
        }
        Ok(Self {
            since,
            until,
            project_id: None,
            repo_ids: None,
            author_ids: None,
        })
    }

    /// Build a filter set from a range preset. Preset windows are valid by
    /// construction.
    pub fn for_preset(preset: RangePreset, today: NaiveDate) -> Self {
        let (since, until) = preset.window(today);
        Self {
            since,
            until,
            project_id: None,
            repo_ids: None,
            author_ids: None,
        }
    }

    pub fn since(&self) -> NaiveDate {
        self.since
    }

    pub fn until(&self) -> NaiveDate {
        self.until
    }

    pub fn project_id(&self) -> Option<i64> {
        self.project_id
    }

    pub fn repo_ids(&self) -> Option<&[String]> {
        self.repo_ids.as_deref()
    }

    pub fn author_ids(&self) -> Option<&[String]> {
        self.author_ids.as_deref()
    }

    /// Replace the window, keeping the entity filters.
    pub fn with_window(self, since: NaiveDate, until: NaiveDate) -> Result<Self, QueryError> {
        if since > until {
            return Err(QueryError::InvalidWindow { since, until });
        }
        Ok(Self {
            since,
            until,
            ..self
        })
    }

    /// Re-anchor the window on a preset, keeping the entity filters.
    pub fn with_preset(self, preset: RangePreset, today: NaiveDate) -> Self {
        let (since, until) = preset.window(today);
        Self {
            since,
            until,
            ..self
        }
    }

    /// Narrow (or widen, with `None`) to one project. Repository selection
    /// is project-scoped, so it resets alongside.
    pub fn with_project(self, project_id: Option<i64>) -> Self {
        Self {
            project_id,
            repo_ids: None,
            ..self
        }
    }

    /// Narrow to a repository selection. An empty selection reads as no
    /// filter at all.
    pub fn with_repos(self, repo_ids: Option<Vec<String>>) -> Self {
        Self {
            repo_ids: repo_ids.filter(|ids| !ids.is_empty()),
            ..self
        }
    }

    /// Narrow to an author selection. An empty selection reads as no
    /// filter at all.
    pub fn with_authors(self, author_ids: Option<Vec<String>>) -> Self {
        Self {
            author_ids: author_ids.filter(|ids| !ids.is_empty()),
            ..self
        }
    }

    /// Derive the cache key for one resource under these filters.
    pub fn query_key(&self, resource: &'static str) -> QueryKey {
        QueryKey::new(resource)
            .date("since", self.since)
            .date("until", self.until)
            .int("project_id", self.project_id)
            .ids("repo_ids", self.repo_ids.as_deref())
            .ids("author_ids", self.author_ids.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn preset_windows_are_inclusive_of_today() {
        let today = date(2025, 3, 31);
        assert_eq!(
            RangePreset::Days7.window(today),
            (date(2025, 3, 25), today)
        );
        assert_eq!(
            RangePreset::Days30.window(today),
            (date(2025, 3, 2), today)
        );
        assert_eq!(RangePreset::Year.window(today), (date(2024, 4, 1), today));
    }

    #[test]
    fn inverted_window_is_rejected() {
        let result = SharedFilters::new(date(2025, 3, 31), date(2025, 3, 1));
        assert!(matches!(result, Err(QueryError::InvalidWindow { .. })));
    }

    #[test]
    fn changing_a_filter_builds_a_new_value() {
        let base = SharedFilters::for_preset(RangePreset::Days7, date(2025, 3, 31));
        let narrowed = base.clone().with_project(Some(1));

        assert_eq!(base.project_id(), None);
        assert_eq!(narrowed.project_id(), Some(1));
        assert_ne!(base.query_key("metrics"), narrowed.query_key("metrics"));
    }

    #[test]
    fn project_change_resets_repo_selection() {
        let filters = SharedFilters::for_preset(RangePreset::Days7, date(2025, 3, 31))
            .with_repos(Some(vec!["r1".to_string()]))
            .with_project(Some(2));
        assert_eq!(filters.repo_ids(), None);
    }

    #[test]
    fn empty_selection_reads_as_unfiltered() {
        let today = date(2025, 3, 31);
        let none = SharedFilters::for_preset(RangePreset::Days7, today);
        let empty = SharedFilters::for_preset(RangePreset::Days7, today).with_repos(Some(vec![]));
        assert_eq!(none.query_key("metrics"), empty.query_key("metrics"));
    }

    #[test]
    fn preset_cycling_wraps() {
        let mut preset = RangePreset::Days7;
        for _ in 0..RangePreset::ALL.len() {
            preset = preset.next();
        }
        assert_eq!(preset, RangePreset::Days7);
    }
}
