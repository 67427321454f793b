// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! View-model layer for the dashboard.
//!
//! The view model owns every piece of dashboard state and is the only
//! layer that talks to the query orchestration in `rp-core`. Input
//! arrives as [`Msg`] values and rendering reads the model, so the whole
//! dashboard behavior can be driven in tests without a terminal.

mod dashboard_model;

pub use dashboard_model::{
    AuthorFocus, CommitsState, DevelopersState, InsightsState, ProfilePane, ViewModel,
    BRANCHES_LIMIT, DEVELOPER_COMMITS_LIMIT, LATEST_COMMITS_LIMIT, REPO_COMMITS_LIMIT,
};

use crossterm::event::KeyEvent;
use rp_core::{QueryError, QueryKey};
use rp_domain_types::Repo;

/// Everything that can happen to the dashboard.
#[derive(Debug)]
pub enum Msg {
    /// A key press from the terminal.
    Key(KeyEvent),
    /// Periodic timer, used for background polling.
    Tick,
    /// A cached query settled; the slot under `key` holds the outcome.
    QuerySettled { key: QueryKey },
    /// The repo selector finished loading repos for a project. Delivered
    /// outside the cache because the selector cancels superseded loads
    /// instead of deduplicating them.
    ReposLoaded {
        project_id: i64,
        outcome: Result<Vec<Repo>, QueryError>,
    },
}

/// Dashboard tabs in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Commits,
    Developers,
    Insights,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Overview, Tab::Commits, Tab::Developers, Tab::Insights];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Commits => "Commits",
            Tab::Developers => "Developers",
            Tab::Insights => "Insights",
        }
    }

    pub fn index(self) -> usize {
        Tab::ALL.iter().position(|tab| *tab == self).unwrap_or(0)
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn previous(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_cycle_in_both_directions() {
        assert_eq!(Tab::Overview.next(), Tab::Commits);
        assert_eq!(Tab::Insights.next(), Tab::Overview);
        assert_eq!(Tab::Overview.previous(), Tab::Insights);
        assert_eq!(Tab::Developers.previous(), Tab::Commits);
    }

    #[test]
    fn tab_indices_match_display_order() {
        for (index, tab) in Tab::ALL.iter().enumerate() {
            assert_eq!(tab.index(), index);
        }
    }
}
