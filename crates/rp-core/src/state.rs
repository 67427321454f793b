// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Query state snapshots and the status reducer
//!
//! Every widget renders exactly one of four mutually exclusive states,
//! selected by [`QueryState::status`] in a fixed precedence order:
//! loading, then error, then empty, then ready. A refetch keeps existing
//! data visible and only raises the `refreshing` flag; a retry after a
//! failure renders as loading again even though the old error is still
//! recorded in the slot.

use std::sync::Arc;

use crate::error::QueryError;

/// Snapshot of one cache slot as seen by a consumer.
#[derive(Debug)]
pub struct QueryState<T> {
    /// Most recently fetched value, if any. Survives failed refreshes.
    pub data: Option<Arc<T>>,
    /// Most recent fetch failure. Cleared by the next success, and never
    /// set by a cancelled fetch.
    pub error: Option<Arc<QueryError>>,
    /// A fetch for this key is currently in flight.
    pub is_fetching: bool,
}

impl<T> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            error: self.error.clone(),
            is_fetching: self.is_fetching,
        }
    }
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            is_fetching: false,
        }
    }
}

impl<T> QueryState<T> {
    /// Initial load: nothing to show yet. True both while the first fetch
    /// is in flight and before it has been started.
    pub fn is_loading(&self) -> bool {
        self.data.is_none() && (self.is_fetching || self.error.is_none())
    }

    /// Reduce to the single state a consumer must render. `is_empty`
    /// decides whether present data counts as an empty result, which is a
    /// distinct state from loading.
    pub fn status<F>(&self, is_empty: F) -> ViewStatus<T>
    where
        F: FnOnce(&T) -> bool,
    {
        if self.is_loading() {
            return ViewStatus::Loading;
        }
        if let Some(error) = &self.error {
            return ViewStatus::Failed(error.clone());
        }
        match &self.data {
            Some(data) if is_empty(data) => ViewStatus::Empty,
            Some(data) => ViewStatus::Ready {
                data: data.clone(),
                refreshing: self.is_fetching,
            },
            // Not loading and no error implies data, but stay total.
            None => ViewStatus::Loading,
        }
    }
}

/// The four render states of spec'd status-driven rendering, plus the
/// background-refresh marker on the ready state.
#[derive(Debug, Clone)]
pub enum ViewStatus<T> {
    /// First fetch still outstanding: render a skeleton.
    Loading,
    /// Fetch failed: render the message and a retry action.
    Failed(Arc<QueryError>),
    /// Fetch succeeded but adapted to zero items: render the explicit
    /// empty-state message, never a spinner.
    Empty,
    /// Real content. `refreshing` marks a non-blocking background
    /// revalidation of data that stays visible.
    Ready { data: Arc<T>, refreshing: bool },
}

impl<T> ViewStatus<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, ViewStatus::Ready { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rp_client_api::ClientApiError;

    fn failed(message: &str) -> Arc<QueryError> {
        Arc::new(QueryError::Api(ClientApiError::Network(message.to_string())))
    }

    fn never_empty(_: &Vec<u32>) -> bool {
        false
    }

    #[test]
    fn initial_state_is_loading() {
        let state: QueryState<Vec<u32>> = QueryState::default();
        assert!(matches!(state.status(never_empty), ViewStatus::Loading));
    }

    #[test]
    fn loading_wins_over_a_previous_error() {
        // Retry in flight: the stale error must not surface.
        let state: QueryState<Vec<u32>> = QueryState {
            data: None,
            error: Some(failed("boom")),
            is_fetching: true,
        };
        assert!(state.is_loading());
        assert!(matches!(state.status(never_empty), ViewStatus::Loading));
    }

    #[test]
    fn error_without_data_renders_failed() {
        let state: QueryState<Vec<u32>> = QueryState {
            data: None,
            error: Some(failed("boom")),
            is_fetching: false,
        };
        assert!(matches!(state.status(never_empty), ViewStatus::Failed(_)));
    }

    #[test]
    fn error_takes_precedence_over_stale_data() {
        let state = QueryState {
            data: Some(Arc::new(vec![1u32])),
            error: Some(failed("boom")),
            is_fetching: false,
        };
        assert!(matches!(state.status(never_empty), ViewStatus::Failed(_)));
    }

    #[test]
    fn empty_data_is_empty_not_loading() {
        let state = QueryState {
            data: Some(Arc::new(Vec::<u32>::new())),
            error: None,
            is_fetching: false,
        };
        assert!(matches!(
            state.status(|items: &Vec<u32>| items.is_empty()),
            ViewStatus::Empty
        ));
    }

    #[test]
    fn refetch_keeps_data_and_raises_refreshing() {
        let state = QueryState {
            data: Some(Arc::new(vec![1u32, 2])),
            error: None,
            is_fetching: true,
        };
        match state.status(never_empty) {
            ViewStatus::Ready { data, refreshing } => {
                assert_eq!(*data, vec![1, 2]);
                assert!(refreshing);
            }
            other => panic!("expected Ready, got {other:?}"),
        }
    }
}
