// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Query orchestration for the RepoPulse dashboard.
//!
//! This crate is the layer between the analytics API client and the UI:
//! it derives canonical cache keys from filter state, deduplicates and
//! revalidates fetches through an explicit query cache, adapts wire DTOs
//! into domain view models, tracks cursor pagination, and reduces query
//! state to the single status a widget must render.

pub mod cache;
pub mod error;
pub mod filters;
pub mod key;
pub mod pager;
pub mod resources;
pub mod state;

/// Deduplicated, revalidating query cache with explicit lifecycle.
pub use cache::{QueryCache, DEFAULT_STALE_AFTER};

/// Error type surfaced through query state.
pub use error::{QueryError, QueryResult};

/// Page-global filter state and the range presets that anchor it.
pub use filters::{today_local, RangePreset, SharedFilters};

/// Canonical cache keys and their parameter values.
pub use key::{DateInput, ParamValue, QueryKey};

/// Pagination state machines: accumulated lists and cursor trails.
pub use pager::{CursorHistory, PagedList};

/// Query snapshots and the four-state status reducer.
pub use state::{QueryState, ViewStatus};

/// Cancellation-aware wrapper around client calls.
pub use resources::cancellable;
