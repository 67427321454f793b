// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Terminal User Interface for RepoPulse
//!
//! This crate provides a Ratatui-based dashboard over the query
//! orchestration layer: tabbed analytics views backed by the shared
//! query cache, with keyboard-driven filtering and cursor pagination.

pub mod dashboard_loop;
pub mod settings;
pub mod terminal;
pub mod view;
pub mod view_model;

pub use dashboard_loop::run_dashboard;
pub use settings::Settings;
pub use view::{Theme, TuiDependencies};
pub use view_model::{Msg, Tab, ViewModel};

use ratatui::{Terminal, backend::TestBackend};

/// Helpers for tests/runners to render with a deterministic backend
pub fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("test terminal")
}
