// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Domain types for the RepoPulse analytics suite
//!
//! This crate contains the core domain types that are shared across
//! different parts of the RepoPulse system: the query layer, the
//! terminal dashboard, and the adapters that translate wire payloads
//! into display-ready values.
//!
//! These types represent the business domain entities and should be
//! UI-agnostic, reusable across different contexts.

pub mod commit;
pub mod developer;
pub mod insight;
pub mod metrics;
pub mod percent;
pub mod project;
pub mod sync;

// Re-export commonly used types
pub use commit::*;
pub use developer::*;
pub use insight::*;
pub use metrics::*;
pub use percent::*;
pub use project::*;
pub use sync::*;
