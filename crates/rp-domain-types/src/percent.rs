// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Percentage values normalized at the adapter boundary
//!
//! Backend aggregates report shares inconsistently: some endpoints emit
//! fractions in `[0, 1]`, others emit preformatted percentages. All such
//! values pass through [`ShareOfTotal::from_raw`] exactly once, so the rest
//! of the system only ever sees percentage points.

use serde::{Deserialize, Serialize};

/// A share of some total, stored in percentage points (42.0 == 42%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareOfTotal(f64);

impl ShareOfTotal {
    /// Normalize a raw backend value. Values at or below 1 are treated as
    /// fractions and scaled by 100; larger values are taken as already being
    /// percentage points. A fraction of exactly 1.0 therefore reads as 100%.
    pub fn from_raw(value: f64) -> Self {
        if value.is_finite() && value <= 1.0 {
            Self(value * 100.0)
        } else {
            Self(value)
        }
    }

    /// Construct from a value already expressed in percentage points.
    pub fn from_points(points: f64) -> Self {
        Self(points)
    }

    pub fn points(&self) -> f64 {
        self.0
    }

    /// Rounded integer rendering, e.g. "42%". Non-finite input renders as
    /// a placeholder rather than propagating NaN into the UI.
    pub fn display(&self) -> String {
        if self.0.is_finite() {
            format!("{}%", self.0.round() as i64)
        } else {
            "--".to_string()
        }
    }
}

impl std::fmt::Display for ShareOfTotal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}
