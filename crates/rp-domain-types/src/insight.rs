// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Insight cards and their severity scale
//!
//! The backend labels insights with free-form severity strings that changed
//! spelling more than once. [`Severity::from_label`] folds every spelling
//! seen in the wild onto the four levels the dashboard can actually render,
//! falling back to [`Severity::Info`] for anything unrecognized.

use serde::{Deserialize, Serialize};

/// Render severity for insight and recommendation cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Success,
}

impl Severity {
    /// Map a raw backend label onto a severity, case-insensitively.
    /// Unknown or absent labels read as `Info`.
    pub fn from_label(label: Option<&str>) -> Self {
        let normalized = label.unwrap_or("").trim().to_ascii_lowercase();
        match normalized.as_str() {
            "info" | "informational" | "notice" => Severity::Info,
            "warning" | "warn" | "caution" => Severity::Warning,
            "danger" | "error" | "critical" | "severe" => Severity::Error,
            "success" | "ok" | "positive" => Severity::Success,
            _ => Severity::Info,
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Info
    }
}

/// A textual finding derived from commit history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub id: String,
    pub title: String,
    pub description: String,
    pub severity: Severity,
}
