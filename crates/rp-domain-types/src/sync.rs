// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Indexing status reported by the analytics service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of the server-side repository indexing job, polled by the
/// dashboard header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncStatus {
    pub in_progress: bool,
    pub phase: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    /// Completion in percent, when the server reports it.
    pub progress: Option<f64>,
}

impl SyncStatus {
    /// One-line rendering for the header bar.
    pub fn headline(&self) -> String {
        if self.in_progress {
            let phase = self.phase.as_deref().unwrap_or("sync");
            match self.progress {
                Some(pct) => format!("{phase} {pct:.0}%"),
                None => phase.to_string(),
            }
        } else if let Some(err) = &self.last_error {
            format!("sync failed: {err}")
        } else {
            "idle".to_string()
        }
    }
}
