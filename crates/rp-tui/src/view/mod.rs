// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! View Layer - Pure Rendering and Presentation
//!
//! This module turns [`ViewModel`](crate::view_model::ViewModel) state into
//! ratatui widgets. It is the last step of the MVVM pipeline and carries no
//! behavior of its own.
//!
//! ## What Belongs Here:
//!
//! ✅ **Rendering Logic**: widget creation and layout
//! ✅ **Visual Styling**: colors, borders, spacing
//! ✅ **Status Presentation**: the loading/failed/empty/ready frames around data
//!
//! ## What Does NOT Belong Here:
//!
//! ❌ **Business Logic**: state changes, query scheduling
//! ❌ **UI Events**: key handling lives in the view model
//! ❌ **UI State**: selection and pagination live in the view model
//!
//! Render functions take the model by shared reference and are
//! deterministic, so every screen can be asserted against a
//! `ratatui::backend::TestBackend` buffer.

use ratatui::{prelude::*, widgets::*};

use rp_client_api::AnalyticsApi;
use rp_core::{QueryCache, RangePreset};
use rp_domain_types::Severity;
use std::sync::Arc;

/// TUI dependencies that are injected
pub struct TuiDependencies {
    pub client: Arc<dyn AnalyticsApi>,
    pub cache: QueryCache,
    /// Range preset the dashboard opens with.
    pub initial_preset: RangePreset,
}

pub mod commits; // Commits tab rendering components
pub mod dashboard_view; // Dashboard layout and footer
pub mod developers; // Developers tab rendering components
pub mod filter_bar; // Filter bar rendering components
pub mod header; // Header rendering components
pub mod insights; // Insights tab rendering components
pub mod overview; // Overview tab rendering components
pub mod status; // Status-driven panel frames

pub use dashboard_view::render;

/// Charm-inspired theme with cohesive colors and styling
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub surface: Color,
    pub text: Color,
    pub muted: Color,
    pub primary: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            // Dark theme inspired by Catppuccin Mocha with Charm aesthetics
            bg: Color::Rgb(17, 17, 27),                // Base background
            surface: Color::Rgb(24, 24, 37),           // Card/surface background
            text: Color::Rgb(205, 214, 244),           // Main text
            muted: Color::Rgb(127, 132, 156),          // Secondary text
            primary: Color::Rgb(137, 180, 250),        // Blue for primary actions
            accent: Color::Rgb(166, 218, 149),         // Green for success/accent
            success: Color::Rgb(166, 218, 149),        // Green
            warning: Color::Rgb(250, 179, 135),        // Orange/yellow
            error: Color::Rgb(243, 139, 168),          // Red/pink
            border: Color::Rgb(69, 71, 90),            // Border color
            border_focused: Color::Rgb(137, 180, 250), // Focused border color
        }
    }
}

impl Theme {
    /// Create a card block with Charm-style rounded borders and padding
    pub fn card_block(&self, title: &str) -> Block<'_> {
        let title_line = Line::from(vec![
            Span::raw("┤").fg(self.border),
            Span::raw(format!(" {} ", title))
                .style(Style::default().fg(self.text).add_modifier(Modifier::BOLD)),
            Span::raw("├").fg(self.border),
        ]);

        Block::default()
            .title(title_line)
            .title_alignment(ratatui::layout::Alignment::Left)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.border))
            .padding(Padding::new(1, 1, 1, 1))
            .style(Style::default().bg(self.bg))
    }

    /// Style for primary elements
    pub fn primary_style(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    /// Style for focused elements
    pub fn focused_style(&self) -> Style {
        Style::default().fg(self.bg).bg(self.primary).add_modifier(Modifier::BOLD)
    }

    /// Style for text elements
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// Style for muted elements
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Style for success elements
    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    /// Style for warning elements
    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    /// Style for error elements
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Marker style for an insight severity
    pub fn severity_style(&self, severity: Severity) -> Style {
        let color = match severity {
            Severity::Info => self.primary,
            Severity::Warning => self.warning,
            Severity::Error => self.error,
            Severity::Success => self.success,
        };
        Style::default().fg(color)
    }
}
