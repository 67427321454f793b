// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Status-driven panel frames.
//!
//! Every data panel renders exactly one of the four query states. The
//! helper here owns the skeleton, failure and empty presentations, so the
//! per-tab modules only describe the ready case. A background refresh
//! keeps the body on screen and marks the card title instead.

use ratatui::{prelude::*, widgets::*};

use rp_core::{QueryError, ViewStatus};

use super::Theme;

/// Render one card around `status`. `ready` draws the panel body once
/// data is available.
pub fn status_panel<T, F>(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    title: &str,
    status: ViewStatus<T>,
    ready: F,
) where
    F: FnOnce(&mut Frame, Rect, &T),
{
    let refreshing = matches!(&status, ViewStatus::Ready { refreshing: true, .. });
    let full_title = if refreshing {
        format!("{title} (updating)")
    } else {
        title.to_string()
    };
    let block = theme.card_block(&full_title);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    match status {
        ViewStatus::Loading => render_skeleton(frame, inner, theme),
        ViewStatus::Failed(error) => render_failure(frame, inner, theme, &error),
        ViewStatus::Empty => render_empty(frame, inner, theme),
        ViewStatus::Ready { data, .. } => ready(frame, inner, &data),
    }
}

/// An empty card frame for panels whose inputs do not exist yet, e.g. the
/// branches panel before any repo is selected.
pub fn placeholder_panel(frame: &mut Frame, area: Rect, theme: &Theme, title: &str, hint: &str) {
    let block = theme.card_block(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(
        Paragraph::new(Span::styled(hint.to_string(), theme.muted_style())),
        inner,
    );
}

fn render_skeleton(frame: &mut Frame, area: Rect, theme: &Theme) {
    let style = Style::default().fg(theme.border);
    let lines: Vec<Line> = (0..area.height.min(4))
        .map(|row| {
            let width = if row % 2 == 0 {
                area.width
            } else {
                area.width.saturating_sub(6)
            };
            Line::from(Span::styled("▒".repeat(width as usize), style))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_failure(frame: &mut Frame, area: Rect, theme: &Theme, error: &QueryError) {
    let hint = if error.is_retryable() {
        "transient; press R to retry"
    } else {
        "press R to reload"
    };
    let lines = vec![
        Line::from(Span::styled(error.to_string(), theme.error_style())),
        Line::from(Span::styled(hint, theme.muted_style())),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn render_empty(frame: &mut Frame, area: Rect, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(Span::styled("No data in this window", theme.muted_style())),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_test_terminal;
    use std::sync::Arc;

    fn buffer_text(terminal: &ratatui::Terminal<ratatui::backend::TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn loading_renders_a_skeleton() {
        let mut terminal = create_test_terminal(30, 7);
        let theme = Theme::default();
        terminal
            .draw(|frame| {
                let area = frame.area();
                status_panel(
                    frame,
                    area,
                    &theme,
                    "Panel",
                    ViewStatus::<Vec<u32>>::Loading,
                    |_, _, _| {},
                );
            })
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Panel"));
        assert!(text.contains("▒▒▒"));
    }

    #[test]
    fn failure_renders_message_and_retry_hint() {
        let mut terminal = create_test_terminal(44, 7);
        let theme = Theme::default();
        let error = Arc::new(QueryError::Internal("boom".to_string()));
        terminal
            .draw(|frame| {
                let area = frame.area();
                status_panel(
                    frame,
                    area,
                    &theme,
                    "Panel",
                    ViewStatus::<Vec<u32>>::Failed(error),
                    |_, _, _| {},
                );
            })
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("boom"));
        assert!(text.contains("press R"));
    }

    #[test]
    fn empty_renders_the_explicit_empty_state() {
        let mut terminal = create_test_terminal(40, 7);
        let theme = Theme::default();
        terminal
            .draw(|frame| {
                let area = frame.area();
                status_panel(
                    frame,
                    area,
                    &theme,
                    "Panel",
                    ViewStatus::<Vec<u32>>::Empty,
                    |_, _, _| {},
                );
            })
            .unwrap();
        assert!(buffer_text(&terminal).contains("No data in this window"));
    }

    #[test]
    fn background_refresh_marks_the_title_and_keeps_the_body() {
        let mut terminal = create_test_terminal(44, 7);
        let theme = Theme::default();
        let status = ViewStatus::Ready {
            data: Arc::new(vec![7u32]),
            refreshing: true,
        };
        terminal
            .draw(|frame| {
                let area = frame.area();
                status_panel(frame, area, &theme, "Panel", status, |frame, inner, data| {
                    let body = format!("value {}", data[0]);
                    frame.render_widget(Paragraph::new(body), inner);
                });
            })
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("(updating)"));
        assert!(text.contains("value 7"));
    }
}
