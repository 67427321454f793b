// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Header: product name, tab bar and the polled sync status.

use ratatui::{prelude::*, widgets::*};

use rp_domain_types::SyncStatus;

use crate::view_model::{Tab, ViewModel};

use super::Theme;

pub fn render_header(frame: &mut Frame, area: Rect, model: &ViewModel, theme: &Theme) {
    let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);
    let columns =
        Layout::horizontal([Constraint::Length(12), Constraint::Min(0)]).split(rows[0]);

    frame.render_widget(
        Paragraph::new(Span::styled(" RepoPulse", theme.primary_style())),
        columns[0],
    );

    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| Line::from(format!(" {} ", tab.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(model.tab.index())
        .style(theme.muted_style())
        .highlight_style(theme.focused_style())
        .divider(Span::styled("│", Style::default().fg(theme.border)));
    frame.render_widget(tabs, columns[1]);

    frame.render_widget(
        Paragraph::new(sync_line(model, theme)).alignment(Alignment::Right),
        rows[1],
    );
}

/// Header sync indicator, fed by the background poll. Shown muted until
/// the first poll lands so the header never blocks on the network.
fn sync_line(model: &ViewModel, theme: &Theme) -> Line<'static> {
    let state = model.snapshot::<SyncStatus>(&model.sync_key());
    match state.data {
        Some(status) => {
            let style = if status.in_progress {
                theme.warning_style()
            } else if status.last_error.is_some() {
                theme.error_style()
            } else {
                theme.success_style()
            };
            Line::from(vec![
                Span::styled("● ", style),
                Span::styled(status.headline(), theme.muted_style()),
                Span::raw(" "),
            ])
        }
        None => Line::from(vec![
            Span::styled("○ ", theme.muted_style()),
            Span::styled("sync status pending", theme.muted_style()),
            Span::raw(" "),
        ]),
    }
}
