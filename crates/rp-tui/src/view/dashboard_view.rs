// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Top-level frame layout: header, filter bar, the active tab's body and
//! the key-hint footer.

use ratatui::{prelude::*, widgets::*};

use crate::view_model::{Tab, ViewModel};

use super::commits::render_commits;
use super::developers::render_developers;
use super::filter_bar::render_filter_bar;
use super::header::render_header;
use super::insights::render_insights;
use super::overview::render_overview;
use super::Theme;

pub fn render(frame: &mut Frame, model: &ViewModel) {
    let theme = Theme::default();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.bg)),
        frame.area(),
    );

    let rows = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(frame.area());

    render_header(frame, rows[0], model, &theme);
    render_filter_bar(frame, rows[1], model, &theme);
    match model.tab {
        Tab::Overview => render_overview(frame, rows[2], model, &theme),
        Tab::Commits => render_commits(frame, rows[2], model, &theme),
        Tab::Developers => render_developers(frame, rows[2], model, &theme),
        Tab::Insights => render_insights(frame, rows[2], model, &theme),
    }
    render_footer(frame, rows[3], model, &theme);
}

fn render_footer(frame: &mut Frame, area: Rect, model: &ViewModel, theme: &Theme) {
    let hints = match model.tab {
        Tab::Overview => "q quit  Tab switch  r range  p project  R refresh",
        Tab::Commits => "q quit  ↑↓ repo  n more commits  r range  p project  R refresh",
        Tab::Developers => {
            if model.developers.profile.is_some() {
                "q quit  ]/[ commit pages  i focus insights  Esc close"
            } else {
                "q quit  ↑↓ select  Enter profile  r range  p project  R refresh"
            }
        }
        Tab::Insights => {
            if model.insights.focus.is_some() {
                "q quit  Esc clear focus  r range  R refresh"
            } else {
                "q quit  Tab switch  r range  p project  R refresh"
            }
        }
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(format!(" {hints}"), theme.muted_style()))),
        area,
    );
}
