// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Developers tab: team-wide contribution table plus the per-author
//! profile pane with its cursor-backed commit history.

use ratatui::{prelude::*, widgets::*};

use rp_domain_types::{CommitPage, DeveloperProfile, DevelopersOverview};

use crate::view_model::{ProfilePane, ViewModel};

use super::status::status_panel;
use super::Theme;

pub fn render_developers(frame: &mut Frame, area: Rect, model: &ViewModel, theme: &Theme) {
    match &model.developers.profile {
        None => render_team_table(frame, area, model, theme, true),
        Some(pane) => {
            let columns =
                Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                    .split(area);
            render_team_table(frame, columns[0], model, theme, false);
            render_profile_pane(frame, columns[1], model, pane, theme);
        }
    }
}

fn render_team_table(
    frame: &mut Frame,
    area: Rect,
    model: &ViewModel,
    theme: &Theme,
    highlight: bool,
) {
    let status = model
        .snapshot::<DevelopersOverview>(&model.team_key())
        .status(DevelopersOverview::is_empty);
    let selected = model.developers.selected;
    status_panel(frame, area, theme, "Team", status, |frame, inner, team| {
        let rows: Vec<Row> = team
            .authors
            .iter()
            .enumerate()
            .map(|(index, author)| {
                let style = if highlight && index == selected {
                    theme.focused_style()
                } else {
                    theme.text_style()
                };
                Row::new(vec![
                    Cell::from(author.name.clone()).style(style),
                    Cell::from(author.email.clone()).style(theme.muted_style()),
                    Cell::from(author.commits.to_string()).style(theme.text_style()),
                    Cell::from(author.lines.to_string()).style(theme.muted_style()),
                    Cell::from(author.share.to_string()).style(theme.muted_style()),
                ])
            })
            .collect();
        let table = Table::new(
            rows,
            [
                Constraint::Min(14),
                Constraint::Min(18),
                Constraint::Length(8),
                Constraint::Length(9),
                Constraint::Length(6),
            ],
        )
        .header(
            Row::new(vec!["author", "email", "commits", "lines", "share"])
                .style(theme.muted_style()),
        );
        frame.render_widget(table, inner);
    });
}

fn render_profile_pane(
    frame: &mut Frame,
    area: Rect,
    model: &ViewModel,
    pane: &ProfilePane,
    theme: &Theme,
) {
    let rows = Layout::vertical([Constraint::Length(8), Constraint::Min(0)]).split(area);
    render_profile_summary(frame, rows[0], model, pane, theme);
    render_profile_commits(frame, rows[1], model, pane, theme);
}

fn render_profile_summary(
    frame: &mut Frame,
    area: Rect,
    model: &ViewModel,
    pane: &ProfilePane,
    theme: &Theme,
) {
    let Some(key) = model.profile_key() else {
        return;
    };
    let status = model
        .snapshot::<DeveloperProfile>(&key)
        .status(DeveloperProfile::is_empty);
    status_panel(
        frame,
        area,
        theme,
        &pane.author_name,
        status,
        |frame, inner, profile| {
            let kpi = &profile.kpi;
            let busiest = profile
                .weekday
                .iter()
                .max_by_key(|day| day.commits)
                .map(|day| day.label().to_string())
                .unwrap_or_else(|| "--".to_string());
            let lines = vec![
                summary_line(theme, "Commits  ", kpi.commits.to_string()),
                summary_line(
                    theme,
                    "Avg size ",
                    format!(
                        "{:.0} lines (median {:.0})",
                        kpi.avg_commit_size.mean, kpi.avg_commit_size.median
                    ),
                ),
                summary_line(
                    theme,
                    "Messages ",
                    format!(
                        "{:.0} chars avg, {} short",
                        kpi.message_quality.avg_length, kpi.message_quality.short_share
                    ),
                ),
                summary_line(theme, "Busiest  ", busiest),
            ];
            frame.render_widget(Paragraph::new(lines), inner);
        },
    );
}

fn summary_line(theme: &Theme, label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}  "), theme.muted_style()),
        Span::styled(value, theme.text_style()),
    ])
}

fn render_profile_commits(
    frame: &mut Frame,
    area: Rect,
    model: &ViewModel,
    pane: &ProfilePane,
    theme: &Theme,
) {
    let Some(key) = model.developer_commits_key() else {
        return;
    };
    let title = format!("Commits (page {})", pane.history.page_number());
    let can_go_back = pane.history.can_go_back();
    let status = model
        .snapshot::<CommitPage>(&key)
        .status(|page| page.commits.is_empty());
    status_panel(frame, area, theme, &title, status, |frame, inner, page| {
        let rows = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(inner);
        let items: Vec<ListItem> = page
            .commits
            .iter()
            .map(|commit| {
                ListItem::new(Line::from(vec![
                    Span::styled(commit.short_sha().to_string(), theme.primary_style()),
                    Span::raw(" "),
                    Span::styled(
                        commit.committed_at.format("%m-%d").to_string(),
                        theme.muted_style(),
                    ),
                    Span::raw(" "),
                    Span::styled(commit.subject().to_string(), theme.text_style()),
                    Span::styled(format!("  {}", commit.repo.name), theme.muted_style()),
                ]))
            })
            .collect();
        frame.render_widget(List::new(items), rows[0]);

        let mut hints = Vec::new();
        if page.has_next() {
            hints.push("] next page");
        }
        if can_go_back {
            hints.push("[ previous page");
        }
        hints.push("i focus insights");
        hints.push("Esc close");
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                hints.join("  "),
                theme.muted_style(),
            ))),
            rows[1],
        );
    });
}
