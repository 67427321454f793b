// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Commits tab: project scope, repository selector, branches and the
//! cursor-paged commit listing.

use ratatui::{prelude::*, widgets::*};

use rp_domain_types::{BranchPage, Project};

use crate::view_model::ViewModel;

use super::status::{placeholder_panel, status_panel};
use super::Theme;

pub fn render_commits(frame: &mut Frame, area: Rect, model: &ViewModel, theme: &Theme) {
    let columns = Layout::horizontal([Constraint::Percentage(34), Constraint::Percentage(66)])
        .split(area);
    render_scope_column(frame, columns[0], model, theme);
    render_commit_list(frame, columns[1], model, theme);
}

fn render_scope_column(frame: &mut Frame, area: Rect, model: &ViewModel, theme: &Theme) {
    let rows = Layout::vertical([
        Constraint::Length(5),
        Constraint::Min(0),
        Constraint::Length(9),
    ])
    .split(area);

    render_project_panel(frame, rows[0], model, theme);
    render_repo_selector(frame, rows[1], model, theme);
    render_branches(frame, rows[2], model, theme);
}

fn render_project_panel(frame: &mut Frame, area: Rect, model: &ViewModel, theme: &Theme) {
    let Some(key) = model.project_detail_key() else {
        placeholder_panel(frame, area, theme, "Project", "all projects; press p to scope");
        return;
    };
    let status = model.snapshot::<Project>(&key).status(|_| false);
    status_panel(frame, area, theme, "Project", status, |frame, inner, project| {
        let visibility = if project.is_public { "public" } else { "private" };
        let lines = vec![
            Line::from(Span::styled(
                project.name.clone(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("{} repos, {visibility}", project.repo_count),
                theme.muted_style(),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    });
}

fn render_repo_selector(frame: &mut Frame, area: Rect, model: &ViewModel, theme: &Theme) {
    if model.filters.project_id().is_none() {
        placeholder_panel(
            frame,
            area,
            theme,
            "Repositories",
            "scoped listing needs a project",
        );
        return;
    }
    let status = model.commits.repos.status(|repos| repos.is_empty());
    let selected = model.commits.selected_repo;
    status_panel(frame, area, theme, "Repositories", status, |frame, inner, repos| {
        let items: Vec<ListItem> = repos
            .iter()
            .enumerate()
            .map(|(index, repo)| {
                let style = if index == selected {
                    theme.focused_style()
                } else {
                    theme.text_style()
                };
                let marker = if index == selected { "▸ " } else { "  " };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, theme.primary_style()),
                    Span::styled(repo.name.clone(), style),
                ]))
            })
            .collect();
        frame.render_widget(List::new(items), inner);
    });
}

fn render_branches(frame: &mut Frame, area: Rect, model: &ViewModel, theme: &Theme) {
    let Some(key) = model.branches_key() else {
        placeholder_panel(frame, area, theme, "Branches", "select a repository");
        return;
    };
    let status = model
        .snapshot::<BranchPage>(&key)
        .status(|page| page.branches.is_empty());
    status_panel(frame, area, theme, "Branches", status, |frame, inner, page| {
        let items: Vec<ListItem> = page
            .branches
            .iter()
            .map(|branch| {
                let mut spans = vec![Span::styled(branch.name.clone(), theme.text_style())];
                if branch.is_default {
                    spans.push(Span::styled(" default", theme.success_style()));
                }
                if branch.is_protected {
                    spans.push(Span::styled(" protected", theme.warning_style()));
                }
                if let Some(tip) = &branch.latest_commit {
                    let sha = tip.sha.get(..7).unwrap_or(&tip.sha);
                    spans.push(Span::styled(
                        format!("  {sha} {}", tip.author_name),
                        theme.muted_style(),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();
        frame.render_widget(List::new(items), inner);
    });
}

fn render_commit_list(frame: &mut Frame, area: Rect, model: &ViewModel, theme: &Theme) {
    let Some(repo) = model.selected_repo() else {
        placeholder_panel(frame, area, theme, "Commits", "select a repository");
        return;
    };
    let title = format!("Commits in {}", repo.name);
    let status = model.repo_commits_status();
    let list = &model.commits.list;
    let footer = if list.has_more() {
        format!(
            "page {}, {} commits loaded, n loads more",
            list.pages_loaded(),
            list.len()
        )
    } else {
        format!("all {} commits loaded", list.len())
    };
    status_panel(frame, area, theme, &title, status, |frame, inner, commits| {
        let rows = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(inner);
        let table_rows: Vec<Row> = commits
            .iter()
            .map(|commit| {
                let subject = if commit.is_merge {
                    format!("⇵ {}", commit.subject())
                } else {
                    commit.subject().to_string()
                };
                Row::new(vec![
                    Cell::from(commit.short_sha().to_string()).style(theme.primary_style()),
                    Cell::from(commit.committed_at.format("%m-%d %H:%M").to_string())
                        .style(theme.muted_style()),
                    Cell::from(commit.author.name.clone()).style(theme.text_style()),
                    Cell::from(subject).style(theme.text_style()),
                    Cell::from(Line::from(vec![
                        Span::styled(format!("+{}", commit.added_lines), theme.success_style()),
                        Span::raw(" "),
                        Span::styled(format!("-{}", commit.deleted_lines), theme.error_style()),
                    ])),
                ])
            })
            .collect();
        let table = Table::new(
            table_rows,
            [
                Constraint::Length(8),
                Constraint::Length(12),
                Constraint::Length(14),
                Constraint::Min(20),
                Constraint::Length(12),
            ],
        )
        .header(
            Row::new(vec!["sha", "when", "author", "subject", "churn"])
                .style(theme.muted_style()),
        );
        frame.render_widget(table, rows[0]);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(footer, theme.muted_style()))),
            rows[1],
        );
    });
}
