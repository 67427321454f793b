// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Overview tab: KPI cards, activity charts and the highlight columns.
//!
//! Everything here renders from two cached queries: the metrics summary
//! and the timeline aggregate that contributes the peaks panel.

use ratatui::{prelude::*, widgets::*};

use rp_core::ViewStatus;
use rp_domain_types::{ActivityKpi, MetricsOverview, TimelineOverview};

use crate::view_model::ViewModel;

use super::status::status_panel;
use super::Theme;

pub fn render_overview(frame: &mut Frame, area: Rect, model: &ViewModel, theme: &Theme) {
    let summary = model
        .snapshot::<MetricsOverview>(&model.summary_key())
        .status(MetricsOverview::is_empty);
    let timeline = model
        .snapshot::<TimelineOverview>(&model.timeline_key())
        .status(TimelineOverview::is_empty);

    let rows = Layout::vertical([
        Constraint::Length(6),
        Constraint::Length(9),
        Constraint::Min(0),
    ])
    .split(area);

    render_kpi_row(frame, rows[0], theme, &summary);
    render_chart_row(frame, rows[1], theme, &summary, &timeline);
    render_detail_row(frame, rows[2], theme, &summary);
}

fn render_kpi_row(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    summary: &ViewStatus<MetricsOverview>,
) {
    let cards = Layout::horizontal([Constraint::Ratio(1, 5); 5]).split(area);
    kpi_card(frame, cards[0], theme, "Commits", summary, |kpi| {
        (kpi.commits.to_string(), "in window".to_string())
    });
    kpi_card(frame, cards[1], theme, "Active devs", summary, |kpi| {
        (kpi.active_devs.to_string(), "authors".to_string())
    });
    kpi_card(frame, cards[2], theme, "Active repos", summary, |kpi| {
        (kpi.active_repos.to_string(), "repositories".to_string())
    });
    kpi_card(frame, cards[3], theme, "Avg size", summary, |kpi| {
        (
            format!("{:.0} lines", kpi.avg_commit_size.mean),
            format!("median {:.0}", kpi.avg_commit_size.median),
        )
    });
    kpi_card(frame, cards[4], theme, "Messages", summary, |kpi| {
        (
            format!("{:.0} chars", kpi.message_quality.avg_length),
            format!("{} short", kpi.message_quality.short_share),
        )
    });
}

fn kpi_card(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    title: &str,
    summary: &ViewStatus<MetricsOverview>,
    value: impl FnOnce(&ActivityKpi) -> (String, String),
) {
    status_panel(frame, area, theme, title, summary.clone(), move |frame, inner, data| {
        let (value, detail) = value(&data.kpi);
        let lines = vec![
            Line::from(Span::styled(
                value,
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(detail, theme.muted_style())),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    });
}

fn render_chart_row(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    summary: &ViewStatus<MetricsOverview>,
    timeline: &ViewStatus<TimelineOverview>,
) {
    let columns = Layout::horizontal([
        Constraint::Percentage(30),
        Constraint::Percentage(25),
        Constraint::Percentage(20),
        Constraint::Percentage(25),
    ])
    .split(area);

    status_panel(
        frame,
        columns[0],
        theme,
        "Daily activity",
        summary.clone(),
        |frame, inner, data| {
            let counts: Vec<u64> = data.daily.iter().map(|day| day.count).collect();
            let spark = Sparkline::default()
                .data(&counts)
                .style(Style::default().fg(theme.primary));
            frame.render_widget(spark, inner);
        },
    );

    status_panel(
        frame,
        columns[1],
        theme,
        "By hour",
        summary.clone(),
        |frame, inner, data| {
            let labels: Vec<String> =
                data.hourly.iter().map(|hour| format!("{:02}", hour.hour)).collect();
            let bars: Vec<(&str, u64)> = labels
                .iter()
                .zip(data.hourly.iter())
                .map(|(label, hour)| (label.as_str(), hour.commits))
                .collect();
            let chart = BarChart::default()
                .data(&bars)
                .bar_width(2)
                .bar_gap(1)
                .bar_style(Style::default().fg(theme.accent))
                .value_style(Style::default().fg(theme.bg).bg(theme.accent));
            frame.render_widget(chart, inner);
        },
    );

    status_panel(
        frame,
        columns[2],
        theme,
        "Commit sizes",
        summary.clone(),
        |frame, inner, data| {
            let bars: Vec<(&str, u64)> = data
                .size_histogram
                .iter()
                .map(|bucket| (bucket.bucket.as_str(), bucket.count))
                .collect();
            let chart = BarChart::default()
                .data(&bars)
                .bar_width(4)
                .bar_gap(1)
                .bar_style(Style::default().fg(theme.primary))
                .value_style(Style::default().fg(theme.bg).bg(theme.primary));
            frame.render_widget(chart, inner);
        },
    );

    status_panel(
        frame,
        columns[3],
        theme,
        "Peaks",
        timeline.clone(),
        |frame, inner, data| {
            let kpi = &data.kpi;
            let peak_day = kpi
                .peak_day
                .map(|day| day.to_string())
                .unwrap_or_else(|| "--".to_string());
            let peak_hour = kpi
                .peak_hour
                .map(|hour| format!("{hour:02}:00"))
                .unwrap_or_else(|| "--".to_string());
            let offhours = kpi
                .offhours_share
                .map(|share| share.display())
                .unwrap_or_else(|| "--".to_string());
            let busiest = data
                .weekday
                .iter()
                .max_by_key(|day| day.commits)
                .map(|day| format!("{} ({})", day.label(), day.share))
                .unwrap_or_else(|| "--".to_string());
            let lines = vec![
                peak_line(theme, "Peak day ", peak_day),
                peak_line(theme, "Peak hour", peak_hour),
                peak_line(theme, "Off-hours", offhours),
                peak_line(theme, "Busiest  ", busiest),
            ];
            frame.render_widget(Paragraph::new(lines), inner);
        },
    );
}

fn peak_line(theme: &Theme, label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}  "), theme.muted_style()),
        Span::styled(value, theme.text_style()),
    ])
}

fn render_detail_row(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    summary: &ViewStatus<MetricsOverview>,
) {
    let columns = Layout::horizontal([
        Constraint::Percentage(34),
        Constraint::Percentage(33),
        Constraint::Percentage(33),
    ])
    .split(area);

    status_panel(
        frame,
        columns[0],
        theme,
        "Top authors",
        summary.clone(),
        |frame, inner, data| {
            let rows: Vec<Row> = data
                .top_authors
                .iter()
                .map(|author| {
                    Row::new(vec![
                        Cell::from(author.name.clone()).style(theme.text_style()),
                        Cell::from(author.commits.to_string()).style(theme.muted_style()),
                        Cell::from(author.share.to_string()).style(theme.muted_style()),
                    ])
                })
                .collect();
            let table = Table::new(
                rows,
                [
                    Constraint::Min(12),
                    Constraint::Length(8),
                    Constraint::Length(5),
                ],
            )
            .header(Row::new(vec!["author", "commits", "share"]).style(theme.muted_style()));
            frame.render_widget(table, inner);
        },
    );

    status_panel(
        frame,
        columns[1],
        theme,
        "Latest commits",
        summary.clone(),
        |frame, inner, data| {
            let items: Vec<ListItem> = data
                .latest_commits
                .iter()
                .map(|commit| {
                    ListItem::new(Line::from(vec![
                        Span::styled(commit.short_sha().to_string(), theme.primary_style()),
                        Span::raw(" "),
                        Span::styled(commit.subject().to_string(), theme.text_style()),
                        Span::styled(
                            format!("  {}", commit.repo.name),
                            theme.muted_style(),
                        ),
                    ]))
                })
                .collect();
            frame.render_widget(List::new(items), inner);
        },
    );

    status_panel(
        frame,
        columns[2],
        theme,
        "Recommendations",
        summary.clone(),
        |frame, inner, data| {
            let items: Vec<ListItem> = data
                .recommendations
                .iter()
                .map(|insight| {
                    ListItem::new(Line::from(vec![
                        Span::styled("● ", theme.severity_style(insight.severity)),
                        Span::styled(insight.title.clone(), theme.text_style()),
                    ]))
                })
                .collect();
            frame.render_widget(List::new(items), inner);
        },
    );
}
