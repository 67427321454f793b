// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Insights tab: recommendation cards, optionally focused on one author.

use ratatui::{prelude::*, widgets::*};

use rp_domain_types::Insight;

use crate::view_model::ViewModel;

use super::status::status_panel;
use super::Theme;

pub fn render_insights(frame: &mut Frame, area: Rect, model: &ViewModel, theme: &Theme) {
    let title = match &model.insights.focus {
        Some(focus) => format!("Insights: {}", focus.name),
        None => "Insights".to_string(),
    };
    let status = model
        .snapshot::<Vec<Insight>>(&model.insights_key())
        .status(|cards| cards.is_empty());
    status_panel(frame, area, theme, &title, status, |frame, inner, cards| {
        let items: Vec<ListItem> = cards
            .iter()
            .flat_map(|insight| {
                [
                    ListItem::new(Line::from(vec![
                        Span::styled("● ", theme.severity_style(insight.severity)),
                        Span::styled(
                            insight.title.clone(),
                            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                        ),
                    ])),
                    ListItem::new(Line::from(Span::styled(
                        format!("  {}", insight.description),
                        theme.muted_style(),
                    ))),
                    ListItem::new(Line::raw("")),
                ]
            })
            .collect();
        frame.render_widget(List::new(items), inner);
    });
}
