//! Filter Bar Rendering
//!
//! One line showing the shared filter state every tab is scoped by: the
//! range preset with its resolved window, the project scope and, when
//! set, the insight focus.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use crate::view_model::ViewModel;

use super::Theme;

/// Render the filter bar
pub fn render_filter_bar(frame: &mut Frame, area: Rect, model: &ViewModel, theme: &Theme) {
    let mut spans: Vec<Span> = Vec::new();
    let mut consumed = 0usize;

    let border_style = Style::default().fg(theme.border);
    let header_style = Style::default().fg(theme.muted);
    let value_style = Style::default().fg(theme.text);

    push_span(&mut spans, &mut consumed, "─ ", border_style);
    push_span(
        &mut spans,
        &mut consumed,
        "Filters",
        header_style.add_modifier(Modifier::BOLD),
    );
    push_span(&mut spans, &mut consumed, "  ", Style::default());

    push_span(&mut spans, &mut consumed, "Range ", header_style);
    render_filter_value(&mut spans, &mut consumed, model.preset.label(), value_style);
    push_span(
        &mut spans,
        &mut consumed,
        &format!(" {}..{}", model.filters.since(), model.filters.until()),
        header_style,
    );

    push_span(&mut spans, &mut consumed, "  ", Style::default());

    push_span(&mut spans, &mut consumed, "Project ", header_style);
    let project = model
        .selected_project_name()
        .or_else(|| model.filters.project_id().map(|id| format!("#{id}")))
        .unwrap_or_else(|| "all".to_string());
    render_filter_value(&mut spans, &mut consumed, &project, value_style);

    if let Some(focus) = &model.insights.focus {
        push_span(&mut spans, &mut consumed, "  ", Style::default());
        push_span(&mut spans, &mut consumed, "Focus ", header_style);
        render_filter_value(
            &mut spans,
            &mut consumed,
            &focus.name,
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
        );
    }

    // Fill remaining space with separator line
    let line_width = area.width as usize;
    if consumed < line_width {
        let remaining = line_width - consumed;
        push_span(&mut spans, &mut consumed, &"─".repeat(remaining), border_style);
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn push_span(spans: &mut Vec<Span>, consumed: &mut usize, text: &str, style: Style) {
    *consumed += UnicodeWidthStr::width(text);
    spans.push(Span::styled(text.to_string(), style));
}

fn render_filter_value(spans: &mut Vec<Span>, consumed: &mut usize, value: &str, style: Style) {
    let display = format!("[{}]", value);
    let width = UnicodeWidthStr::width(display.as_str());
    *consumed += width;
    spans.push(Span::styled(display, style));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_test_terminal;
    use crossbeam_channel as chan;
    use rp_core::{QueryCache, RangePreset};
    use rp_rest_mock_client::MockAnalyticsClient;
    use std::sync::Arc;

    #[tokio::test]
    async fn filter_bar_shows_the_range_and_project_scope() {
        let (tx, _rx) = chan::unbounded();
        let model = ViewModel::new(
            Arc::new(MockAnalyticsClient::new()),
            QueryCache::with_default_staleness(),
            RangePreset::Days30,
            tx,
        );
        let theme = Theme::default();
        let mut terminal = create_test_terminal(100, 1);

        terminal
            .draw(|frame| {
                let area = Rect::new(0, 0, 100, 1);
                render_filter_bar(frame, area, &model, &theme);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let row: String = (0..buffer.area.width).map(|x| buffer[(x, 0)].symbol()).collect();
        assert!(row.contains("Range [30d]"));
        assert!(row.contains("Project [all]"));
        assert!(row.contains("─"), "line fill should pad the row");
    }
}
