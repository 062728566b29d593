//! Status bar rendering with key bindings and heap totals

use crate::report::Summary;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the status bar at the bottom
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    message: &str,
    selected: usize,
    summary: &Summary,
) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let page_text = if summary.pages == 0 {
        " Page -/0 ".to_string()
    } else {
        format!(" Page {}/{} ", selected + 1, summary.pages)
    };

    let bar_style = Style::default().bg(DEFAULT_THEME.current_line_bg);

    let left_spans = vec![
        Span::styled(
            page_text,
            Style::default()
                .bg(DEFAULT_THEME.primary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", bar_style.fg(DEFAULT_THEME.comment)),
        Span::styled(format!(" {} ", message), bar_style.fg(DEFAULT_THEME.fg)),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(bar_style)
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    let sep_style = bar_style.fg(DEFAULT_THEME.comment);
    let right_spans = vec![
        Span::styled(
            format!(
                " {} objects, {} pinned ({:.1}%) ",
                summary.objects,
                summary.pinned,
                summary.pinned_ratio * 100.0
            ),
            bar_style.fg(DEFAULT_THEME.secondary),
        ),
        Span::styled("│", sep_style),
        Span::styled(" ↑↓ page  Tab focus  q quit ", bar_style.fg(DEFAULT_THEME.fg)),
    ];

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(bar_style)
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}
