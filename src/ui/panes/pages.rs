//! Page list pane
//!
//! One row per page, in slot map order, showing the page base address, its
//! pinned and occupied counts and a small occupancy bar. The selected page is
//! highlighted and kept in view.

use super::utils::{border_style, format_address, keep_in_view};
use crate::ui::app::PageView;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Width of the occupancy bar, in cells
const BAR_WIDTH: usize = 10;

/// Render the page list pane
pub fn render_pages_pane(
    frame: &mut Frame,
    area: Rect,
    pages: &[PageView],
    selected: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(format!(" Pages ({}) ", pages.len()))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if pages.is_empty() {
        let list = List::new(vec![
            ListItem::new("(no pages)").style(Style::default().fg(DEFAULT_THEME.comment))
        ])
        .block(block);
        frame.render_widget(list, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // borders
    keep_in_view(scroll_offset, selected, visible_height, pages.len());

    let items: Vec<ListItem> = pages
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(i, page)| {
            let line = page_line(page);
            if i == selected {
                ListItem::new(line).style(
                    Style::default()
                        .bg(DEFAULT_THEME.current_line_bg)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ListItem::new(line)
            }
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn page_line(page: &PageView) -> Line<'static> {
    let filled = if page.capacity == 0 {
        0
    } else {
        (page.occupied * BAR_WIDTH).div_ceil(page.capacity)
    };
    let pinned_cells = if page.occupied == 0 {
        0
    } else {
        (page.pinned * filled).div_ceil(page.occupied)
    };

    Line::from(vec![
        Span::styled(
            format_address(page.base),
            Style::default().fg(DEFAULT_THEME.address),
        ),
        Span::raw(" "),
        Span::styled(
            "▮".repeat(pinned_cells),
            Style::default().fg(DEFAULT_THEME.pinned),
        ),
        Span::styled(
            "▮".repeat(filled - pinned_cells),
            Style::default().fg(DEFAULT_THEME.unpinned),
        ),
        Span::styled(
            "▯".repeat(BAR_WIDTH - filled),
            Style::default().fg(DEFAULT_THEME.empty_slot),
        ),
        Span::styled(
            format!(" {:>4} pinned", page.pinned),
            Style::default().fg(DEFAULT_THEME.pinned),
        ),
        Span::styled(
            format!(" {:>4}/{}", page.occupied, page.capacity),
            Style::default().fg(DEFAULT_THEME.primary),
        ),
    ])
}
