//! Slot grid pane for the selected page
//!
//! Each slot is one cell, laid out left to right in address order and wrapped
//! to the pane width. Every row starts with the address of its first slot:
//!
//! ```text
//! 0x000000004010 ■■·■■■······■■
//! 0x0000000041c8 ·■■■··■■■■■■··
//! ```

use super::utils::{border_style, format_address};
use crate::memory::Slot;
use crate::ui::app::PageView;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Address column plus the space after it
const ADDRESS_WIDTH: usize = 15;

/// Render the slot grid pane
pub fn render_slots_pane(
    frame: &mut Frame,
    area: Rect,
    page: Option<&PageView>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let Some(page) = page else {
        let paragraph = Paragraph::new("(no page selected)")
            .block(block.title(" Slots "))
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    };

    let block = block.title(format!(
        " Slots of {} (first slot +{}) ",
        format_address(page.base),
        page.start - page.base
    ));

    let content_width = area.width.saturating_sub(2) as usize; // borders
    let per_row = content_width.saturating_sub(ADDRESS_WIDTH).max(1);

    let mut lines = vec![legend(), Line::raw("")];
    lines.extend(slot_rows(&page.slots, per_row));

    // Keep the legend out of the scroll range
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let max_scroll = lines.len().saturating_sub(visible_height);
    *scroll_offset = (*scroll_offset).min(max_scroll);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((*scroll_offset as u16, 0));
    frame.render_widget(paragraph, area);
}

fn legend() -> Line<'static> {
    Line::from(vec![
        Span::styled("■", Style::default().fg(DEFAULT_THEME.pinned)),
        Span::raw(" pinned  "),
        Span::styled("■", Style::default().fg(DEFAULT_THEME.unpinned)),
        Span::raw(" occupied  "),
        Span::styled("·", Style::default().fg(DEFAULT_THEME.empty_slot)),
        Span::raw(" free"),
    ])
}

/// Wrap slots into rows of `per_row` cells, each prefixed with its address
pub(crate) fn slot_rows(slots: &[Slot], per_row: usize) -> Vec<Line<'static>> {
    slots
        .chunks(per_row.max(1))
        .map(|row| {
            let mut spans = vec![
                Span::styled(
                    format_address(row[0].address()),
                    Style::default().fg(DEFAULT_THEME.address),
                ),
                Span::raw(" "),
            ];
            spans.extend(row.iter().map(slot_span));
            Line::from(spans)
        })
        .collect()
}

fn slot_span(slot: &Slot) -> Span<'static> {
    match slot {
        Slot::Occupied(record) if record.pinned => {
            Span::styled("■", Style::default().fg(DEFAULT_THEME.pinned))
        }
        Slot::Occupied(_) => Span::styled("■", Style::default().fg(DEFAULT_THEME.unpinned)),
        Slot::Empty(_) => Span::styled("·", Style::default().fg(DEFAULT_THEME.empty_slot)),
    }
}
