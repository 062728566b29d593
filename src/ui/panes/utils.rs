//! Helpers shared by the panes

use crate::memory::Address;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::style::{Modifier, Style};

/// Border style for a pane, highlighted when focused
pub(crate) fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}

pub(crate) fn format_address(addr: Address) -> String {
    format!("0x{:012x}", addr)
}

/// Adjust `offset` so row `target` is inside a window of `height` rows
pub(crate) fn keep_in_view(offset: &mut usize, target: usize, height: usize, total: usize) {
    if target < *offset {
        *offset = target;
    } else if target >= *offset + height {
        *offset = target + 1 - height;
    }
    *offset = (*offset).min(total.saturating_sub(height));
}
