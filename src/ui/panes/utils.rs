//! Shared helpers for pane rendering
//!
//! Every pane draws inside a bordered block whose colour follows focus, and
//! most panes are a scrollable list of pre-styled lines.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Bordered block with the focus-dependent border style
pub(super) fn pane_block(title: String, is_focused: bool) -> Block<'static> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Render `lines` into `block`, starting at `scroll_offset`.
///
/// The offset is clamped so the last line never scrolls above the bottom of
/// the pane; `usize::MAX` therefore pins the view to the end.
pub(super) fn render_scrolled_lines(
    frame: &mut Frame,
    area: Rect,
    block: Block<'static>,
    lines: Vec<Line<'static>>,
    placeholder: &str,
    scroll_offset: &mut usize,
) {
    if lines.is_empty() {
        let paragraph = Paragraph::new(placeholder.to_string())
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let total_items = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

    *scroll_offset = clamp_scroll(*scroll_offset, total_items, visible_height);

    let visible_items: Vec<ListItem> = lines
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(ListItem::new)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}

/// Largest useful offset for `total` lines in a view `visible` lines tall
pub(super) fn clamp_scroll(offset: usize, total: usize, visible: usize) -> usize {
    if total > visible {
        offset.min(total - visible)
    } else {
        0
    }
}

/// Horizontal bar of at most `width` cells for `value` on a `0..=max` scale.
///
/// Non-zero values always get at least one cell so they stay visible.
pub(super) fn bar(value: i64, max: i64, width: usize) -> String {
    if max <= 0 || value == 0 {
        return String::new();
    }
    let magnitude = value.unsigned_abs() as u128;
    let cells = (magnitude * width as u128 / max as u128).max(1) as usize;
    "█".repeat(cells.min(width))
}
