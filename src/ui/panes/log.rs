//! Step log pane: narration of the steps applied so far

use super::utils::{pane_block, render_scrolled_lines};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Render the step log. The most recent line is emphasised.
pub fn render_log_pane(
    frame: &mut Frame,
    area: Rect,
    applied: &[String],
    total_steps: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = if total_steps == 0 {
        " Step Log ".to_string()
    } else {
        format!(" Step Log [{}/{}] ", applied.len(), total_steps)
    };
    render_scrolled_lines(
        frame,
        area,
        pane_block(title, is_focused),
        log_lines(applied),
        "(no steps yet; press : to enter a command)",
        scroll_offset,
    );
}

fn log_lines(applied: &[String]) -> Vec<Line<'static>> {
    let number_width = applied.len().to_string().len();
    let last = applied.len().saturating_sub(1);
    applied
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let text_style = if i == last {
                Style::default()
                    .fg(DEFAULT_THEME.fg)
                    .bg(DEFAULT_THEME.current_line_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            Line::from(vec![
                Span::styled(
                    format!("{:>width$} ", i + 1, width = number_width),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(text.clone(), text_style),
            ])
        })
        .collect()
}
