//! Info pane: what is running, how it ended, and what can be typed next

use super::utils::pane_block;
use crate::command::command_hints;
use crate::engine::catalog::{sort_info, AlgorithmInfo, HEAP_SORT};
use crate::engine::errors::EngineError;
use crate::engine::{narrate_outcome, Operation};
use crate::step::Outcome;
use crate::structures::State;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Data needed to render the info pane
pub struct InfoRenderData<'a> {
    pub state: &'a State,
    pub operation: Option<&'a Operation>,
    pub outcome: Option<&'a Outcome>,
    /// Bytes cached and the budget
    pub history_memory: (usize, usize),
    pub history_warning: Option<&'a EngineError>,
}

/// Render the info pane
pub fn render_info_pane(
    frame: &mut Frame,
    area: Rect,
    data: InfoRenderData,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let lines = info_lines(&data);
    let visible_height = area.height.saturating_sub(2) as usize;
    *scroll_offset = (*scroll_offset).min(lines.len().saturating_sub(visible_height));

    let paragraph = Paragraph::new(lines)
        .block(pane_block(" Info ".to_string(), is_focused))
        .wrap(Wrap { trim: false })
        .scroll((*scroll_offset as u16, 0));
    frame.render_widget(paragraph, area);
}

fn heading(text: &'static str) -> Line<'static> {
    Line::styled(
        text,
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    )
}

fn algorithm(operation: &Operation) -> Option<&'static AlgorithmInfo> {
    match operation {
        Operation::Sort(alg) => Some(sort_info(*alg)),
        Operation::HeapSort => Some(&HEAP_SORT),
        _ => None,
    }
}

fn info_lines(data: &InfoRenderData) -> Vec<Line<'static>> {
    let dim = Style::default().fg(DEFAULT_THEME.comment);
    let fg = Style::default().fg(DEFAULT_THEME.fg);
    let mut lines = vec![heading("Operation")];

    match data.operation {
        Some(operation) => {
            lines.push(Line::styled(operation.to_string(), fg));
            if let Some(info) = algorithm(operation) {
                lines.push(Line::styled(info.description, dim));
                for (label, value) in [
                    ("best", info.best),
                    ("average", info.average),
                    ("worst", info.worst),
                    ("space", info.space),
                ] {
                    lines.push(Line::from(vec![
                        Span::styled(format!("  {:<8}", label), dim),
                        Span::styled(value, Style::default().fg(DEFAULT_THEME.secondary)),
                    ]));
                }
            }
        }
        None => lines.push(Line::styled("none", dim)),
    }

    if let Some(outcome) = data.outcome {
        lines.push(Line::default());
        lines.push(heading("Result"));
        let style = match outcome {
            Outcome::NotFound | Outcome::NoPath | Outcome::Duplicate { .. } => {
                Style::default().fg(DEFAULT_THEME.error)
            }
            _ => Style::default().fg(DEFAULT_THEME.success),
        };
        lines.push(Line::styled(narrate_outcome(data.state, outcome), style));
    }

    let (used, limit) = data.history_memory;
    lines.push(Line::default());
    lines.push(heading("History"));
    lines.push(Line::styled(
        format!("{} / {} KiB", used.div_ceil(1024), limit / 1024),
        fg,
    ));
    if let Some(warning) = data.history_warning {
        lines.push(Line::styled(
            format!("{}; stepping back replays from the last cached state", warning),
            Style::default().fg(DEFAULT_THEME.error),
        ));
    }

    lines.push(Line::default());
    lines.push(heading("Commands"));
    for hint in command_hints(data.state.kind()) {
        lines.push(Line::from(vec![Span::styled(":", dim), Span::styled(*hint, fg)]));
    }
    lines.push(Line::styled(":sample | :clear", fg));
    lines
}
