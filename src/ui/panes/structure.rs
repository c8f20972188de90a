//! Structure pane: the live view of whatever the driver currently holds
//!
//! Each structure family gets its own line builder; marks left by the
//! reducer (compared slots, highlighted buckets, visited nodes) are shown
//! through the theme colours rather than extra glyphs where possible.

use super::utils::{bar, pane_block, render_scrolled_lines};
use crate::structures::bst::{Bst, TreeNode};
use crate::structures::graph::Graph;
use crate::structures::heap::{left_child, right_child, HeapState};
use crate::structures::linear::{Discipline, Linear};
use crate::structures::{ArrayState, HashTable, State};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Width of the longest bar in the array and heap views
const BAR_WIDTH: usize = 40;

/// Render the structure pane
pub fn render_structure_pane(
    frame: &mut Frame,
    area: Rect,
    state: &State,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(format!(" {} ", title(state)), is_focused);
    render_scrolled_lines(
        frame,
        area,
        block,
        structure_lines(state),
        &format!("(empty {})", state.kind()),
        scroll_offset,
    );
}

fn title(state: &State) -> String {
    match state {
        State::HashTable(table) => format!(
            "Hash Table [size {}, {} entries, {} collisions, load {:.2}]",
            table.size(),
            table.len(),
            table.collisions(),
            table.load_factor()
        ),
        State::Heap(heap) => format!("{}-Heap", capitalize(heap.kind().name())),
        State::Graph(graph) => format!(
            "Graph [{}, {}]",
            if graph.is_directed() { "directed" } else { "undirected" },
            if graph.is_weighted() { "weighted" } else { "unweighted" }
        ),
        other => capitalize(&other.kind().to_string()),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Styled lines for `state`; empty when the structure holds nothing
pub fn structure_lines(state: &State) -> Vec<Line<'static>> {
    if state.is_empty() {
        return Vec::new();
    }
    match state {
        State::Array(array) => array_lines(array),
        State::Tree(tree) => tree_lines(tree),
        State::HashTable(table) => hash_lines(table),
        State::Heap(heap) => heap_lines(heap),
        State::Graph(graph) => graph_lines(graph),
        State::Stack(linear) | State::Queue(linear) => linear_lines(linear),
    }
}

fn mark_style(marked: bool) -> Style {
    if marked {
        Style::default()
            .fg(DEFAULT_THEME.compare)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.bar)
    }
}

fn value_bars(values: &[i64], is_marked: impl Fn(usize) -> bool, done: bool) -> Vec<Line<'static>> {
    let max = values.iter().map(|v| v.abs()).max().unwrap_or(0);
    let index_width = values.len().saturating_sub(1).to_string().len();
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let style = if is_marked(i) {
                mark_style(true)
            } else if done {
                Style::default().fg(DEFAULT_THEME.success)
            } else {
                mark_style(false)
            };
            Line::from(vec![
                Span::styled(
                    format!("{:>width$} │ ", i, width = index_width),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(bar(value, max, BAR_WIDTH), style),
                Span::styled(format!(" {}", value), style),
            ])
        })
        .collect()
}

fn array_lines(array: &ArrayState) -> Vec<Line<'static>> {
    value_bars(array.values(), |i| array.is_marked(i), array.is_sorted())
}

fn heap_lines(heap: &HeapState) -> Vec<Line<'static>> {
    let mut lines = value_bars(heap.values(), |i| heap.is_marked(i), false);
    lines.push(Line::default());
    lines.push(Line::styled(
        "Tree view",
        Style::default().fg(DEFAULT_THEME.comment),
    ));
    heap_tree_lines(heap, 0, String::new(), "", &mut lines);
    lines
}

fn heap_tree_lines(
    heap: &HeapState,
    index: usize,
    prefix: String,
    connector: &str,
    out: &mut Vec<Line<'static>>,
) {
    let Some(&value) = heap.values().get(index) else {
        return;
    };
    out.push(Line::from(vec![
        Span::styled(
            format!("{}{}", prefix, connector),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(value.to_string(), mark_style(heap.is_marked(index))),
    ]));
    let child_prefix = format!("{}{}", prefix, continuation(connector));
    let right = right_child(index);
    let has_right = right < heap.len();
    heap_tree_lines(
        heap,
        left_child(index),
        child_prefix.clone(),
        if has_right { "├─ " } else { "└─ " },
        out,
    );
    heap_tree_lines(heap, right, child_prefix, "└─ ", out);
}

fn continuation(connector: &str) -> &'static str {
    match connector {
        "├─ " => "│  ",
        "" => "",
        _ => "   ",
    }
}

fn tree_lines(tree: &Bst) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    tree_node_lines(tree, tree.root(), String::new(), "", "", &mut lines);
    if !tree.visited().is_empty() {
        let order: Vec<String> = tree.visited().iter().map(|v| v.to_string()).collect();
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("Visited: ", Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(order.join(" → "), Style::default().fg(DEFAULT_THEME.visited)),
        ]));
    }
    lines
}

fn tree_node_lines(
    tree: &Bst,
    node: Option<&TreeNode>,
    prefix: String,
    connector: &str,
    side: &str,
    out: &mut Vec<Line<'static>>,
) {
    let Some(node) = node else {
        return;
    };
    let style = if node.highlighted {
        mark_style(true)
    } else if tree.visited().contains(&node.value) {
        Style::default().fg(DEFAULT_THEME.visited)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    };
    out.push(Line::from(vec![
        Span::styled(
            format!("{}{}{}", prefix, connector, side),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(node.value.to_string(), style),
    ]));

    let child_prefix = format!("{}{}", prefix, continuation(connector));
    let left_connector = if node.right.is_some() { "├─ " } else { "└─ " };
    tree_node_lines(tree, node.left.as_deref(), child_prefix.clone(), left_connector, "L ", out);
    tree_node_lines(tree, node.right.as_deref(), child_prefix, "└─ ", "R ", out);
}

fn hash_lines(table: &HashTable) -> Vec<Line<'static>> {
    let index_width = table.size().saturating_sub(1).to_string().len();
    table
        .buckets()
        .iter()
        .enumerate()
        .map(|(i, bucket)| {
            let selected = table.highlighted() == Some(i);
            let row = if selected {
                Style::default().bg(DEFAULT_THEME.current_line_bg)
            } else {
                Style::default()
            };
            let index_style = if selected {
                row.fg(DEFAULT_THEME.compare).add_modifier(Modifier::BOLD)
            } else {
                row.fg(DEFAULT_THEME.comment)
            };
            let mut spans = vec![Span::styled(
                format!("{:>width$} │ ", i, width = index_width),
                index_style,
            )];
            match bucket.as_deref() {
                None | Some([]) => {
                    spans.push(Span::styled("(empty)", row.fg(DEFAULT_THEME.comment)))
                }
                Some(entries) => {
                    for (n, entry) in entries.iter().enumerate() {
                        if n > 0 {
                            spans.push(Span::styled(" → ", row.fg(DEFAULT_THEME.comment)));
                        }
                        spans.push(Span::styled(entry.key.clone(), row.fg(DEFAULT_THEME.primary)));
                        spans.push(Span::styled(": ", row.fg(DEFAULT_THEME.comment)));
                        spans.push(Span::styled(entry.value.clone(), row.fg(DEFAULT_THEME.secondary)));
                    }
                }
            }
            Line::from(spans)
        })
        .collect()
}

fn graph_lines(graph: &Graph) -> Vec<Line<'static>> {
    let mut lines = vec![Line::styled(
        "Nodes",
        Style::default().fg(DEFAULT_THEME.comment),
    )];
    let label_width = graph
        .nodes()
        .iter()
        .map(|n| n.label.chars().count())
        .max()
        .unwrap_or(0);

    for node in graph.nodes() {
        let style = if node.highlighted {
            mark_style(true)
        } else if node.visited {
            Style::default().fg(DEFAULT_THEME.visited)
        } else if node.distance.is_some() {
            Style::default().fg(DEFAULT_THEME.tentative)
        } else {
            Style::default().fg(DEFAULT_THEME.fg)
        };
        let mut spans = vec![Span::styled(
            format!("  {:<width$}", node.label, width = label_width),
            style,
        )];
        if let Some(distance) = node.distance {
            spans.push(Span::styled(
                format!("  dist {}", distance),
                Style::default().fg(DEFAULT_THEME.tentative),
            ));
            if let Some(previous) = node.predecessor {
                spans.push(Span::styled(
                    format!(" via {}", graph.label(previous)),
                    Style::default().fg(DEFAULT_THEME.comment),
                ));
            }
        }
        if node.visited {
            spans.push(Span::styled(
                "  ✓",
                Style::default().fg(DEFAULT_THEME.visited),
            ));
        }
        lines.push(Line::from(spans));
    }

    if graph.edges().is_empty() {
        return lines;
    }
    lines.push(Line::default());
    lines.push(Line::styled(
        "Edges",
        Style::default().fg(DEFAULT_THEME.comment),
    ));
    let arrow = if graph.is_directed() { "→" } else { "─" };
    for edge in graph.edges() {
        let style = if edge.highlighted {
            Style::default()
                .fg(DEFAULT_THEME.path)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DEFAULT_THEME.fg)
        };
        let mut spans = vec![Span::styled(
            format!(
                "  {} {} {}",
                graph.label(edge.source),
                arrow,
                graph.label(edge.target)
            ),
            style,
        )];
        if graph.is_weighted() {
            spans.push(Span::styled(
                format!("  ({})", edge.weight),
                Style::default().fg(DEFAULT_THEME.secondary),
            ));
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn linear_lines(linear: &Linear) -> Vec<Line<'static>> {
    let exit = linear.exit_index();
    let item_span = |index: usize| {
        let item = &linear.items()[index];
        Span::styled(format!("[{}]", item.value), mark_style(item.highlighted))
    };
    let hint = |text: &'static str| Span::styled(text, Style::default().fg(DEFAULT_THEME.comment));

    match linear.discipline() {
        Discipline::Lifo => (0..linear.len())
            .rev()
            .map(|i| {
                let mut spans = vec![item_span(i)];
                if Some(i) == exit {
                    spans.push(hint("  ← top"));
                }
                Line::from(spans)
            })
            .collect(),
        Discipline::Fifo => {
            let mut spans = vec![hint("front → ")];
            for i in 0..linear.len() {
                if i > 0 {
                    spans.push(Span::raw(" "));
                }
                spans.push(item_span(i));
            }
            spans.push(hint(" ← back"));
            vec![Line::from(spans)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::heap::HeapKind;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_empty_state_has_no_lines() {
        assert!(structure_lines(&State::Array(ArrayState::new(Vec::new()))).is_empty());
    }

    #[test]
    fn test_array_bar_per_value() {
        let lines = structure_lines(&State::Array(ArrayState::new(vec![3, 1, 2])));
        assert_eq!(lines.len(), 3);
        assert!(text(&lines[0]).ends_with(" 3"));
    }

    #[test]
    fn test_tree_outline_order() {
        let lines = structure_lines(&State::Tree(Bst::sample()));
        let rendered: Vec<String> = lines.iter().map(text).collect();
        assert_eq!(rendered[0], "50");
        assert_eq!(rendered[1], "├─ L 30");
        assert_eq!(rendered[2], "│  ├─ L 20");
        assert_eq!(rendered[4], "└─ R 70");
    }

    #[test]
    fn test_hash_one_line_per_bucket() {
        let table = HashTable::sample(7).unwrap();
        assert_eq!(structure_lines(&State::HashTable(table)).len(), 7);
    }

    #[test]
    fn test_heap_shows_bars_and_tree() {
        let heap = HeapState::sample(HeapKind::Max);
        let lines = structure_lines(&State::Heap(heap));
        // bars, blank, caption, one tree line per value
        assert_eq!(lines.len(), 7 + 2 + 7);
    }

    #[test]
    fn test_stack_top_first() {
        let mut stack = Linear::stack();
        stack.push("a");
        stack.push("b");
        let lines = structure_lines(&State::Stack(stack));
        assert_eq!(text(&lines[0]), "[b]  ← top");
        assert_eq!(text(&lines[1]), "[a]");
    }

    #[test]
    fn test_queue_single_row() {
        let mut queue = Linear::queue();
        queue.push("a");
        queue.push("b");
        let lines = structure_lines(&State::Queue(queue));
        assert_eq!(text(&lines[0]), "front → [a] [b] ← back");
    }
}
