//! Command line parsing for the operation prompt
//!
//! The TUI prompt and the CLI's trailing arguments share one small grammar:
//! a verb followed by whitespace-separated arguments, interpreted relative to
//! the structure currently loaded. A command either runs an [`Operation`]
//! through the engine or performs an immediate [`Edit`] between runs.

use crate::engine::errors::EngineError;
use crate::engine::{parse_value, Operation, SortAlgorithm};
use crate::structures::bst::TraversalOrder;
use crate::structures::graph::Graph;
use crate::structures::{create_initial_state, InitParams, Seed, State, StructureKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Operation),
    Edit(Edit),
}

/// Structural changes applied directly, without steps
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Sample,
    Clear,
    Random,
    SetValues(Vec<i64>),
    ToggleHeapKind,
    AddNode(String),
    AddEdge {
        source: String,
        target: String,
        weight: i64,
    },
    RemoveNode(String),
    RemoveEdge {
        source: String,
        target: String,
    },
    ToggleDirected,
    ToggleWeighted,
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidInput {
        message: message.into(),
    }
}

fn arg<'a>(args: &[&'a str], index: usize, what: &str) -> Result<&'a str, EngineError> {
    args.get(index)
        .copied()
        .ok_or_else(|| invalid(format!("Missing {}", what)))
}

fn values(args: &[&str]) -> Result<Vec<i64>, EngineError> {
    args.iter().map(|a| parse_value(a)).collect()
}

/// Parse one prompt line against the structure in `state`
pub fn parse_command(line: &str, state: &State) -> Result<Command, EngineError> {
    let mut words = line.split_whitespace();
    let verb = words
        .next()
        .ok_or(EngineError::EmptyInput { field: "Command" })?
        .to_ascii_lowercase();
    let args: Vec<&str> = words.collect();

    // Verbs every structure understands
    match verb.as_str() {
        "sample" | "reset" => return Ok(Command::Edit(Edit::Sample)),
        "clear" => return Ok(Command::Edit(Edit::Clear)),
        _ => {}
    }

    let command = match state {
        State::Array(_) => match verb.as_str() {
            "sort" => Command::Run(Operation::Sort(arg(&args, 0, "algorithm")?.parse()?)),
            "random" => Command::Edit(Edit::Random),
            "set" => Command::Edit(Edit::SetValues(values(&args)?)),
            other => Command::Run(Operation::Sort(other.parse::<SortAlgorithm>()?)),
        },
        State::Tree(_) => match verb.as_str() {
            "insert" | "add" => {
                Command::Run(Operation::TreeInsert(parse_value(arg(&args, 0, "value")?)?))
            }
            "traverse" => Command::Run(Operation::Traverse(parse_order(arg(&args, 0, "order")?)?)),
            "random" => Command::Edit(Edit::Random),
            "set" => Command::Edit(Edit::SetValues(values(&args)?)),
            other => Command::Run(Operation::Traverse(parse_order(other)?)),
        },
        State::HashTable(_) => match verb.as_str() {
            "insert" | "put" => {
                let key = arg(&args, 0, "key")?;
                let value = args.get(1..).unwrap_or_default().join(" ");
                Command::Run(Operation::HashInsert {
                    key: key.to_string(),
                    value,
                })
            }
            "search" | "get" | "find" => Command::Run(Operation::HashSearch {
                key: arg(&args, 0, "key")?.to_string(),
            }),
            "delete" | "remove" => Command::Run(Operation::HashDelete {
                key: arg(&args, 0, "key")?.to_string(),
            }),
            "resize" => {
                let raw = arg(&args, 0, "size")?;
                let size = raw.parse::<usize>().map_err(|_| EngineError::NotANumber {
                    input: raw.to_string(),
                })?;
                Command::Run(Operation::HashResize { size })
            }
            other => return Err(unknown(other, state.kind())),
        },
        State::Heap(_) => match verb.as_str() {
            "insert" | "add" | "push" => {
                Command::Run(Operation::HeapInsert(parse_value(arg(&args, 0, "value")?)?))
            }
            "extract" | "pop" => Command::Run(Operation::HeapExtract),
            "build" | "heapify" => Command::Run(Operation::HeapBuild),
            "sort" | "heapsort" => Command::Run(Operation::HeapSort),
            "toggle" | "kind" => Command::Edit(Edit::ToggleHeapKind),
            "random" => Command::Edit(Edit::Random),
            "set" => Command::Edit(Edit::SetValues(values(&args)?)),
            other => return Err(unknown(other, state.kind())),
        },
        State::Graph(graph) => parse_graph(&verb, &args, graph)?,
        State::Stack(_) | State::Queue(_) => match verb.as_str() {
            "push" | "enqueue" => {
                if args.is_empty() {
                    return Err(EngineError::EmptyInput { field: "Item" });
                }
                Command::Run(Operation::Push(args.join(" ")))
            }
            "pop" | "dequeue" => Command::Run(Operation::Pop),
            "peek" | "front" | "top" => Command::Run(Operation::Peek),
            other => return Err(unknown(other, state.kind())),
        },
    };
    Ok(command)
}

/// Example prompt lines for a structure, shown in the info pane
pub fn command_hints(kind: StructureKind) -> &'static [&'static str] {
    match kind {
        StructureKind::Array => &[
            "bubble | selection | insertion | merge | quick",
            "random",
            "set 5 3 8 1",
        ],
        StructureKind::Tree => &[
            "insert 45",
            "inorder | preorder | postorder | bfs",
            "random",
            "set 50 30 70",
        ],
        StructureKind::HashTable => &[
            "insert apple red",
            "search apple",
            "delete apple",
            "resize 7 | 10 | 15",
        ],
        StructureKind::Heap => &[
            "insert 42",
            "extract",
            "build",
            "sort",
            "toggle",
            "random",
        ],
        StructureKind::Graph => &[
            "dfs A | bfs A",
            "dijkstra A F",
            "node G",
            "edge A G 3",
            "remove-node G | remove-edge A B",
            "directed | weighted",
        ],
        StructureKind::Stack => &["push item", "pop", "peek"],
        StructureKind::Queue => &["enqueue item", "dequeue", "front"],
    }
}

fn takes_values(kind: StructureKind) -> bool {
    matches!(
        kind,
        StructureKind::Array | StructureKind::Tree | StructureKind::Heap
    )
}

fn unknown(verb: &str, structure: StructureKind) -> EngineError {
    invalid(format!("Unknown command '{}' for a {}", verb, structure))
}

fn parse_order(word: &str) -> Result<TraversalOrder, EngineError> {
    match word.to_ascii_lowercase().as_str() {
        "inorder" | "in-order" | "in" => Ok(TraversalOrder::Inorder),
        "preorder" | "pre-order" | "pre" => Ok(TraversalOrder::Preorder),
        "postorder" | "post-order" | "post" => Ok(TraversalOrder::Postorder),
        "bfs" | "level" | "levelorder" | "level-order" => Ok(TraversalOrder::Bfs),
        other => Err(invalid(format!("Unknown traversal order '{}'", other))),
    }
}

fn parse_graph(verb: &str, args: &[&str], graph: &Graph) -> Result<Command, EngineError> {
    let command = match verb {
        "dfs" => Command::Run(Operation::Dfs {
            start: graph.resolve(arg(args, 0, "start node")?)?,
        }),
        "bfs" => Command::Run(Operation::Bfs {
            start: graph.resolve(arg(args, 0, "start node")?)?,
        }),
        "dijkstra" | "path" => Command::Run(Operation::Dijkstra {
            start: graph.resolve(arg(args, 0, "start node")?)?,
            end: graph.resolve(arg(args, 1, "end node")?)?,
        }),
        "node" | "add-node" => Command::Edit(Edit::AddNode(arg(args, 0, "node label")?.to_string())),
        "edge" | "add-edge" => {
            let weight = match args.get(2) {
                Some(raw) => parse_value(raw)?,
                None => 1,
            };
            Command::Edit(Edit::AddEdge {
                source: arg(args, 0, "source node")?.to_string(),
                target: arg(args, 1, "target node")?.to_string(),
                weight,
            })
        }
        "remove-node" | "rm-node" => {
            Command::Edit(Edit::RemoveNode(arg(args, 0, "node label")?.to_string()))
        }
        "remove-edge" | "rm-edge" => Command::Edit(Edit::RemoveEdge {
            source: arg(args, 0, "source node")?.to_string(),
            target: arg(args, 1, "target node")?.to_string(),
        }),
        "directed" => Command::Edit(Edit::ToggleDirected),
        "weighted" => Command::Edit(Edit::ToggleWeighted),
        other => return Err(unknown(other, StructureKind::Graph)),
    };
    Ok(command)
}

/// Apply `edit` to `state`, returning a status line.
///
/// `params` supplies the random length and seed for [`Edit::Random`]; the
/// other creation parameters are taken from the current structure so a
/// resample keeps its table size, heap kind and graph flags.
pub fn apply_edit(state: &mut State, edit: &Edit, params: &InitParams) -> Result<String, EngineError> {
    let kind = state.kind();
    let mut fresh = InitParams {
        seed: Seed::Sample,
        ..params.clone()
    };
    match state {
        State::HashTable(table) => fresh.table_size = table.size(),
        State::Heap(heap) => fresh.heap_kind = heap.kind(),
        State::Graph(graph) => {
            fresh.directed = graph.is_directed();
            fresh.weighted = graph.is_weighted();
        }
        _ => {}
    }

    let reseed = match edit {
        Edit::Sample => Some(Seed::Sample),
        Edit::Clear => Some(Seed::Empty),
        Edit::Random if takes_values(kind) => Some(Seed::Random),
        Edit::SetValues(values) if takes_values(kind) => Some(Seed::Values(values.clone())),
        _ => None,
    };
    if let Some(seed) = reseed {
        let message = match &seed {
            Seed::Sample => format!("Loaded the sample {}", kind),
            Seed::Empty => format!("Cleared the {}", kind),
            Seed::Random => format!("Generated a random {}", kind),
            Seed::Values(values) => format!("Loaded {} values", values.len()),
        };
        fresh.seed = seed;
        *state = create_initial_state(kind, &fresh)?;
        tracing::debug!(structure = %kind, ?edit, "structure rebuilt");
        return Ok(message);
    }

    let message = match (edit, state) {
        (Edit::ToggleHeapKind, State::Heap(heap)) => {
            heap.set_kind(heap.kind().toggled());
            format!("Switched to a {}-heap; run build to restore heap order", heap.kind().name())
        }
        (Edit::AddNode(label), State::Graph(graph)) => {
            let id = graph.add_node(label)?;
            format!("Added node {} ({})", label, id)
        }
        (
            Edit::AddEdge {
                source,
                target,
                weight,
            },
            State::Graph(graph),
        ) => {
            let (s, t) = (graph.resolve(source)?, graph.resolve(target)?);
            graph.add_edge(s, t, *weight)?;
            format!("Added edge {} - {}", source, target)
        }
        (Edit::RemoveNode(label), State::Graph(graph)) => {
            let id = graph.resolve(label)?;
            graph.remove_node(id)?;
            format!("Removed node {} and its edges", label)
        }
        (Edit::RemoveEdge { source, target }, State::Graph(graph)) => {
            let (s, t) = (graph.resolve(source)?, graph.resolve(target)?);
            graph.remove_edge(s, t)?;
            format!("Removed edge {} - {}", source, target)
        }
        (Edit::ToggleDirected, State::Graph(graph)) => {
            graph.set_directed(!graph.is_directed());
            let word = if graph.is_directed() { "directed" } else { "undirected" };
            format!("Graph is now {}", word)
        }
        (Edit::ToggleWeighted, State::Graph(graph)) => {
            graph.set_weighted(!graph.is_weighted());
            let word = if graph.is_weighted() { "weighted" } else { "unweighted" };
            format!("Graph is now {}", word)
        }
        (edit, _) => {
            return Err(invalid(format!("{:?} does not apply to a {}", edit, kind)));
        }
    };
    tracing::debug!(structure = %kind, ?edit, "edit applied");
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::graph::NodeId;
    use crate::structures::{ArrayState, HashTable};

    #[test]
    fn test_array_sort_shorthand() {
        let state = State::Array(ArrayState::default());
        assert_eq!(
            parse_command("quick", &state).unwrap(),
            Command::Run(Operation::Sort(SortAlgorithm::Quick))
        );
        assert_eq!(
            parse_command("sort merge", &state).unwrap(),
            Command::Run(Operation::Sort(SortAlgorithm::Merge))
        );
    }

    #[test]
    fn test_hash_insert_joins_value() {
        let state = State::HashTable(HashTable::new(10).unwrap());
        assert_eq!(
            parse_command("insert pear green fruit", &state).unwrap(),
            Command::Run(Operation::HashInsert {
                key: "pear".to_string(),
                value: "green fruit".to_string(),
            })
        );
    }

    #[test]
    fn test_graph_labels_resolved() {
        let state = State::Graph(Graph::sample(false, true));
        assert_eq!(
            parse_command("dijkstra A F", &state).unwrap(),
            Command::Run(Operation::Dijkstra {
                start: NodeId(1),
                end: NodeId(6),
            })
        );
        assert!(matches!(
            parse_command("dfs Q", &state),
            Err(EngineError::UnknownNode { .. })
        ));
    }

    #[test]
    fn test_non_numeric_value() {
        let state = State::Tree(crate::structures::Bst::new());
        assert_eq!(
            parse_command("insert ten", &state),
            Err(EngineError::NotANumber {
                input: "ten".to_string()
            })
        );
    }

    #[test]
    fn test_edit_add_edge_and_toggle() {
        let mut state = State::Graph(Graph::new(false, true));
        let params = InitParams::default();
        apply_edit(&mut state, &Edit::AddNode("X".into()), &params).unwrap();
        apply_edit(&mut state, &Edit::AddNode("Y".into()), &params).unwrap();
        let edge = Edit::AddEdge {
            source: "X".into(),
            target: "Y".into(),
            weight: 3,
        };
        apply_edit(&mut state, &edge, &params).unwrap();
        assert!(matches!(
            apply_edit(&mut state, &edge, &params),
            Err(EngineError::DuplicateEdge { .. })
        ));
        apply_edit(&mut state, &Edit::ToggleDirected, &params).unwrap();
        let State::Graph(graph) = &state else {
            panic!("expected a graph");
        };
        assert!(graph.is_directed());
        assert_eq!(graph.edges().len(), 1);
    }

    #[test]
    fn test_clear_keeps_table_size() {
        let mut state = State::HashTable(HashTable::sample(7).unwrap());
        apply_edit(&mut state, &Edit::Clear, &InitParams::default()).unwrap();
        let State::HashTable(table) = &state else {
            panic!("expected a hash table");
        };
        assert_eq!(table.size(), 7);
        assert!(table.is_empty());
    }

    #[test]
    fn test_random_rejected_for_graph() {
        let mut state = State::Graph(Graph::sample(false, true));
        assert!(apply_edit(&mut state, &Edit::Random, &InitParams::default()).is_err());
    }
}
