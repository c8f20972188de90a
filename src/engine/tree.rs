//! Binary search tree steppers: insert and the four traversals

use crate::engine::errors::EngineError;
use crate::step::{Outcome, Step, Target};
use crate::structures::bst::{Bst, TraversalOrder};
use crate::structures::StructureKind;

/// Highlight the descent path, then insert or report the duplicate
pub fn insert(tree: &Bst, value: i64) -> Vec<Step> {
    let (path, found) = tree.search_path(value);
    let mut steps: Vec<Step> = path
        .into_iter()
        .map(|v| Step::Highlight(Target::TreeNode(v)))
        .collect();
    steps.push(if found {
        Step::Report(Outcome::Duplicate { value })
    } else {
        Step::NodeInsert { value }
    });
    steps.push(Step::ClearHighlights);
    steps
}

/// `Reset`, one `Visit` per node in `order`, `ClearHighlights`
pub fn traverse(tree: &Bst, order: TraversalOrder) -> Result<Vec<Step>, EngineError> {
    if tree.is_empty() {
        return Err(EngineError::EmptyStructure {
            operation: "traverse",
            structure: StructureKind::Tree,
        });
    }
    let mut steps = vec![Step::Reset];
    steps.extend(
        tree.traversal(order)
            .into_iter()
            .map(|v| Step::Visit(Target::TreeNode(v))),
    );
    steps.push(Step::ClearHighlights);
    Ok(steps)
}
