//! Stack and queue steppers

use crate::engine::errors::EngineError;
use crate::step::{Outcome, Step, Target};
use crate::structures::linear::{Discipline, Linear};
use crate::structures::StructureKind;

fn structure_kind(linear: &Linear) -> StructureKind {
    match linear.discipline() {
        Discipline::Lifo => StructureKind::Stack,
        Discipline::Fifo => StructureKind::Queue,
    }
}

pub fn push(linear: &Linear, value: &str) -> Result<Vec<Step>, EngineError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(EngineError::EmptyInput { field: "Item" });
    }
    Ok(vec![
        Step::Push {
            value: value.to_string(),
        },
        Step::Unhighlight(Target::Index(linear.len())),
    ])
}

pub fn pop(linear: &Linear) -> Result<Vec<Step>, EngineError> {
    let (index, value) = exit(linear, "pop from")?;
    Ok(vec![
        Step::Highlight(Target::Index(index)),
        Step::Report(Outcome::Popped { value }),
        Step::Pop,
    ])
}

pub fn peek(linear: &Linear) -> Result<Vec<Step>, EngineError> {
    let (index, value) = exit(linear, "peek at")?;
    Ok(vec![
        Step::Highlight(Target::Index(index)),
        Step::Report(Outcome::Peeked { value }),
        Step::ClearHighlights,
    ])
}

fn exit(linear: &Linear, operation: &'static str) -> Result<(usize, String), EngineError> {
    linear
        .exit_index()
        .map(|i| (i, linear.items()[i].value.clone()))
        .ok_or(EngineError::EmptyStructure {
            operation,
            structure: structure_kind(linear),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_pop_targets_front() {
        let mut queue = Linear::queue();
        queue.push("a");
        queue.push("b");
        let steps = pop(&queue).unwrap();
        assert_eq!(steps[0], Step::Highlight(Target::Index(0)));
        assert_eq!(
            steps[1],
            Step::Report(Outcome::Popped {
                value: "a".to_string()
            })
        );
    }

    #[test]
    fn test_stack_peek_targets_top() {
        let mut stack = Linear::stack();
        stack.push("a");
        stack.push("b");
        let steps = peek(&stack).unwrap();
        assert_eq!(steps[0], Step::Highlight(Target::Index(1)));
    }

    #[test]
    fn test_empty_errors() {
        assert!(matches!(
            pop(&Linear::stack()),
            Err(EngineError::EmptyStructure {
                structure: StructureKind::Stack,
                ..
            })
        ));
        assert_eq!(
            push(&Linear::queue(), " "),
            Err(EngineError::EmptyInput { field: "Item" })
        );
    }
}
