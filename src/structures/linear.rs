//! Stack and queue state
//!
//! Both are a `Vec<Item>` whose back is the insertion end. They differ only
//! in which end is removed: the back for a stack, the front for a queue.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discipline {
    Lifo,
    Fifo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub value: String,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Linear {
    items: Vec<Item>,
    discipline: Discipline,
}

impl Linear {
    pub fn stack() -> Self {
        Linear::new(Discipline::Lifo)
    }

    pub fn queue() -> Self {
        Linear::new(Discipline::Fifo)
    }

    pub fn new(discipline: Discipline) -> Self {
        Linear {
            items: Vec::new(),
            discipline,
        }
    }

    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the element the next pop or peek would touch
    pub fn exit_index(&self) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }
        Some(match self.discipline {
            Discipline::Lifo => self.items.len() - 1,
            Discipline::Fifo => 0,
        })
    }

    pub fn peek(&self) -> Option<&str> {
        self.exit_index().map(|i| self.items[i].value.as_str())
    }

    /// Append a highlighted item at the back
    pub fn push(&mut self, value: &str) {
        self.items.push(Item {
            value: value.to_string(),
            highlighted: true,
        });
    }

    pub fn pop(&mut self) -> Option<Item> {
        let index = self.exit_index()?;
        Some(self.items.remove(index))
    }

    pub fn set_highlight(&mut self, index: usize, highlighted: bool) {
        if let Some(item) = self.items.get_mut(index) {
            item.highlighted = highlighted;
        }
    }

    pub fn clear_highlights(&mut self) {
        for item in &mut self.items {
            item.highlighted = false;
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl fmt::Display for Linear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (open, close) = match self.discipline {
            Discipline::Lifo => ("bottom |", "| top"),
            Discipline::Fifo => ("front <", "< rear"),
        };
        write!(f, "{}", open)?;
        for item in &self.items {
            write!(f, " {}", item.value)?;
        }
        write!(f, " {}", close)
    }
}
