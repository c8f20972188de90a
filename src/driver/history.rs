// State history for backward navigation within a run

use crate::engine::errors::EngineError;
use crate::structures::State;

/// Cached states of the current run; index `i` holds the state after `i`
/// steps. The cache is always a prefix of the run: once the memory limit is
/// hit, later states are recomputed from the log instead of stored.
#[derive(Debug)]
pub struct History {
    states: Vec<State>,
    max_memory: usize,
    current_memory: usize,
}

impl History {
    pub fn new(max_memory: usize) -> Self {
        History {
            states: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Cache the state following the last cached one
    pub fn push(&mut self, state: State) -> Result<(), EngineError> {
        let size = state.estimated_size();

        if self.current_memory + size > self.max_memory {
            return Err(EngineError::HistoryLimitExceeded {
                current: self.current_memory + size,
                limit: self.max_memory,
            });
        }

        self.current_memory += size;
        self.states.push(state);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&State> {
        self.states.get(index)
    }

    /// Latest cached state at or before `index`
    pub fn nearest(&self, index: usize) -> Option<(usize, &State)> {
        let last = self.states.len().checked_sub(1)?;
        let at = index.min(last);
        Some((at, &self.states[at]))
    }

    pub fn clear(&mut self) {
        self.states.clear();
        self.current_memory = 0;
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}
