//! Driver: paces one structure instance through an operation's steps
//!
//! The driver owns the state, the step log of the current run, and the
//! `Idle → Running → Idle` flag that keeps a second operation from starting
//! while one is in progress. Hosts call [`Driver::step_forward`] at their own
//! pace (a timer, a key press); suspension only ever happens between steps.
//!
//! Every state reached during a run is cached in a [`History`] so the host
//! can also move backward. The state a run started from is kept outside that
//! budget, so backward moves work even when nothing else fits. Stepping back from a finished run re-enters
//! `Running` at the earlier position; the run is over again once its last
//! step is reapplied.

pub mod history;

use crate::engine::errors::EngineError;
use crate::engine::{narrate, run, Operation};
use crate::step::{Outcome, Step};
use crate::structures::State;
use history::History;

/// Default history budget: 64 MiB
pub const DEFAULT_HISTORY_LIMIT: usize = 64 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
}

#[derive(Debug)]
pub struct Driver {
    state: State,
    phase: Phase,
    operation: Option<Operation>,
    log: Vec<Step>,
    narration: Vec<String>,
    /// State before the first step of the current run
    start_state: State,
    /// Number of log steps applied to `state`
    position: usize,
    history: History,
    /// Set once the history budget runs out for the current run
    history_warning: Option<EngineError>,
}

impl Driver {
    pub fn new(state: State, history_limit: usize) -> Self {
        Driver {
            start_state: state.clone(),
            state,
            phase: Phase::Idle,
            operation: None,
            log: Vec::new(),
            narration: Vec::new(),
            position: 0,
            history: History::new(history_limit),
            history_warning: None,
        }
    }

    /// Begin a run of `operation`, returning its step count.
    ///
    /// Rejected with `Busy` while another run is in progress. On any error
    /// the state and the previous log are left as they were.
    pub fn start(&mut self, operation: Operation) -> Result<usize, EngineError> {
        if let (Phase::Running, Some(current)) = (self.phase, &self.operation) {
            return Err(EngineError::Busy {
                operation: current.name(),
            });
        }
        let steps = run(&self.state, &operation)?;

        let mut scratch = self.state.clone();
        self.narration = steps
            .iter()
            .map(|step| {
                let line = narrate(&scratch, step);
                scratch.apply_mut(step);
                line
            })
            .collect();

        self.history.clear();
        self.history_warning = None;
        self.start_state = self.state.clone();
        self.cache(self.state.clone());

        tracing::info!(op = %operation, steps = steps.len(), "run started");
        self.log = steps;
        self.position = 0;
        self.operation = Some(operation);
        self.phase = if self.log.is_empty() {
            Phase::Idle
        } else {
            Phase::Running
        };
        Ok(self.log.len())
    }

    /// Apply the next step of the run
    pub fn step_forward(&mut self) -> Result<&Step, EngineError> {
        let index = self.position;
        if index >= self.log.len() {
            return Err(EngineError::NoMoreSteps);
        }
        match self.history.get(index + 1) {
            Some(cached) => self.state = cached.clone(),
            None => {
                self.state.apply_mut(&self.log[index]);
                if self.history.len() == index + 1 && self.history_warning.is_none() {
                    self.cache(self.state.clone());
                }
            }
        }
        tracing::trace!(position = index + 1, step = ?self.log[index], "step applied");
        self.position = index + 1;
        if self.position == self.log.len() {
            self.phase = Phase::Idle;
            tracing::debug!(outcome = ?self.outcome(), "run finished");
        }
        Ok(&self.log[index])
    }

    /// Undo the last applied step
    pub fn step_backward(&mut self) -> Result<(), EngineError> {
        if self.position == 0 {
            return Err(EngineError::NothingToRewind);
        }
        self.seek(self.position - 1)
    }

    /// Return to the state the run started from
    pub fn rewind_to_start(&mut self) -> Result<(), EngineError> {
        if self.position == 0 {
            return Err(EngineError::NothingToRewind);
        }
        self.seek(0)
    }

    /// Apply every remaining step; returns how many were applied
    pub fn jump_to_end(&mut self) -> Result<usize, EngineError> {
        let remaining = self.log.len() - self.position;
        if remaining == 0 {
            return Err(EngineError::NoMoreSteps);
        }
        while self.position < self.log.len() {
            self.step_forward()?;
        }
        Ok(remaining)
    }

    /// Run to completion and return the outcome, if the operation has one
    pub fn finish(&mut self) -> Option<&Outcome> {
        while self.step_forward().is_ok() {}
        self.outcome()
    }

    /// Modify the structure between runs.
    ///
    /// The edit works on a copy that replaces the state only on success, so a
    /// failed edit leaves everything untouched. A successful edit ends the
    /// previous run's history.
    pub fn edit<T, F>(&mut self, edit: F) -> Result<T, EngineError>
    where
        F: FnOnce(&mut State) -> Result<T, EngineError>,
    {
        if let (Phase::Running, Some(current)) = (self.phase, &self.operation) {
            return Err(EngineError::Busy {
                operation: current.name(),
            });
        }
        let mut draft = self.state.clone();
        let result = edit(&mut draft)?;
        self.state = draft;
        self.forget_run();
        Ok(result)
    }

    /// Swap in a fresh structure; refused while running
    pub fn replace_state(&mut self, state: State) -> Result<(), EngineError> {
        self.edit(|current| {
            *current = state;
            Ok(())
        })
    }

    fn forget_run(&mut self) {
        self.operation = None;
        self.log.clear();
        self.narration.clear();
        self.position = 0;
        self.history.clear();
        self.history_warning = None;
    }

    fn cache(&mut self, state: State) {
        if let Err(e) = self.history.push(state) {
            tracing::warn!(error = %e, "history limit reached; later states will be recomputed");
            self.history_warning = Some(e);
        }
    }

    /// Move to `target` applied steps, restoring from the nearest cached state
    /// or, with nothing cached, from the start of the run
    fn seek(&mut self, target: usize) -> Result<(), EngineError> {
        let (base, mut state) = match self.history.nearest(target) {
            Some((base, cached)) => (base, cached.clone()),
            None => (0, self.start_state.clone()),
        };
        for step in &self.log[base..target] {
            state.apply_mut(step);
        }
        self.state = state;
        self.position = target;
        self.phase = if target < self.log.len() {
            Phase::Running
        } else {
            Phase::Idle
        };
        Ok(())
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn operation(&self) -> Option<&Operation> {
        self.operation.as_ref()
    }

    /// Every step of the current run, applied or not
    pub fn log(&self) -> &[Step] {
        &self.log
    }

    /// One narration line per step of the current run
    pub fn narration(&self) -> &[String] {
        &self.narration
    }

    /// Narration of the steps applied so far
    pub fn applied_narration(&self) -> &[String] {
        &self.narration[..self.position]
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn total_steps(&self) -> usize {
        self.log.len()
    }

    /// Outcome of the most recent `Report` among the applied steps
    pub fn outcome(&self) -> Option<&Outcome> {
        self.log[..self.position].iter().rev().find_map(Step::outcome)
    }

    pub fn history_warning(&self) -> Option<&EngineError> {
        self.history_warning.as_ref()
    }

    pub fn history_memory(&self) -> (usize, usize) {
        (self.history.memory_usage(), self.history.memory_limit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SortAlgorithm;
    use crate::structures::heap::{HeapKind, HeapState};
    use crate::structures::ArrayState;

    fn array_driver(values: Vec<i64>) -> Driver {
        Driver::new(State::Array(ArrayState::new(values)), DEFAULT_HISTORY_LIMIT)
    }

    #[test]
    fn test_busy_while_running() {
        let mut driver = array_driver(vec![3, 1, 2]);
        driver.start(Operation::Sort(SortAlgorithm::Bubble)).unwrap();
        assert!(driver.is_running());
        assert_eq!(
            driver.start(Operation::Sort(SortAlgorithm::Quick)),
            Err(EngineError::Busy { operation: "sort" })
        );
        assert!(matches!(
            driver.edit(|_| Ok(())),
            Err(EngineError::Busy { .. })
        ));
    }

    #[test]
    fn test_completion_returns_to_idle() {
        let mut driver = array_driver(vec![3, 1, 2]);
        let total = driver.start(Operation::Sort(SortAlgorithm::Insertion)).unwrap();
        for _ in 0..total {
            driver.step_forward().unwrap();
        }
        assert_eq!(driver.phase(), Phase::Idle);
        assert_eq!(driver.step_forward(), Err(EngineError::NoMoreSteps));
        let State::Array(array) = driver.state() else {
            panic!("expected an array");
        };
        assert_eq!(array.values(), &[1, 2, 3]);
    }

    #[test]
    fn test_backward_then_forward_is_identical() {
        let mut driver = array_driver(vec![5, 4, 3, 2, 1]);
        driver.start(Operation::Sort(SortAlgorithm::Selection)).unwrap();
        driver.step_forward().unwrap();
        driver.step_forward().unwrap();
        let after_two = driver.state().clone();
        driver.step_forward().unwrap();
        driver.step_backward().unwrap();
        assert_eq!(driver.state(), &after_two);
        driver.rewind_to_start().unwrap();
        assert_eq!(driver.position(), 0);
        assert_eq!(driver.step_backward(), Err(EngineError::NothingToRewind));
    }

    #[test]
    fn test_failed_start_leaves_state() {
        let mut driver = Driver::new(
            State::Heap(HeapState::new(HeapKind::Max, Vec::new())),
            DEFAULT_HISTORY_LIMIT,
        );
        let before = driver.state().clone();
        assert!(driver.start(Operation::HeapExtract).is_err());
        assert_eq!(driver.state(), &before);
        assert_eq!(driver.phase(), Phase::Idle);
    }

    #[test]
    fn test_tiny_history_still_navigates() {
        let state = State::Array(ArrayState::new(vec![4, 3, 2, 1]));
        let limit = state.estimated_size();
        let mut driver = Driver::new(state, limit);
        driver.start(Operation::Sort(SortAlgorithm::Bubble)).unwrap();
        driver.step_forward().unwrap();
        assert!(matches!(
            driver.history_warning(),
            Some(EngineError::HistoryLimitExceeded { .. })
        ));
        driver.step_forward().unwrap();
        let expected = driver.state().clone();
        driver.step_forward().unwrap();
        driver.step_backward().unwrap();
        assert_eq!(driver.state(), &expected);
    }

    #[test]
    fn test_zero_history_limit_still_navigates() {
        let start = State::Array(ArrayState::new(vec![3, 2, 1]));
        let mut driver = Driver::new(start.clone(), 0);
        driver.start(Operation::Sort(SortAlgorithm::Bubble)).unwrap();
        assert!(matches!(
            driver.history_warning(),
            Some(EngineError::HistoryLimitExceeded { .. })
        ));
        assert_eq!(driver.history_memory().0, 0);

        driver.step_forward().unwrap();
        let after_one = driver.state().clone();
        driver.step_forward().unwrap();
        driver.step_backward().unwrap();
        assert_eq!(driver.state(), &after_one);
        assert_eq!(driver.position(), 1);

        driver.rewind_to_start().unwrap();
        assert_eq!(driver.state(), &start);
        assert_eq!(driver.position(), 0);
        assert!(driver.is_running());

        let total = driver.total_steps();
        assert_eq!(driver.jump_to_end(), Ok(total));
        let State::Array(array) = driver.state() else {
            panic!("expected an array");
        };
        assert_eq!(array.values(), &[1, 2, 3]);
    }

    #[test]
    fn test_outcome_follows_position() {
        let mut driver = Driver::new(
            State::Heap(HeapState::sample(HeapKind::Max)),
            DEFAULT_HISTORY_LIMIT,
        );
        driver.start(Operation::HeapExtract).unwrap();
        assert_eq!(driver.finish(), Some(&Outcome::Extracted { value: 90 }));
        driver.rewind_to_start().unwrap();
        assert_eq!(driver.outcome(), None);
        assert!(driver.is_running());
    }
}
