//! Main TUI application state and logic

use crate::command::{apply_edit, parse_command, Command};
use crate::driver::Driver;
use crate::engine::errors::EngineError;
use crate::engine::{narrate_outcome, Operation};
use crate::structures::InitParams;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Bounds for the autoplay interval adjusted with `+` and `-`
const MIN_PLAY_INTERVAL: Duration = Duration::from_millis(10);
const MAX_PLAY_INTERVAL: Duration = Duration::from_secs(5);

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Structure,
    Log,
    Info,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: structure -> log -> info)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Structure => FocusedPane::Log,
            FocusedPane::Log => FocusedPane::Info,
            FocusedPane::Info => FocusedPane::Structure,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Structure => FocusedPane::Info,
            FocusedPane::Log => FocusedPane::Structure,
            FocusedPane::Info => FocusedPane::Log,
        }
    }
}

/// Whether keys drive the run or edit the command prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,
}

/// The main application state
pub struct App {
    /// Owns the structure and paces the current run
    pub driver: Driver,

    /// Creation parameters reused by `random`, `sample` and `clear`
    pub init: InitParams,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub structure_scroll: usize,
    pub log_scroll: usize,
    pub info_scroll: usize,

    pub input_mode: InputMode,
    pub input_buffer: String,
    /// Last submitted prompt line, recalled with ↑
    pub last_input: Option<String>,

    /// Operation re-run by `r`
    pub last_operation: Option<Operation>,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
    pub status_is_error: bool,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Delay between steps in play mode
    pub play_interval: Duration,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app around `driver`, playing one step every `speed_ms`
    pub fn new(driver: Driver, init: InitParams, speed_ms: u64) -> Self {
        App {
            driver,
            init,
            focused_pane: FocusedPane::Structure,
            structure_scroll: 0,
            log_scroll: 0,
            info_scroll: 0,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            last_input: None,
            last_operation: None,
            should_quit: false,
            status_message: String::from("Ready! Press : to enter a command"),
            status_is_error: false,
            is_playing: false,
            play_interval: Duration::from_millis(speed_ms)
                .clamp(MIN_PLAY_INTERVAL, MAX_PLAY_INTERVAL),
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Handle auto-play mode
            if self.is_playing && self.last_play_time.elapsed() >= self.play_interval {
                self.play_tick();
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Create layout: structure on the left, log and info on the right,
        // plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(pane_area);

        // Right column: Log (top) | Info (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(columns[1]);

        super::panes::render_structure_pane(
            frame,
            columns[0],
            self.driver.state(),
            self.focused_pane == FocusedPane::Structure,
            &mut self.structure_scroll,
        );

        super::panes::render_log_pane(
            frame,
            right_rows[0],
            self.driver.applied_narration(),
            self.driver.total_steps(),
            self.focused_pane == FocusedPane::Log,
            &mut self.log_scroll,
        );

        super::panes::render_info_pane(
            frame,
            right_rows[1],
            super::panes::InfoRenderData {
                state: self.driver.state(),
                operation: self.driver.operation(),
                outcome: self.driver.outcome(),
                history_memory: self.driver.history_memory(),
                history_warning: self.driver.history_warning(),
            },
            self.focused_pane == FocusedPane::Info,
            &mut self.info_scroll,
        );

        // Render status bar
        super::panes::render_status_bar(
            frame,
            status_area,
            super::panes::StatusRenderData {
                message: &self.status_message,
                position: self.driver.position(),
                total_steps: self.driver.total_steps(),
                is_playing: self.is_playing,
                prompt: (self.input_mode == InputMode::Command)
                    .then_some(self.input_buffer.as_str()),
                is_error: self.status_is_error,
            },
        );
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_is_error = false;
    }

    fn set_error(&mut self, error: &EngineError) {
        tracing::debug!(error = %error, category = ?error.category(), "command rejected");
        self.status_message = format!("Error: {}", error);
        self.status_is_error = true;
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        if self.input_mode == InputMode::Command {
            self.handle_prompt_key(key);
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char(':') | KeyCode::Char('/') => {
                self.is_playing = false;
                self.input_mode = InputMode::Command;
                self.input_buffer.clear();
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.rerun();
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let mut stepped = 0;
                for _ in 0..n {
                    if self.driver.step_forward().is_ok() {
                        stepped += 1;
                    } else {
                        break;
                    }
                }
                self.set_status(format!("Stepped forward {} step(s)", stepped));
                self.log_scroll = usize::MAX;
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.play_interval = (self.play_interval / 2).max(MIN_PLAY_INTERVAL);
                self.set_status(format!("Speed: {} ms per step", self.play_interval.as_millis()));
            }
            KeyCode::Char('-') => {
                self.play_interval = (self.play_interval * 2).min(MAX_PLAY_INTERVAL);
                self.set_status(format!("Speed: {} ms per step", self.play_interval.as_millis()));
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.step_backward();
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.step_forward();
            }
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.toggle_play();
                }
            }
            KeyCode::Enter => {
                // Jump to end of the run
                self.is_playing = false;
                match self.driver.jump_to_end() {
                    Ok(applied) => {
                        self.set_status(format!("Jumped to end ({} steps applied)", applied));
                        self.announce_outcome();
                    }
                    Err(e) => self.set_error(&e),
                }
                self.log_scroll = usize::MAX;
            }
            KeyCode::Backspace => {
                // Jump to start of the run
                self.is_playing = false;
                match self.driver.rewind_to_start() {
                    Ok(()) => self.set_status("Jumped to start"),
                    Err(e) => self.set_error(&e),
                }
                self.log_scroll = 0;
            }
            KeyCode::Esc => {
                self.is_playing = false;
            }
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
                self.set_status("Command cancelled");
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                let line = std::mem::take(&mut self.input_buffer);
                if !line.trim().is_empty() {
                    self.last_input = Some(line.clone());
                    self.submit_command(&line);
                }
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Up => {
                if let Some(previous) = &self.last_input {
                    self.input_buffer = previous.clone();
                }
            }
            KeyCode::Char(c) => {
                self.input_buffer.push(c);
            }
            _ => {}
        }
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Structure => &mut self.structure_scroll,
            FocusedPane::Log => &mut self.log_scroll,
            FocusedPane::Info => &mut self.info_scroll,
        }
    }

    /// Parse and execute one prompt line against the current structure
    pub fn submit_command(&mut self, line: &str) {
        let command = match parse_command(line, self.driver.state()) {
            Ok(command) => command,
            Err(e) => {
                self.set_error(&e);
                return;
            }
        };
        match command {
            Command::Run(operation) => self.start(operation),
            Command::Edit(edit) => {
                let init = self.init.clone();
                match self.driver.edit(|state| apply_edit(state, &edit, &init)) {
                    Ok(message) => {
                        self.set_status(message);
                        self.structure_scroll = 0;
                        self.log_scroll = 0;
                    }
                    Err(e) => self.set_error(&e),
                }
            }
        }
    }

    /// Start `operation` and begin playing it
    fn start(&mut self, operation: Operation) {
        match self.driver.start(operation.clone()) {
            Ok(0) => {
                self.set_status(format!("{}: nothing to do", operation));
                self.last_operation = Some(operation);
            }
            Ok(total) => {
                self.set_status(format!("Running {} ({} steps)", operation, total));
                self.last_operation = Some(operation);
                self.log_scroll = 0;
                self.is_playing = true;
                self.last_play_time = Instant::now();
            }
            Err(e) => self.set_error(&e),
        }
    }

    fn rerun(&mut self) {
        match self.last_operation.clone() {
            Some(operation) => self.start(operation),
            None => self.set_status("Nothing to re-run yet"),
        }
    }

    fn toggle_play(&mut self) {
        if !self.is_playing && !self.driver.is_running() {
            self.set_status("Nothing to play; start an operation with :");
            return;
        }
        self.is_playing = !self.is_playing;
        if self.is_playing {
            self.last_play_time = Instant::now()
                .checked_sub(self.play_interval)
                .unwrap_or(Instant::now());
            self.set_status("Playing...");
        } else {
            self.set_status("Paused");
        }
    }

    /// One autoplay step
    fn play_tick(&mut self) {
        if self.driver.step_forward().is_ok() {
            self.log_scroll = usize::MAX;
        }
        if !self.driver.is_running() {
            self.is_playing = false;
            self.set_status("Playback complete");
            self.announce_outcome();
        }
    }

    fn announce_outcome(&mut self) {
        if let Some(outcome) = self.driver.outcome() {
            self.status_message = narrate_outcome(self.driver.state(), outcome);
        }
    }

    /// Step forward in the run
    fn step_forward(&mut self) {
        match self.driver.step_forward() {
            Ok(_) => {
                self.set_status("Stepped forward");
                if !self.driver.is_running() {
                    self.announce_outcome();
                }
                // Auto-scroll log to bottom
                self.log_scroll = usize::MAX;
            }
            Err(e) => self.set_error(&e),
        }
    }

    /// Step backward in the run
    fn step_backward(&mut self) {
        match self.driver.step_backward() {
            Ok(()) => {
                self.set_status("Stepped backward");
                self.log_scroll = usize::MAX;
            }
            Err(e) => self.set_error(&e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::DEFAULT_HISTORY_LIMIT;
    use crate::structures::{create_initial_state, StructureKind};
    use crossterm::event::KeyModifiers;

    fn app(kind: StructureKind) -> App {
        let init = InitParams::default();
        let state = create_initial_state(kind, &init).unwrap();
        App::new(Driver::new(state, DEFAULT_HISTORY_LIMIT), init, 100)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_line(app: &mut App, line: &str) {
        press(app, KeyCode::Char(':'));
        for c in line.chars() {
            press(app, KeyCode::Char(c));
        }
        press(app, KeyCode::Enter);
    }

    #[test]
    fn test_prompt_starts_run_and_plays() {
        let mut app = app(StructureKind::Array);
        type_line(&mut app, "bubble");
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.driver.is_running());
        assert!(app.is_playing);
        assert!(app.status_message.starts_with("Running Bubble Sort"));
    }

    #[test]
    fn test_enter_jumps_to_end() {
        let mut app = app(StructureKind::Heap);
        type_line(&mut app, "extract");
        press(&mut app, KeyCode::Enter);
        assert!(!app.driver.is_running());
        assert_eq!(app.status_message, "Extraction complete. Extracted value: 90");
    }

    #[test]
    fn test_busy_is_reported() {
        let mut app = app(StructureKind::Array);
        type_line(&mut app, "quick");
        type_line(&mut app, "merge");
        assert!(app.status_is_error);
        assert_eq!(app.status_message, "Error: Busy: sort is still running");
    }

    #[test]
    fn test_bad_command_is_error() {
        let mut app = app(StructureKind::Tree);
        type_line(&mut app, "insert pear");
        assert!(app.status_is_error);
        assert!(!app.driver.is_running());
    }

    #[test]
    fn test_edit_between_runs() {
        let mut app = app(StructureKind::Stack);
        type_line(&mut app, "clear");
        assert!(app.driver.state().is_empty());
        assert!(!app.status_is_error);
    }

    #[test]
    fn test_number_keys_and_rewind() {
        let mut app = app(StructureKind::Array);
        type_line(&mut app, "selection");
        press(&mut app, KeyCode::Char('3'));
        assert!(!app.is_playing);
        assert_eq!(app.driver.position(), 3);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.driver.position(), 2);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.driver.position(), 0);
    }

    #[test]
    fn test_rerun_repeats_last_operation() {
        let mut app = app(StructureKind::Queue);
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.status_message, "Nothing to re-run yet");
        type_line(&mut app, "dequeue");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.last_operation, Some(Operation::Pop));
        assert!(app.driver.is_running());
    }

    #[test]
    fn test_escape_cancels_prompt() {
        let mut app = app(StructureKind::Graph);
        press(&mut app, KeyCode::Char(':'));
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.input_buffer.is_empty());
        assert!(!app.driver.is_running());
    }

    #[test]
    fn test_focus_cycles() {
        let mut app = app(StructureKind::Array);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Log);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Info);
    }
}
