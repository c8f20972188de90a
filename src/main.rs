// algoviz: step-by-step data structure and algorithm visualizer

use std::io;
use std::path::Path;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use algoviz::command::{apply_edit, parse_command, Command};
use algoviz::config::{usage, Config, ConfigError};
use algoviz::driver::Driver;
use algoviz::engine::narrate_outcome;
use algoviz::logging;
use algoviz::structures::create_initial_state;
use algoviz::ui::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let program_name = std::env::args()
        .next()
        .and_then(|arg| {
            Path::new(&arg)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "algoviz".to_string());

    // Parse command-line arguments
    let config = match Config::load(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(ConfigError::HelpRequested) => {
            println!("{}", usage(&program_name));
            return Ok(());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("{}", usage(&program_name));
            std::process::exit(1);
        }
    };

    if let Some(path) = &config.log_file {
        if let Err(e) = logging::init(path) {
            eprintln!("Warning: cannot log to '{}': {}", path.display(), e);
        }
    }
    tracing::info!(structure = %config.structure, plain = config.plain, "starting");

    let state = match create_initial_state(config.structure, &config.init) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let mut driver = Driver::new(state, config.history_limit);

    // Run the command given on the command line, if any
    if let Some(line) = &config.command {
        let result = parse_command(line, driver.state()).and_then(|command| match command {
            Command::Run(operation) => driver.start(operation).map(|_| ()),
            Command::Edit(edit) => driver
                .edit(|state| apply_edit(state, &edit, &config.init))
                .map(|message| {
                    if config.plain {
                        println!("{}", message);
                    }
                }),
        });
        if let Err(e) = result {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    if config.plain {
        print_run(&mut driver);
        return Ok(());
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let has_run = driver.is_running();
    let mut app = App::new(driver, config.init.clone(), config.speed_ms);
    if has_run {
        app.is_playing = true;
    }
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Print the narrated run, then the final structure
fn print_run(driver: &mut Driver) {
    if let Some(operation) = driver.operation() {
        println!("== {} ({} steps) ==", operation, driver.total_steps());
    }
    while driver.step_forward().is_ok() {
        let position = driver.position();
        if let Some(line) = driver.narration().get(position - 1) {
            println!("{:>4}  {}", position, line);
        }
    }
    println!();
    println!("{}", driver.state());
    if let Some(outcome) = driver.outcome() {
        println!("{}", narrate_outcome(driver.state(), outcome));
    }
}
