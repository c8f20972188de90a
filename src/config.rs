//! Runtime configuration
//!
//! Settings come from three layers, later ones winning: built-in defaults,
//! `ALGOVIZ_*` environment variables, then command-line arguments.

use crate::driver::DEFAULT_HISTORY_LIMIT;
use crate::structures::heap::HeapKind;
use crate::structures::{InitParams, Seed, StructureKind};
use std::fmt;
use std::path::PathBuf;

/// Delay between automatic steps while playing
pub const DEFAULT_SPEED_MS: u64 = 300;

pub const ENV_SPEED: &str = "ALGOVIZ_SPEED_MS";
pub const ENV_LOG: &str = "ALGOVIZ_LOG";
pub const ENV_HISTORY_LIMIT: &str = "ALGOVIZ_HISTORY_LIMIT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    HelpRequested,
    MissingStructure,
    UnknownStructure(String),
    UnknownOption(String),
    MissingValue { option: &'static str },
    InvalidValue { option: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::HelpRequested => write!(f, "Help requested"),
            ConfigError::MissingStructure => write!(f, "No structure given"),
            ConfigError::UnknownStructure(name) => write!(f, "Unknown structure '{}'", name),
            ConfigError::UnknownOption(option) => write!(f, "Unknown option '{}'", option),
            ConfigError::MissingValue { option } => write!(f, "Option {} needs a value", option),
            ConfigError::InvalidValue { option, value } => {
                write!(f, "Invalid value '{}' for {}", value, option)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub structure: StructureKind,
    /// Operation to run right away, in prompt syntax
    pub command: Option<String>,
    /// Print the narrated log instead of opening the TUI
    pub plain: bool,
    pub speed_ms: u64,
    pub init: InitParams,
    pub log_file: Option<PathBuf>,
    pub history_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            structure: StructureKind::Array,
            command: None,
            plain: false,
            speed_ms: DEFAULT_SPEED_MS,
            init: InitParams::default(),
            log_file: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

fn parse_number<T: std::str::FromStr>(option: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        option,
        value: value.to_string(),
    })
}

impl Config {
    /// Defaults, then the process environment, then `args` (program name
    /// already stripped)
    pub fn load<I>(args: I) -> Result<Config, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();
        config.apply_env(|name| std::env::var(name).ok())?;
        config.apply_args(args)?;
        Ok(config)
    }

    /// Apply `ALGOVIZ_*` overrides found through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_SPEED) {
            self.speed_ms = parse_number(ENV_SPEED, &value)?;
        }
        if let Some(value) = lookup(ENV_LOG) {
            if !value.trim().is_empty() {
                self.log_file = Some(PathBuf::from(value));
            }
        }
        if let Some(value) = lookup(ENV_HISTORY_LIMIT) {
            self.history_limit = parse_number(ENV_HISTORY_LIMIT, &value)?;
        }
        Ok(())
    }

    /// Parse `[OPTIONS] <STRUCTURE> [OPERATION] [ARGS...]`
    pub fn apply_args<I>(&mut self, args: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mut structure = None;
        let mut rest: Vec<String> = Vec::new();

        while let Some(arg) = args.next() {
            if structure.is_some() && !arg.starts_with("--") {
                rest.push(arg);
                continue;
            }
            let mut value_for = |option: &'static str| {
                args.next().ok_or(ConfigError::MissingValue { option })
            };
            match arg.as_str() {
                "-h" | "--help" => return Err(ConfigError::HelpRequested),
                "--plain" => self.plain = true,
                "--speed" => self.speed_ms = parse_number("--speed", &value_for("--speed")?)?,
                "--size" => {
                    let size: usize = parse_number("--size", &value_for("--size")?)?;
                    if size == 0 {
                        return Err(ConfigError::InvalidValue {
                            option: "--size",
                            value: size.to_string(),
                        });
                    }
                    self.init.table_size = size;
                    self.init.random_len = size;
                }
                "--empty" => self.init.seed = Seed::Empty,
                "--random" => self.init.seed = Seed::Random,
                "--values" => {
                    let raw = value_for("--values")?;
                    let values = raw
                        .split(',')
                        .filter(|v| !v.trim().is_empty())
                        .map(|v| parse_number("--values", v))
                        .collect::<Result<Vec<i64>, _>>()?;
                    self.init.seed = Seed::Values(values);
                }
                "--rng-seed" => {
                    self.init.rng_seed = Some(parse_number("--rng-seed", &value_for("--rng-seed")?)?)
                }
                "--min" => self.init.heap_kind = HeapKind::Min,
                "--directed" => self.init.directed = true,
                "--unweighted" => self.init.weighted = false,
                "--log" => self.log_file = Some(PathBuf::from(value_for("--log")?)),
                "--history-limit" => {
                    self.history_limit =
                        parse_number("--history-limit", &value_for("--history-limit")?)?
                }
                option if option.starts_with('-') => {
                    return Err(ConfigError::UnknownOption(option.to_string()))
                }
                name => {
                    structure = Some(
                        StructureKind::from_keyword(name)
                            .ok_or_else(|| ConfigError::UnknownStructure(name.to_string()))?,
                    );
                }
            }
        }

        self.structure = structure.ok_or(ConfigError::MissingStructure)?;
        self.command = if rest.is_empty() {
            None
        } else {
            Some(rest.join(" "))
        };
        Ok(())
    }
}

/// Usage text for `program`
pub fn usage(program: &str) -> String {
    let structures: Vec<&str> = StructureKind::ALL.iter().map(|k| k.keyword()).collect();
    format!(
        "Usage: {program} [OPTIONS] <STRUCTURE> [OPERATION] [ARGS...]

Structures: {structures}

Options:
  --plain             Print the narrated step log instead of opening the TUI
  --speed <ms>        Delay between steps while playing (default {speed})
  --size <n>          Random array length / hash table bucket count
  --empty             Start from an empty structure
  --random            Start from random contents
  --values <a,b,...>  Start from these values (array, tree, heap)
  --rng-seed <n>      Seed for random contents
  --min               Use a min-heap
  --directed          Directed graph
  --unweighted        Unweighted graph
  --log <file>        Write debug logs to <file>
  --history-limit <b> Memory budget for step history, in bytes

Environment: {ENV_SPEED}, {ENV_LOG}, {ENV_HISTORY_LIMIT}

Examples:
  {program} array quick
  {program} --plain graph dijkstra A F
  {program} hash insert pear fruit
  {program} --min --values 9,4,7,1 heap build",
        program = program,
        structures = structures.join(", "),
        speed = DEFAULT_SPEED_MS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_structure_and_command() {
        let mut config = Config::default();
        config
            .apply_args(args(&["--plain", "graph", "dijkstra", "A", "F"]))
            .unwrap();
        assert!(config.plain);
        assert_eq!(config.structure, StructureKind::Graph);
        assert_eq!(config.command.as_deref(), Some("dijkstra A F"));
    }

    #[test]
    fn test_options_after_structure() {
        let mut config = Config::default();
        config
            .apply_args(args(&["heap", "--min", "--values", "3,1,2", "build"]))
            .unwrap();
        assert_eq!(config.init.heap_kind, HeapKind::Min);
        assert_eq!(config.init.seed, Seed::Values(vec![3, 1, 2]));
        assert_eq!(config.command.as_deref(), Some("build"));
    }

    #[test]
    fn test_errors() {
        let mut config = Config::default();
        assert_eq!(config.apply_args(args(&[])), Err(ConfigError::MissingStructure));
        assert_eq!(
            config.apply_args(args(&["matrix"])),
            Err(ConfigError::UnknownStructure("matrix".to_string()))
        );
        assert_eq!(
            config.apply_args(args(&["array", "--speed"])),
            Err(ConfigError::MissingValue { option: "--speed" })
        );
        assert_eq!(
            config.apply_args(args(&["--size", "0", "hash"])),
            Err(ConfigError::InvalidValue {
                option: "--size",
                value: "0".to_string()
            })
        );
    }

    #[test]
    fn test_env_then_args() {
        let mut config = Config::default();
        config
            .apply_env(|name| match name {
                ENV_SPEED => Some("50".to_string()),
                ENV_HISTORY_LIMIT => Some("1024".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.speed_ms, 50);
        assert_eq!(config.history_limit, 1024);
        config.apply_args(args(&["--speed", "10", "tree"])).unwrap();
        assert_eq!(config.speed_ms, 10);
    }

    #[test]
    fn test_bad_env_value() {
        let mut config = Config::default();
        assert!(matches!(
            config.apply_env(|name| (name == ENV_SPEED).then(|| "fast".to_string())),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
