//! Diagnostic logging for the agent
//!
//! Messages are filtered by category and level, written to the configured
//! output when enabled, and always forwarded to the `log` facade.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Write;

/// Debug log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    /// Every line read and command sent
    Trace,
    /// Development debugging information
    Debug,
    /// Important state changes
    Info,
    /// Potential issues
    Warn,
    /// Error situations
    Error,
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => log::Level::Trace,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Error => log::Level::Error,
        }
    }
}

/// Debug log category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DebugCategory {
    /// Event evaluation and resolution
    Events,
    /// Checkpoint save, restore and replay
    Checkpoint,
    /// Movement choices
    Explore,
    /// Ordering search
    Solver,
    /// Raw engine traffic
    Session,
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Enable debug logging
    pub enabled: bool,
    /// Minimum log level
    pub level: LogLevel,
    /// Output destination
    pub output: DebugOutput,
    /// Enabled categories
    pub categories: HashSet<DebugCategory>,
}

impl Default for DebugConfig {
    fn default() -> Self {
        let mut categories = HashSet::new();
        categories.insert(DebugCategory::Events);
        categories.insert(DebugCategory::Checkpoint);
        categories.insert(DebugCategory::Solver);

        Self {
            enabled: std::env::var("WAYFARER_DEBUG").is_ok(),
            level: LogLevel::Debug,
            output: DebugOutput::Stderr,
            categories,
        }
    }
}

impl DebugConfig {
    /// Everything, down to individual engine lines
    pub fn verbose() -> Self {
        Self {
            enabled: true,
            level: LogLevel::Trace,
            output: DebugOutput::Stderr,
            categories: [
                DebugCategory::Events,
                DebugCategory::Checkpoint,
                DebugCategory::Explore,
                DebugCategory::Solver,
                DebugCategory::Session,
            ]
            .into_iter()
            .collect(),
        }
    }

    /// Whether a message would be written to the configured output
    pub fn accepts(&self, category: DebugCategory, level: LogLevel) -> bool {
        self.enabled && level >= self.level && self.categories.contains(&category)
    }
}

/// Debug output destination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DebugOutput {
    /// Output to stderr
    Stderr,
    /// Append to a file
    File(String),
}

/// Log a debug message
pub fn log(config: &DebugConfig, category: DebugCategory, level: LogLevel, message: &str) {
    let facade_level: log::Level = level.into();
    log::log!(target: "wayfarer", facade_level, "{:?}: {}", category, message);

    if !config.accepts(category, level) {
        return;
    }

    let line = format!("[{}] {:10} {}", level_str(level), format!("{:?}", category), message);
    match &config.output {
        DebugOutput::Stderr => eprintln!("{}", line),
        DebugOutput::File(path) => {
            let written = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .and_then(|mut file| writeln!(file, "{}", line));
            if let Err(err) = written {
                eprintln!("{} (debug log '{}' unavailable: {})", line, path, err);
            }
        }
    }
}

fn level_str(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "TRACE",
        LogLevel::Debug => "DEBUG",
        LogLevel::Info => "INFO",
        LogLevel::Warn => "WARN",
        LogLevel::Error => "ERROR",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_config_default() {
        let config = DebugConfig::default();
        assert!(!config.enabled || std::env::var("WAYFARER_DEBUG").is_ok());
        assert!(config.categories.contains(&DebugCategory::Events));
        assert!(!config.categories.contains(&DebugCategory::Session));
    }

    #[test]
    fn accepts_filters_level_and_category() {
        let mut config = DebugConfig::verbose();
        config.level = LogLevel::Info;
        config.categories.remove(&DebugCategory::Explore);

        assert!(config.accepts(DebugCategory::Events, LogLevel::Info));
        assert!(config.accepts(DebugCategory::Events, LogLevel::Error));
        assert!(!config.accepts(DebugCategory::Events, LogLevel::Debug));
        assert!(!config.accepts(DebugCategory::Explore, LogLevel::Error));

        config.enabled = false;
        assert!(!config.accepts(DebugCategory::Events, LogLevel::Error));
    }

    #[test]
    fn file_output_appends_lines() {
        let path = std::env::temp_dir().join(format!("wayfarer-debug-{}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let config = DebugConfig {
            output: DebugOutput::File(path.to_string_lossy().to_string()),
            ..DebugConfig::verbose()
        };

        log(&config, DebugCategory::Checkpoint, LogLevel::Info, "saved 3 actions");
        log(&config, DebugCategory::Solver, LogLevel::Debug, "trying permutation 2");

        let written = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[INFO] Checkpoint"));
        assert!(lines[0].ends_with("saved 3 actions"));
        assert!(lines[1].contains("trying permutation 2"));
        let _ = std::fs::remove_file(&path);
    }
}
