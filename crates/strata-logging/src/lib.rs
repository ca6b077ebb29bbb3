//! Structured operation logging for strata.
//!
//! Data structures in this workspace do not write to a global logger. They
//! record [`LogEntry`] values into a [`LogCollector`] they own, filtered by a
//! [`LoggingConfig`]. Callers inspect, render or drain the collector.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Log level for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl LogLevel {
    fn verbosity(self) -> u8 {
        match self {
            LogLevel::Error => 0,
            LogLevel::Warn => 1,
            LogLevel::Info => 2,
            LogLevel::Debug => 3,
            LogLevel::Trace => 4,
        }
    }

    /// Check if a threshold of `self` admits messages at `level`
    pub fn should_log(&self, level: LogLevel) -> bool {
        self.verbosity() >= level.verbosity()
    }

    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Plain,
    Json,
    Compact,
}

impl Default for LogFormat {
    fn default() -> Self {
        LogFormat::Plain
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level to record
    #[serde(default)]
    pub level: LogLevel,
    /// Output format used by [`LogCollector::render`]
    #[serde(default)]
    pub format: LogFormat,
    /// Stamp entries with the time they were recorded
    #[serde(default = "default_true")]
    pub timestamps: bool,
    /// Entries kept before the oldest is dropped
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    /// Component-specific log levels
    #[serde(default)]
    pub component_levels: HashMap<String, LogLevel>,
}

fn default_true() -> bool {
    true
}

fn default_max_entries() -> usize {
    1024
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Plain,
            timestamps: true,
            max_entries: default_max_entries(),
            component_levels: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    /// Create a new logging config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log level
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Set the log format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable timestamps
    pub fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }

    /// Bound the number of retained entries
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Set a component-specific log level
    pub fn with_component_level(mut self, component: impl Into<String>, level: LogLevel) -> Self {
        self.component_levels.insert(component.into(), level);
        self
    }

    /// Get the effective log level for a component
    pub fn effective_level(&self, component: Option<&str>) -> LogLevel {
        component
            .and_then(|comp| self.component_levels.get(comp).copied())
            .unwrap_or(self.level)
    }

    /// Check if a message at the given level should be logged
    pub fn should_log(&self, level: LogLevel, component: Option<&str>) -> bool {
        self.effective_level(component).should_log(level)
    }
}

/// A single structured log record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    pub level: LogLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
}

impl LogEntry {
    /// Create a new log entry stamped with the current time
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Some(Utc::now()),
            level,
            component: None,
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Create a log entry with a component
    pub fn with_component(
        level: LogLevel,
        component: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            component: Some(component.into()),
            ..Self::new(level, message)
        }
    }

    /// Attach a structured key/value field
    pub fn with_field(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.fields.insert(key.into(), value.to_string());
        self
    }

    /// Look up a structured field
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Render the entry as a single line
    pub fn render(&self, format: LogFormat) -> String {
        match format {
            LogFormat::Json => serde_json::to_string(self)
                .unwrap_or_else(|err| format!("{{\"render_error\":\"{err}\"}}")),
            LogFormat::Plain => {
                let mut line = String::new();
                if let Some(ts) = &self.timestamp {
                    line.push_str(&ts.to_rfc3339());
                    line.push(' ');
                }
                line.push_str(self.level.as_str());
                if let Some(component) = &self.component {
                    line.push_str(&format!(" [{component}]"));
                }
                line.push(' ');
                line.push_str(&self.message);
                self.push_fields(&mut line);
                line
            }
            LogFormat::Compact => {
                let mut line = self.level.as_str()[..1].to_string();
                line.push(' ');
                if let Some(component) = &self.component {
                    line.push_str(component);
                    line.push_str(": ");
                }
                line.push_str(&self.message);
                self.push_fields(&mut line);
                line
            }
        }
    }

    fn push_fields(&self, line: &mut String) {
        for (key, value) in &self.fields {
            line.push_str(&format!(" {key}={value}"));
        }
    }
}

/// Bounded collector of log entries, filtered by a [`LoggingConfig`]
#[derive(Debug, Clone, Default)]
pub struct LogCollector {
    config: LoggingConfig,
    entries: VecDeque<LogEntry>,
    dropped: usize,
}

impl LogCollector {
    /// Create a collector with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collector with the given configuration
    pub fn with_config(config: LoggingConfig) -> Self {
        Self {
            config,
            entries: VecDeque::new(),
            dropped: 0,
        }
    }

    /// The active configuration
    pub fn config(&self) -> &LoggingConfig {
        &self.config
    }

    /// Whether an entry at `level` from `component` would be kept
    pub fn enabled(&self, level: LogLevel, component: &str) -> bool {
        self.config.max_entries > 0 && self.config.should_log(level, Some(component))
    }

    /// Record an entry, subject to level filtering and the retention bound
    pub fn push(&mut self, mut entry: LogEntry) {
        if !self.config.should_log(entry.level, entry.component.as_deref()) {
            return;
        }
        if self.config.max_entries == 0 {
            self.dropped += 1;
            return;
        }
        if !self.config.timestamps {
            entry.timestamp = None;
        }
        while self.entries.len() >= self.config.max_entries {
            self.entries.pop_front();
            self.dropped += 1;
        }
        self.entries.push_back(entry);
    }

    /// Entries currently retained, oldest first
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Number of retained entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is retained
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries evicted by the retention bound
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Get entries matching a level
    pub fn filter_by_level(&self, level: LogLevel) -> Vec<&LogEntry> {
        self.entries.iter().filter(|e| e.level == level).collect()
    }

    /// Get entries recorded by a component
    pub fn filter_by_component(&self, component: &str) -> Vec<&LogEntry> {
        self.entries
            .iter()
            .filter(|e| e.component.as_deref() == Some(component))
            .collect()
    }

    /// Render every retained entry in the configured format, one per line
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.render(self.config.format))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Remove and return all retained entries
    pub fn drain(&mut self) -> Vec<LogEntry> {
        self.entries.drain(..).collect()
    }

    /// Clear all entries and the drop counter
    pub fn clear(&mut self) {
        self.entries.clear();
        self.dropped = 0;
    }
}
