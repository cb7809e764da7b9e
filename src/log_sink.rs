//! # Log Sinks
//!
//! Destinations for the line-oriented diagnostic output of a pipeline run.
//! Components never log their diagnostic lines through a process-wide logger
//! directly; they write to a [`LogSink`] handed to them, so a run can be
//! redirected to `tracing` in the binary or captured in memory by tests.
//!
//! - **TracingLogSink**: forwards every line to `tracing` at the matching level
//! - **MemoryLogSink**: records every line for later inspection

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{error, info};

/// Severity of a diagnostic line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
  /// Regular progress output (items, stream signals).
  Info,
  /// Failure reports.
  Error,
}

/// A single diagnostic line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
  /// Severity of the line.
  pub level: LogLevel,
  /// Text of the line.
  pub message: String,
}

impl LogLine {
  /// Creates a new line.
  pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
    Self {
      level,
      message: message.into(),
    }
  }
}

/// Destination for diagnostic output.
pub trait LogSink: Send + Sync {
  /// Writes one line at the given level.
  fn write(&self, level: LogLevel, message: &str);

  /// Writes one line at [`LogLevel::Info`].
  fn info(&self, message: &str) {
    self.write(LogLevel::Info, message);
  }

  /// Writes one line at [`LogLevel::Error`].
  fn error(&self, message: &str) {
    self.write(LogLevel::Error, message);
  }
}

/// Shared handle to a log sink.
pub type SharedLogSink = Arc<dyn LogSink>;

/// Sink that forwards lines to `tracing`.
#[derive(Debug, Clone)]
pub struct TracingLogSink {
  component: String,
}

impl TracingLogSink {
  /// Creates a sink whose events carry `component = "weavetrace"`.
  pub fn new() -> Self {
    Self::with_component("weavetrace")
  }

  /// Creates a sink whose events carry the given component name.
  pub fn with_component(name: impl Into<String>) -> Self {
    Self {
      component: name.into(),
    }
  }
}

impl Default for TracingLogSink {
  fn default() -> Self {
    Self::new()
  }
}

impl LogSink for TracingLogSink {
  fn write(&self, level: LogLevel, message: &str) {
    match level {
      LogLevel::Info => info!(component = %self.component, "{}", message),
      LogLevel::Error => error!(component = %self.component, "{}", message),
    }
  }
}

/// Sink that keeps every line in memory.
///
/// Clones share the same buffer, so a test can keep one handle and pass
/// another into the pipeline.
#[derive(Debug, Clone, Default)]
pub struct MemoryLogSink {
  lines: Arc<Mutex<Vec<LogLine>>>,
}

impl MemoryLogSink {
  /// Creates an empty sink.
  pub fn new() -> Self {
    Self::default()
  }

  fn buffer(&self) -> MutexGuard<'_, Vec<LogLine>> {
    self.lines.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// All lines written so far.
  pub fn lines(&self) -> Vec<LogLine> {
    self.buffer().clone()
  }

  /// Messages of all lines written so far, without levels.
  pub fn messages(&self) -> Vec<String> {
    self.buffer().iter().map(|line| line.message.clone()).collect()
  }

  /// Messages of the lines written at the given level.
  pub fn messages_at(&self, level: LogLevel) -> Vec<String> {
    self
      .buffer()
      .iter()
      .filter(|line| line.level == level)
      .map(|line| line.message.clone())
      .collect()
  }

  /// Discards all recorded lines.
  pub fn clear(&self) {
    self.buffer().clear();
  }
}

impl LogSink for MemoryLogSink {
  fn write(&self, level: LogLevel, message: &str) {
    self.buffer().push(LogLine::new(level, message));
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_memory_sink_records_in_order() {
    let sink = MemoryLogSink::new();
    sink.info("one");
    sink.error("two");
    sink.info("three");

    assert_eq!(sink.messages(), vec!["one", "two", "three"]);
    assert_eq!(sink.messages_at(LogLevel::Error), vec!["two"]);
    assert_eq!(sink.lines()[1], LogLine::new(LogLevel::Error, "two"));
  }

  #[test]
  fn test_memory_sink_clones_share_buffer() {
    let sink = MemoryLogSink::new();
    let shared: SharedLogSink = Arc::new(sink.clone());
    shared.info("from pipeline");

    assert_eq!(sink.messages(), vec!["from pipeline"]);
    sink.clear();
    assert!(sink.lines().is_empty());
  }

  #[test]
  fn test_tracing_sink_accepts_lines() {
    let sink = TracingLogSink::with_component("test");
    sink.info("info line");
    sink.error("error line");
  }
}
