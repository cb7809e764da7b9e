//! Error report rendering.
//!
//! [`ErrorReporter`] turns the failure of a run into the report lines written
//! to a [`LogSink`]: a fixed header, the failure message, and the observed
//! sites collected by checkpoints (if any).

use crate::error::{ErrorHandler, StreamError};
use crate::log_sink::SharedLogSink;
use std::sync::Arc;

/// Header line written before every error report.
pub const DEFAULT_HEADER: &str = "OH NOES!";

/// Writes error reports to a log sink.
#[derive(Clone)]
pub struct ErrorReporter {
  sink: SharedLogSink,
  header: String,
}

impl std::fmt::Debug for ErrorReporter {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ErrorReporter")
      .field("header", &self.header)
      .finish_non_exhaustive()
  }
}

impl ErrorReporter {
  /// Creates a reporter using [`DEFAULT_HEADER`].
  pub fn new(sink: SharedLogSink) -> Self {
    Self {
      sink,
      header: DEFAULT_HEADER.to_string(),
    }
  }

  /// Replaces the header line.
  #[must_use]
  pub fn with_header(mut self, header: impl Into<String>) -> Self {
    self.header = header.into();
    self
  }

  /// The report lines for `error`, in the order they are written.
  pub fn render<T>(&self, error: &StreamError<T>) -> Vec<String>
  where
    T: std::fmt::Debug + Clone + Send + Sync,
  {
    let mut lines = vec![self.header.clone(), error.to_string()];
    lines.extend(error.diagnostics().report_lines());
    lines
  }

  /// Writes the report for `error` at error level.
  pub fn report<T>(&self, error: &StreamError<T>)
  where
    T: std::fmt::Debug + Clone + Send + Sync,
  {
    for line in self.render(error) {
      self.sink.error(&line);
    }
  }

  /// An [`ErrorHandler`] that reports every failure it receives.
  pub fn handler<T>(&self) -> ErrorHandler<T>
  where
    T: std::fmt::Debug + Clone + Send + Sync + 'static,
  {
    let reporter = self.clone();
    Arc::new(move |error: &StreamError<T>| reporter.report(error))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::diagnostic::OBSERVED_HEADER;
  use crate::error::{ComponentInfo, PoisonItemError};
  use crate::log_sink::{LogLevel, MemoryLogSink};

  fn poison_error(token: &str) -> StreamError<String> {
    let component = ComponentInfo::new(format!("poison[{token}]"), "PoisonTransformer".to_string());
    StreamError::raised_by(PoisonItemError::new(token), token.to_string(), &component)
  }

  #[test]
  fn test_report_without_checkpoints() {
    let sink = MemoryLogSink::new();
    let reporter = ErrorReporter::new(Arc::new(sink.clone()));

    reporter.report(&poison_error("F"));

    assert_eq!(
      sink.messages_at(LogLevel::Error),
      vec![
        "OH NOES!",
        "Error in poison[F] (PoisonTransformer): can't be an F! no F's!",
      ]
    );
    assert!(sink.messages_at(LogLevel::Info).is_empty());
  }

  #[test]
  fn test_report_lists_checkpoints_after_message() {
    let sink = MemoryLogSink::new();
    let reporter = ErrorReporter::new(Arc::new(sink.clone())).with_header("failed");
    let mut error = poison_error("D");
    error.observe_checkpoint("after D");
    error.observe_checkpoint("after Z");

    let handler = reporter.handler::<String>();
    handler(&error);

    let messages = sink.messages();
    assert_eq!(messages[0], "failed");
    assert!(messages[1].contains("can't be an D!"));
    assert_eq!(messages[2], OBSERVED_HEADER);
    assert_eq!(messages[3], "\t|_ checkpoint ⇢ after D");
    assert_eq!(messages[4], "\t|_ checkpoint ⇢ after Z");
    assert_eq!(messages.len(), 5);
  }
}
