//! # Error Handling System
//!
//! Error types for weavetrace pipelines. Every failure in a pipeline is fatal to
//! the run: there is no skipping and no retrying. A failure travels downstream
//! as a [`StreamError`], collecting the sites that observed it in its
//! [`DiagnosticContext`], until it reaches the error handlers configured for
//! the run.
//!
//! ## Core Types
//!
//! - **PoisonItemError**: Raised by a stage that meets its trigger token
//! - **StreamError**: A failure plus the item, component and diagnostic trail
//! - **ErrorContext**: When the failure happened and which item caused it
//! - **ComponentInfo**: Name and type of the component that raised the failure
//! - **PipelineError**: Run-level error returned when nobody handled a failure
//! - **ErrorHandler**: Closure invoked once with the failure of a run
//!
//! ## Example
//!
//! ```rust
//! use weavetrace::error::{ComponentInfo, ErrorContext, PoisonItemError, StreamError};
//!
//! let component = ComponentInfo::new("poison[F]".to_string(), "PoisonTransformer".to_string());
//! let mut error = StreamError::new(
//!     Box::new(PoisonItemError::new("F")),
//!     ErrorContext::new(Some("F".to_string()), &component),
//!     component,
//! );
//! error.observe_checkpoint("MY CHECKPOINT F");
//!
//! assert_eq!(error.message(), "can't be an F! no F's!");
//! assert_eq!(error.diagnostics().labels().collect::<Vec<_>>(), vec!["MY CHECKPOINT F"]);
//! ```

use crate::diagnostic::{DiagnosticContext, ObservedSite};
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Error raised when a stage encounters its configured trigger token.
///
/// The message names the offending token, e.g. `can't be an F! no F's!`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("can't be an {token}! no {token}'s!")]
pub struct PoisonItemError {
  /// The token that triggered the failure.
  pub token: String,
}

impl PoisonItemError {
  /// Creates a new `PoisonItemError` for the given token.
  pub fn new(token: impl Into<String>) -> Self {
    Self {
      token: token.into(),
    }
  }
}

/// Closure invoked with the failure of a run.
///
/// Handlers can be attached on the consumer side (see
/// [`ConsumerConfig`](crate::ConsumerConfig)) or on the producer side with
/// [`PipelineBuilder::do_on_error`](crate::pipeline::PipelineBuilder::do_on_error).
pub type ErrorHandler<T> = Arc<dyn Fn(&StreamError<T>) + Send + Sync>;

/// Wraps a closure into an [`ErrorHandler`].
pub fn error_handler<T, F>(f: F) -> ErrorHandler<T>
where
  F: Fn(&StreamError<T>) + Send + Sync + 'static,
{
  Arc::new(f)
}

/// Error that occurred during stream processing.
///
/// # Fields
///
/// * `source` - The original error that occurred
/// * `context` - Context about when the error occurred and which item caused it
/// * `component` - Information about the component that raised the error
/// * `diagnostics` - The sites downstream of the failure that observed it
#[derive(Debug)]
pub struct StreamError<T> {
  /// The original error that occurred.
  pub source: Box<dyn Error + Send + Sync>,
  /// Context about when and where the error occurred.
  pub context: ErrorContext<T>,
  /// Information about the component that encountered the error.
  pub component: ComponentInfo,
  /// Sites that observed the error while it travelled downstream.
  pub diagnostics: DiagnosticContext,
  handled: Arc<AtomicBool>,
}

impl<T: std::fmt::Debug + Clone + Send + Sync> Clone for StreamError<T> {
  fn clone(&self) -> Self {
    Self {
      source: Box::new(StringError(self.source.to_string())),
      context: self.context.clone(),
      component: self.component.clone(),
      diagnostics: self.diagnostics.clone(),
      handled: Arc::clone(&self.handled),
    }
  }
}

/// A simple error type that wraps a string message.
///
/// Used when a `StreamError` is cloned, since boxed sources cannot be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringError(pub String);

impl std::fmt::Display for StringError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl std::error::Error for StringError {}

impl<T: std::fmt::Debug + Clone + Send + Sync> StreamError<T> {
  /// Creates a new `StreamError` with an empty diagnostic trail.
  ///
  /// # Arguments
  ///
  /// * `source` - The original error that occurred.
  /// * `context` - Context about when and where the error occurred.
  /// * `component` - Information about the component that encountered the error.
  pub fn new(
    source: Box<dyn Error + Send + Sync>,
    context: ErrorContext<T>,
    component: ComponentInfo,
  ) -> Self {
    Self {
      source,
      context,
      component,
      diagnostics: DiagnosticContext::new(),
      handled: Arc::new(AtomicBool::new(false)),
    }
  }

  /// Creates a `StreamError` raised by `component` while processing `item`.
  pub fn raised_by<E>(error: E, item: T, component: &ComponentInfo) -> Self
  where
    E: Error + Send + Sync + 'static,
  {
    Self::new(
      Box::new(error),
      ErrorContext::new(Some(item), component),
      component.clone(),
    )
  }

  /// The human-readable message of the underlying error.
  pub fn message(&self) -> String {
    self.source.to_string()
  }

  /// The item that triggered the error, if known.
  pub fn item(&self) -> Option<&T> {
    self.context.item.as_ref()
  }

  /// The sites that observed this error so far.
  pub fn diagnostics(&self) -> &DiagnosticContext {
    &self.diagnostics
  }

  /// Records that a labeled checkpoint observed this error.
  pub fn observe_checkpoint(&mut self, label: impl Into<String>) {
    self.diagnostics.observe(ObservedSite::Checkpoint(label.into()));
  }

  /// Records that an arbitrary site observed this error.
  pub fn observe(&mut self, site: ObservedSite) {
    self.diagnostics.observe(site);
  }

  /// Marks this error as handled by an error handler.
  ///
  /// Clones share the mark, so a copy taken before the handler ran sees it.
  pub fn mark_handled(&self) {
    self.handled.store(true, Ordering::SeqCst);
  }

  /// Returns `true` once an error handler has been invoked with this error.
  pub fn is_handled(&self) -> bool {
    self.handled.load(Ordering::SeqCst)
  }
}

impl<T: std::fmt::Debug + Clone + Send + Sync> fmt::Display for StreamError<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Error in {} ({}): {}",
      self.component.name, self.component.type_name, self.source
    )
  }
}

impl<T: std::fmt::Debug + Clone + Send + Sync> Error for StreamError<T> {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    Some(self.source.as_ref())
  }
}

/// Context information about when and where an error occurred.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorContext<T> {
  /// The timestamp when the error occurred.
  pub timestamp: chrono::DateTime<chrono::Utc>,
  /// The item being processed when the error occurred, if available.
  pub item: Option<T>,
  /// The name of the component that encountered the error.
  pub component_name: String,
  /// The type of the component that encountered the error.
  pub component_type: String,
}

impl<T: std::fmt::Debug + Clone + Send + Sync> ErrorContext<T> {
  /// Creates a context stamped with the current time for the given component.
  pub fn new(item: Option<T>, component: &ComponentInfo) -> Self {
    Self {
      timestamp: chrono::Utc::now(),
      item,
      component_name: component.name.clone(),
      component_type: component.type_name.clone(),
    }
  }
}

impl<T: std::fmt::Debug + Clone + Send + Sync> Default for ErrorContext<T> {
  fn default() -> Self {
    Self {
      timestamp: chrono::Utc::now(),
      item: None,
      component_name: "default".to_string(),
      component_type: "default".to_string(),
    }
  }
}

/// Information about a pipeline component.
///
/// This struct provides identifying information about a component,
/// including its name and type, which is useful for logging and error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentInfo {
  /// The name of the component.
  pub name: String,
  /// The type name of the component.
  pub type_name: String,
}

impl Default for ComponentInfo {
  fn default() -> Self {
    Self {
      name: "default".to_string(),
      type_name: "default".to_string(),
    }
  }
}

impl ComponentInfo {
  /// Creates a new `ComponentInfo` with the given name and type name.
  pub fn new(name: String, type_name: String) -> Self {
    Self { name, type_name }
  }
}

/// An error that ended a pipeline run without being handled.
///
/// Returned by [`Pipeline::run`](crate::pipeline::Pipeline::run) when a stage
/// failed and no error handler on the consumer or the producer side was
/// invoked with the failure.
#[derive(Debug)]
pub enum PipelineError<T> {
  /// A stage failed and no error handler saw the failure.
  Unhandled(StreamError<T>),
}

impl<T: std::fmt::Debug + Clone + Send + Sync> PipelineError<T> {
  /// Returns the failure that ended the run.
  pub fn failure(&self) -> &StreamError<T> {
    match self {
      PipelineError::Unhandled(error) => error,
    }
  }

  /// Returns a reference to the component information.
  pub fn component(&self) -> &ComponentInfo {
    &self.failure().component
  }
}

impl<T: std::fmt::Debug + Clone + Send + Sync> std::fmt::Display for PipelineError<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      PipelineError::Unhandled(error) => write!(
        f,
        "Unhandled pipeline error in {}: {}",
        error.component.name, error.source
      ),
    }
  }
}

impl<T: std::fmt::Debug + Clone + Send + Sync + 'static> Error for PipelineError<T> {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    Some(self.failure())
  }
}
