//! # Error Handling Test Suite
//!
//! Tests for the error types: poison errors, stream errors with their context
//! and diagnostic trail, pipeline errors and error handlers.
//!
//! ## Test Coverage
//!
//! - **PoisonItemError**: message format and construction
//! - **StreamError**: creation, display, source access, cloning, diagnostics
//! - **PipelineError**: failure access, display, source chain
//! - **ErrorContext**: item, component information and default values
//! - **ComponentInfo**: default values and creation

use crate::diagnostic::ObservedSite;
use crate::error::{
  ComponentInfo, ErrorContext, PipelineError, PoisonItemError, StreamError, StringError,
  error_handler,
};
use std::error::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn poison_component() -> ComponentInfo {
  ComponentInfo::new("poison[F]".to_string(), "PoisonTransformer".to_string())
}

fn poison_error() -> StreamError<String> {
  StreamError::raised_by(PoisonItemError::new("F"), "F".to_string(), &poison_component())
}

// ============================================================================
// PoisonItemError Tests
// ============================================================================

#[test]
fn test_poison_item_error_message() {
  assert_eq!(PoisonItemError::new("F").to_string(), "can't be an F! no F's!");
  assert_eq!(PoisonItemError::new("C").to_string(), "can't be an C! no C's!");
}

#[test]
fn test_poison_item_error_equality() {
  assert_eq!(PoisonItemError::new("F"), PoisonItemError::new("F".to_string()));
  assert_ne!(PoisonItemError::new("F"), PoisonItemError::new("Z"));
}

// ============================================================================
// StreamError Tests
// ============================================================================

#[test]
fn test_stream_error_new() {
  let component = poison_component();
  let error = StreamError::new(
    Box::new(StringError("boom".to_string())),
    ErrorContext::new(Some(42), &component),
    component.clone(),
  );

  assert_eq!(error.message(), "boom");
  assert_eq!(error.item(), Some(&42));
  assert_eq!(error.component, component);
  assert_eq!(error.context.component_name, "poison[F]");
  assert_eq!(error.context.component_type, "PoisonTransformer");
  assert!(error.diagnostics().is_empty());
}

#[test]
fn test_stream_error_new_with_none_item() {
  let error = StreamError::<i32>::new(
    Box::new(StringError("boom".to_string())),
    ErrorContext::default(),
    ComponentInfo::default(),
  );
  assert_eq!(error.item(), None);
}

#[test]
fn test_stream_error_display() {
  let error = poison_error();
  assert_eq!(
    error.to_string(),
    "Error in poison[F] (PoisonTransformer): can't be an F! no F's!"
  );
}

#[test]
fn test_stream_error_source() {
  let error = poison_error();
  let source = error.source().expect("stream errors always have a source");
  assert_eq!(source.to_string(), "can't be an F! no F's!");
}

#[test]
fn test_stream_error_clone_keeps_message_and_trail() {
  let mut error = poison_error();
  error.observe_checkpoint("after F");

  let cloned = error.clone();

  assert_eq!(cloned.message(), error.message());
  assert_eq!(cloned.item(), error.item());
  assert_eq!(cloned.component, error.component);
  assert_eq!(cloned.diagnostics(), error.diagnostics());
}

#[test]
fn test_stream_error_observe_in_order() {
  let mut error = poison_error();
  error.observe_checkpoint("first");
  error.observe(ObservedSite::Operator {
    type_name: "PoisonTransformer".to_string(),
    name: "poison[Z]".to_string(),
  });
  error.observe_checkpoint("last");

  assert_eq!(
    error.diagnostics().labels().collect::<Vec<_>>(),
    vec!["first", "poison[Z]", "last"]
  );
}

#[test]
fn test_stream_error_handled_mark_is_shared_by_clones() {
  let error = poison_error();
  let recorded = error.clone();
  assert!(!recorded.is_handled());

  error.mark_handled();

  assert!(error.is_handled());
  assert!(recorded.is_handled());
}

// ============================================================================
// PipelineError Tests
// ============================================================================

#[test]
fn test_pipeline_error_failure_access() {
  let error = PipelineError::Unhandled(poison_error());
  assert_eq!(error.failure().message(), "can't be an F! no F's!");
  assert_eq!(error.component().name, "poison[F]");
}

#[test]
fn test_pipeline_error_display() {
  let error = PipelineError::Unhandled(poison_error());
  assert_eq!(
    error.to_string(),
    "Unhandled pipeline error in poison[F]: can't be an F! no F's!"
  );
}

#[test]
fn test_pipeline_error_source_chain() {
  let error = PipelineError::Unhandled(poison_error());
  let source = error.source().expect("pipeline errors wrap a stream error");
  assert_eq!(
    source.to_string(),
    "Error in poison[F] (PoisonTransformer): can't be an F! no F's!"
  );
}

// ============================================================================
// ErrorContext / ComponentInfo Tests
// ============================================================================

#[test]
fn test_error_context_default() {
  let context = ErrorContext::<String>::default();
  assert_eq!(context.item, None);
  assert_eq!(context.component_name, "default");
  assert_eq!(context.component_type, "default");
}

#[test]
fn test_component_info_default() {
  let info = ComponentInfo::default();
  assert_eq!(info.name, "default");
  assert_eq!(info.type_name, "default");
}

#[test]
fn test_component_info_new() {
  let info = ComponentInfo::new("letters".to_string(), "VecProducer".to_string());
  assert_eq!(info.name, "letters");
  assert_eq!(info.type_name, "VecProducer");
}

// ============================================================================
// ErrorHandler Tests
// ============================================================================

#[test]
fn test_error_handler_invocation() {
  let calls = Arc::new(AtomicUsize::new(0));
  let counter = calls.clone();
  let handler = error_handler(move |error: &StreamError<String>| {
    assert_eq!(error.item(), Some(&"F".to_string()));
    counter.fetch_add(1, Ordering::SeqCst);
  });

  handler(&poison_error());

  assert_eq!(calls.load(Ordering::SeqCst), 1);
}
