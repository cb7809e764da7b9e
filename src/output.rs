//! Output trait for components that produce output streams.
//!
//! This module defines the [`Output`] trait for components that produce output streams.
//! It is implemented by:
//!
//! - **Producers**: Components that generate streams (start of pipeline)
//! - **Transformers**: Components that transform input streams into output streams
//!
//! # Key Concepts
//!
//! - **Output Type**: The item type carried by the stream
//! - **OutputStream**: A stream yielding `Result<Output, StreamError<Output>>`; a
//!   failure is always the last element of a stream
//! - **ItemStream**: The boxed stream type every built-in component uses
//!
//! # Example
//!
//! ```rust
//! use weavetrace::output::{ItemStream, Output};
//!
//! struct Letters;
//!
//! impl Output for Letters {
//!     type Output = String;
//!     type OutputStream = ItemStream<String>;
//! }
//! ```

use crate::error::StreamError;
use futures::Stream;
use std::pin::Pin;

/// Boxed stream of items or the failure that ended it.
pub type ItemStream<T> = Pin<Box<dyn Stream<Item = Result<T, StreamError<T>>> + Send>>;

/// Trait for components that can produce output streams.
pub trait Output {
  /// The type of items produced by this output stream.
  type Output: std::fmt::Debug + Clone + Send + Sync + 'static;
  /// The output stream type that yields items of type `Self::Output` or a failure.
  type OutputStream: Stream<Item = Result<Self::Output, StreamError<Self::Output>>>
    + Send
    + 'static;
}
