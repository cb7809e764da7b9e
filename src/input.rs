//! Input trait for components that consume input streams.
//!
//! This module defines the [`Input`] trait for components that receive data from
//! upstream components. It is implemented by:
//!
//! - **Transformers**: Components that transform input streams into output streams
//! - **Consumers**: Components that consume streams (end of pipeline)
//!
//! Input streams carry `Result<Input, StreamError<Input>>`, so a component
//! downstream of a failing stage receives the failure as the final element.
//!
//! # Example
//!
//! ```rust
//! use weavetrace::input::Input;
//! use weavetrace::output::ItemStream;
//!
//! struct Printer;
//!
//! impl Input for Printer {
//!     type Input = String;
//!     type InputStream = ItemStream<String>;
//! }
//! ```

use crate::error::StreamError;
use futures::Stream;
// Import for rustdoc links
#[allow(unused_imports)]
use crate::output::Output;

/// Trait for components that can receive input streams.
pub trait Input {
  /// The type of items received by this component.
  type Input: std::fmt::Debug + Clone + Send + Sync + 'static;
  /// The input stream type that yields items of type `Self::Input` or a failure.
  type InputStream: Stream<Item = Result<Self::Input, StreamError<Self::Input>>> + Send + 'static;
}
