//! # Consumer Trait
//!
//! This module defines the [`Consumer`] trait for components at the end of a
//! pipeline. A consumer receives every successful item in emission order; if
//! the run fails, the failure is the last element of its input stream.
//!
//! Whether the consumer deals with that failure is decided by its
//! [`ConsumerConfig`]: with an error handler configured, the consumer reports
//! the failure itself (error handling in the subscriber). Without one, the
//! failure must be handled on the producer side of the pipeline, or the run
//! ends with [`PipelineError::Unhandled`](crate::error::PipelineError::Unhandled).

use crate::Input;
use crate::error::{ComponentInfo, ErrorHandler, StreamError};
use async_trait::async_trait;

/// Configuration for a consumer component.
pub struct ConsumerConfig<T> {
  /// Handler invoked with the failure of the run, if any.
  pub error_handler: Option<ErrorHandler<T>>,
  /// The name of this consumer component.
  pub name: String,
}

impl<T> Clone for ConsumerConfig<T> {
  fn clone(&self) -> Self {
    Self {
      error_handler: self.error_handler.clone(),
      name: self.name.clone(),
    }
  }
}

impl<T> std::fmt::Debug for ConsumerConfig<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ConsumerConfig")
      .field("error_handler", &self.error_handler.is_some())
      .field("name", &self.name)
      .finish()
  }
}

impl<T> Default for ConsumerConfig<T> {
  fn default() -> Self {
    Self {
      error_handler: None,
      name: String::new(),
    }
  }
}

impl<T> ConsumerConfig<T> {
  /// Sets the error handler for this consumer configuration.
  #[must_use]
  pub fn with_error_handler(mut self, handler: ErrorHandler<T>) -> Self {
    self.error_handler = Some(handler);
    self
  }

  /// Sets the name for this consumer configuration.
  #[must_use]
  pub fn with_name(mut self, name: String) -> Self {
    self.name = name;
    self
  }

  /// Returns the name of the consumer.
  pub fn name(&self) -> String {
    self.name.clone()
  }
}

/// Trait for components that consume data streams.
#[async_trait]
pub trait Consumer: Input {
  /// Consumes the stream until it ends.
  ///
  /// Implementations must stop reading after the first failure and pass it to
  /// [`Consumer::handle_error`].
  async fn consume(&mut self, input: Self::InputStream);

  /// Sets the configuration for this consumer.
  fn set_config(&mut self, config: ConsumerConfig<Self::Input>) {
    self.set_config_impl(config);
  }

  /// Returns a reference to the consumer's configuration.
  fn config(&self) -> &ConsumerConfig<Self::Input> {
    self.get_config_impl()
  }

  /// Returns a mutable reference to the consumer's configuration.
  fn config_mut(&mut self) -> &mut ConsumerConfig<Self::Input> {
    self.get_config_mut_impl()
  }

  /// Sets the name for this consumer.
  #[must_use]
  fn with_name(mut self, name: String) -> Self
  where
    Self: Sized,
  {
    self.config_mut().name = name;
    self
  }

  /// Attaches an error handler to this consumer.
  #[must_use]
  fn with_error_handler(mut self, handler: ErrorHandler<Self::Input>) -> Self
  where
    Self: Sized,
  {
    self.config_mut().error_handler = Some(handler);
    self
  }

  /// Returns `true` when this consumer reports failures itself.
  fn handles_errors(&self) -> bool {
    self.config().error_handler.is_some()
  }

  /// Passes a failure to the configured error handler, if any, and marks it
  /// handled.
  fn handle_error(&self, error: &StreamError<Self::Input>) {
    if let Some(handler) = &self.config().error_handler {
      handler(error);
      error.mark_handled();
    }
  }

  /// Returns information about this consumer component.
  fn component_info(&self) -> ComponentInfo {
    ComponentInfo {
      name: self.config().name.clone(),
      type_name: std::any::type_name::<Self>().to_string(),
    }
  }

  /// Internal implementation for setting configuration.
  fn set_config_impl(&mut self, config: ConsumerConfig<Self::Input>);
  /// Internal implementation for getting configuration.
  fn get_config_impl(&self) -> &ConsumerConfig<Self::Input>;
  /// Internal implementation for getting mutable configuration.
  fn get_config_mut_impl(&mut self) -> &mut ConsumerConfig<Self::Input>;
}
