//! # Producer Trait
//!
//! This module defines the [`Producer`] trait for components that start a
//! pipeline. A producer emits a finite, ordered sequence of items; calling
//! [`Producer::produce`] again yields the same sequence from the start.
//!
//! ## Key Concepts
//!
//! - **Producer**: A component that produces a stream of items
//! - **ProducerConfig**: Configuration holding the component name
//!
//! ## Example
//!
//! ```rust
//! use weavetrace::producers::VecProducer;
//! use weavetrace::Producer;
//! use futures::StreamExt;
//!
//! # tokio_test::block_on(async {
//! let mut producer = VecProducer::new(vec!["A".to_string(), "B".to_string()])
//!     .with_name("letters".to_string());
//! let items: Vec<_> = producer.produce().collect().await;
//! assert_eq!(items.len(), 2);
//! assert_eq!(producer.component_info().name, "letters");
//! # });
//! ```

use crate::error::ComponentInfo;
use crate::output::Output;

/// Configuration for producers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProducerConfig {
  /// Optional name for identifying this producer in logs and error reports.
  pub name: Option<String>,
}

impl ProducerConfig {
  /// Sets the name for this producer configuration.
  #[must_use]
  pub fn with_name(mut self, name: String) -> Self {
    self.name = Some(name);
    self
  }

  /// Returns the current name, if set.
  pub fn name(&self) -> Option<String> {
    self.name.clone()
  }
}

/// Trait for components that produce data streams.
///
/// Producers are the starting point of a pipeline. The stream they return
/// must be lazy: nothing is emitted until the stream is polled, and each poll
/// yields at most one item.
pub trait Producer: Output {
  /// Produces a fresh stream of items.
  fn produce(&mut self) -> Self::OutputStream;

  /// Sets the configuration for this producer.
  fn set_config(&mut self, config: ProducerConfig) {
    self.set_config_impl(config);
  }

  /// Returns a reference to the producer's configuration.
  fn config(&self) -> &ProducerConfig {
    self.get_config_impl()
  }

  /// Returns a mutable reference to the producer's configuration.
  fn config_mut(&mut self) -> &mut ProducerConfig {
    self.get_config_mut_impl()
  }

  /// Sets the name for this producer.
  #[must_use]
  fn with_name(mut self, name: String) -> Self
  where
    Self: Sized,
  {
    self.config_mut().name = Some(name);
    self
  }

  /// Returns information about this producer component.
  fn component_info(&self) -> ComponentInfo {
    ComponentInfo {
      name: self
        .config()
        .name
        .clone()
        .unwrap_or_else(|| "producer".to_string()),
      type_name: std::any::type_name::<Self>().to_string(),
    }
  }

  /// Internal implementation for setting configuration.
  fn set_config_impl(&mut self, config: ProducerConfig);
  /// Internal implementation for getting configuration.
  fn get_config_impl(&self) -> &ProducerConfig;
  /// Internal implementation for getting mutable configuration.
  fn get_config_mut_impl(&mut self) -> &mut ProducerConfig;
}
