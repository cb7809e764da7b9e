//! Vector producer for producing stream data from a Vec.
//!
//! This module provides [`VecProducer<T>`], a producer that yields items from a `Vec`
//! in order. It is the source of every demo pipeline and the usual source in tests.
//!
//! # Key Concepts
//!
//! - **In-Memory Data**: Produces items from an in-memory `Vec`
//! - **Ordered Output**: Items are produced in the order they appear in the vector
//! - **Restartable**: Clones the vector on every `produce`, so each call yields
//!   the same sequence again
//!
//! # Example
//!
//! ```rust
//! use weavetrace::producers::VecProducer;
//! use weavetrace::PipelineBuilder;
//! use weavetrace::consumers::VecConsumer;
//!
//! # tokio_test::block_on(async {
//! let (summary, consumer) = PipelineBuilder::new()
//!     .producer(VecProducer::new(vec![1, 2, 3]))
//!     .consumer(VecConsumer::new())
//!     .run()
//!     .await
//!     .expect("no failure");
//! assert_eq!(summary.delivered, 3);
//! assert_eq!(consumer.into_vec(), vec![1, 2, 3]);
//! # });
//! ```

use crate::error::{ComponentInfo, StreamError};
use crate::output::ItemStream;
use crate::{Output, Producer, ProducerConfig};
use futures::{StreamExt, stream};
use tracing::debug;

/// A producer that yields items from a Vec.
#[derive(Debug, Clone)]
pub struct VecProducer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  /// The Vec data to produce from.
  pub data: Vec<T>,
  /// Configuration for the producer.
  pub config: ProducerConfig,
}

impl<T: std::fmt::Debug + Clone + Send + Sync + 'static> VecProducer<T> {
  /// Creates a new `VecProducer` with the given Vec.
  ///
  /// # Arguments
  ///
  /// * `data` - The Vec to produce items from.
  pub fn new(data: Vec<T>) -> Self {
    Self {
      data,
      config: ProducerConfig::default(),
    }
  }
}

impl<T: std::fmt::Debug + Clone + Send + Sync + 'static> Output for VecProducer<T> {
  type Output = T;
  type OutputStream = ItemStream<T>;
}

impl<T: std::fmt::Debug + Clone + Send + Sync + 'static> Producer for VecProducer<T> {
  fn produce(&mut self) -> Self::OutputStream {
    debug!(
      component = %self.component_info().name,
      items = self.data.len(),
      "Producing items"
    );
    Box::pin(stream::iter(self.data.clone()).map(Ok::<T, StreamError<T>>))
  }

  fn set_config_impl(&mut self, config: ProducerConfig) {
    self.config = config;
  }

  fn get_config_impl(&self) -> &ProducerConfig {
    &self.config
  }

  fn get_config_mut_impl(&mut self) -> &mut ProducerConfig {
    &mut self.config
  }

  fn component_info(&self) -> ComponentInfo {
    ComponentInfo {
      name: self
        .config
        .name()
        .unwrap_or_else(|| "vec_producer".to_string()),
      type_name: "VecProducer".to_string(),
    }
  }
}
