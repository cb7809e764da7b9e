//! Poison transformer for weavetrace.
//!
//! This module provides [`PoisonTransformer`], a stage that passes every item
//! through unchanged except its trigger token: the trigger is turned into a
//! [`PoisonItemError`] failure. Matching is exact value equality.
//!
//! Several poison stages may share the same trigger. Only the first of them
//! in chain order ever raises, because the failure ends the run before the
//! item reaches any later stage.
//!
//! # Example
//!
//! ```rust
//! use weavetrace::consumers::VecConsumer;
//! use weavetrace::producers::VecProducer;
//! use weavetrace::transformers::PoisonTransformer;
//! use weavetrace::PipelineBuilder;
//!
//! # tokio_test::block_on(async {
//! let result = PipelineBuilder::new()
//!     .producer(VecProducer::new(vec!["A".to_string(), "F".to_string()]))
//!     .transformer(PoisonTransformer::new("F".to_string()))
//!     .consumer(VecConsumer::new())
//!     .run()
//!     .await;
//!
//! let error = result.expect_err("nobody handles the failure");
//! assert_eq!(error.failure().message(), "can't be an F! no F's!");
//! # });
//! ```

use crate::error::{ComponentInfo, PoisonItemError, StreamError};
use crate::output::ItemStream;
use crate::{Input, Output, Transformer, TransformerConfig};
use futures::StreamExt;
use std::fmt::Display;
use tracing::debug;

/// A stage that fails on its trigger token.
#[derive(Debug, Clone)]
pub struct PoisonTransformer<T>
where
  T: std::fmt::Debug + Display + PartialEq + Clone + Send + Sync + 'static,
{
  /// The item value that makes this stage fail.
  pub trigger: T,
  /// Configuration for the transformer.
  pub config: TransformerConfig,
}

impl<T> PoisonTransformer<T>
where
  T: std::fmt::Debug + Display + PartialEq + Clone + Send + Sync + 'static,
{
  /// Creates a new `PoisonTransformer` failing on `trigger`.
  pub fn new(trigger: T) -> Self {
    Self {
      trigger,
      config: TransformerConfig::default(),
    }
  }
}

impl<T> Input for PoisonTransformer<T>
where
  T: std::fmt::Debug + Display + PartialEq + Clone + Send + Sync + 'static,
{
  type Input = T;
  type InputStream = ItemStream<T>;
}

impl<T> Output for PoisonTransformer<T>
where
  T: std::fmt::Debug + Display + PartialEq + Clone + Send + Sync + 'static,
{
  type Output = T;
  type OutputStream = ItemStream<T>;
}

impl<T> Transformer for PoisonTransformer<T>
where
  T: std::fmt::Debug + Display + PartialEq + Clone + Send + Sync + 'static,
{
  fn transform(&mut self, input: Self::InputStream) -> Self::OutputStream {
    let trigger = self.trigger.clone();
    let component = self.component_info();

    Box::pin(input.map(move |result| {
      result.and_then(|item| {
        if item == trigger {
          debug!(
            component = %component.name,
            item = %item,
            "Poison item rejected"
          );
          let error = PoisonItemError::new(item.to_string());
          Err(StreamError::raised_by(error, item, &component))
        } else {
          Ok(item)
        }
      })
    }))
  }

  fn set_config_impl(&mut self, config: TransformerConfig) {
    self.config = config;
  }

  fn get_config_impl(&self) -> &TransformerConfig {
    &self.config
  }

  fn get_config_mut_impl(&mut self) -> &mut TransformerConfig {
    &mut self.config
  }

  fn component_info(&self) -> ComponentInfo {
    ComponentInfo {
      name: self
        .config
        .name()
        .unwrap_or_else(|| format!("poison[{}]", self.trigger)),
      type_name: "PoisonTransformer".to_string(),
    }
  }
}
