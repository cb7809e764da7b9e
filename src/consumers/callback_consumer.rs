//! Callback consumer: the "subscribe" end of a pipeline.
//!
//! [`CallbackConsumer`] invokes a closure for every successful item. Attaching
//! an error handler to it (`with_error_handler`) is the subscriber-side way of
//! dealing with failures: the consumer reports the failure itself once the
//! stream hands it over.

use crate::error::ComponentInfo;
use crate::output::ItemStream;
use crate::{Consumer, ConsumerConfig, Input};
use async_trait::async_trait;
use futures::StreamExt;
use std::sync::Arc;
use tracing::debug;

/// Closure invoked once per delivered item.
pub type ItemCallback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// A consumer that hands every item to a closure.
pub struct CallbackConsumer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  on_next: ItemCallback<T>,
  delivered: usize,
  /// Configuration for the consumer, including its error handler.
  pub config: ConsumerConfig<T>,
}

impl<T> CallbackConsumer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  /// Creates a consumer that calls `on_next` for every item.
  pub fn new<F>(on_next: F) -> Self
  where
    F: Fn(&T) + Send + Sync + 'static,
  {
    Self {
      on_next: Arc::new(on_next),
      delivered: 0,
      config: ConsumerConfig::default(),
    }
  }

  /// Number of items handed to the callback so far.
  pub fn delivered(&self) -> usize {
    self.delivered
  }
}

impl<T> Clone for CallbackConsumer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  fn clone(&self) -> Self {
    Self {
      on_next: self.on_next.clone(),
      delivered: 0,
      config: self.config.clone(),
    }
  }
}

impl<T> std::fmt::Debug for CallbackConsumer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CallbackConsumer")
      .field("delivered", &self.delivered)
      .field("config", &self.config)
      .finish()
  }
}

impl<T> Input for CallbackConsumer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  type Input = T;
  type InputStream = ItemStream<T>;
}

#[async_trait]
impl<T> Consumer for CallbackConsumer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  async fn consume(&mut self, mut stream: Self::InputStream) {
    while let Some(item) = stream.next().await {
      match item {
        Ok(item) => {
          (self.on_next)(&item);
          self.delivered += 1;
        }
        Err(error) => {
          debug!(
            component = %self.component_info().name,
            handled = self.handles_errors(),
            "Consumer received failure"
          );
          self.handle_error(&error);
          break;
        }
      }
    }
  }

  fn get_config_impl(&self) -> &ConsumerConfig<Self::Input> {
    &self.config
  }

  fn get_config_mut_impl(&mut self) -> &mut ConsumerConfig<Self::Input> {
    &mut self.config
  }

  fn set_config_impl(&mut self, config: ConsumerConfig<Self::Input>) {
    self.config = config;
  }

  fn component_info(&self) -> ComponentInfo {
    ComponentInfo {
      name: if self.config.name.is_empty() {
        "callback_consumer".to_string()
      } else {
        self.config.name.clone()
      },
      type_name: "CallbackConsumer".to_string(),
    }
  }
}
