//! Producer-side error handling.
//!
//! [`DoOnErrorTransformer`] invokes an [`ErrorHandler`] when a failure flows
//! past it and forwards the failure unchanged. Placed in the chain by
//! [`PipelineBuilder::do_on_error`](crate::pipeline::PipelineBuilder::do_on_error),
//! it lets the pipeline declare how its failures are reported, so consumers
//! do not need to know about errors at all.

use crate::error::{ComponentInfo, ErrorHandler};
use crate::output::ItemStream;
use crate::{Input, Output, Transformer, TransformerConfig};
use futures::StreamExt;

/// A pass-through stage that hands failures to an error handler.
pub struct DoOnErrorTransformer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  handler: ErrorHandler<T>,
  /// Configuration for the transformer.
  pub config: TransformerConfig,
}

impl<T> DoOnErrorTransformer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  /// Creates a transformer calling `handler` for the failure of the run.
  pub fn new(handler: ErrorHandler<T>) -> Self {
    Self {
      handler,
      config: TransformerConfig::default(),
    }
  }
}

impl<T> Clone for DoOnErrorTransformer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  fn clone(&self) -> Self {
    Self {
      handler: self.handler.clone(),
      config: self.config.clone(),
    }
  }
}

impl<T> Input for DoOnErrorTransformer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  type Input = T;
  type InputStream = ItemStream<T>;
}

impl<T> Output for DoOnErrorTransformer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  type Output = T;
  type OutputStream = ItemStream<T>;
}

impl<T> Transformer for DoOnErrorTransformer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  fn transform(&mut self, input: Self::InputStream) -> Self::OutputStream {
    let handler = self.handler.clone();

    Box::pin(input.inspect(move |result| {
      if let Err(error) = result {
        handler(error);
        error.mark_handled();
      }
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
        .unwrap_or_else(|| "do_on_error".to_string()),
      type_name: "DoOnErrorTransformer".to_string(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::{PoisonItemError, StreamError, error_handler};
  use futures::stream;
  use std::sync::{Arc, Mutex};

  #[tokio::test]
  async fn test_do_on_error_sees_failure_and_forwards_it() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();
    let mut transformer = DoOnErrorTransformer::new(error_handler(
      move |error: &StreamError<String>| recorder.lock().unwrap().push(error.message()),
    ));

    let failure = StreamError::raised_by(
      PoisonItemError::new("F"),
      "F".to_string(),
      &ComponentInfo::default(),
    );
    let input: ItemStream<String> =
      Box::pin(stream::iter(vec![Ok("A".to_string()), Err(failure)]));
    let output: Vec<_> = transformer.transform(input).collect().await;

    assert_eq!(output.len(), 2);
    assert!(output[0].is_ok());
    assert!(output[1].as_ref().unwrap_err().is_handled());
    assert_eq!(*seen.lock().unwrap(), vec!["can't be an F! no F's!"]);
  }
}
