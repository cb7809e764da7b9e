//! Signal logging transformer for weavetrace.
//!
//! [`SignalLogTransformer`] writes one line per stream signal to a log sink and
//! emits every element unchanged:
//!
//! - `| onSubscribe()` on the first poll
//! - `| onNext(<item>)` for each item
//! - `| onError(<failure>)` for the failure, at error level
//! - `| onComplete()` when the stream ends without a failure

use crate::error::{ComponentInfo, StreamError};
use crate::log_sink::SharedLogSink;
use crate::output::ItemStream;
use crate::{Input, Output, Transformer, TransformerConfig};
use futures::Stream;
use pin_project::pin_project;
use std::fmt::Display;
use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

/// Stream adapter behind [`SignalLogTransformer`].
#[pin_project]
pub struct SignalLog<S> {
  #[pin]
  inner: S,
  sink: SharedLogSink,
  subscribed: bool,
  terminated: bool,
}

impl<S> SignalLog<S> {
  /// Wraps `inner`, logging its signals to `sink`.
  pub fn new(inner: S, sink: SharedLogSink) -> Self {
    Self {
      inner,
      sink,
      subscribed: false,
      terminated: false,
    }
  }
}

impl<S, T> Stream for SignalLog<S>
where
  S: Stream<Item = Result<T, StreamError<T>>>,
  T: std::fmt::Debug + Display + Clone + Send + Sync + 'static,
{
  type Item = Result<T, StreamError<T>>;

  fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
    let this = self.project();
    if !*this.subscribed {
      *this.subscribed = true;
      this.sink.info("| onSubscribe()");
    }

    let polled = ready!(this.inner.poll_next(cx));
    match &polled {
      Some(Ok(item)) => this.sink.info(&format!("| onNext({item})")),
      Some(Err(error)) => {
        *this.terminated = true;
        this.sink.error(&format!("| onError({error})"));
      }
      None if !*this.terminated => {
        *this.terminated = true;
        this.sink.info("| onComplete()");
      }
      None => {}
    }
    Poll::Ready(polled)
  }
}

/// A pass-through stage that logs stream signals.
pub struct SignalLogTransformer<T>
where
  T: std::fmt::Debug + Display + Clone + Send + Sync + 'static,
{
  sink: SharedLogSink,
  /// Configuration for the transformer.
  pub config: TransformerConfig,
  _phantom: PhantomData<T>,
}

impl<T> SignalLogTransformer<T>
where
  T: std::fmt::Debug + Display + Clone + Send + Sync + 'static,
{
  /// Creates a transformer logging to `sink`.
  pub fn new(sink: SharedLogSink) -> Self {
    Self {
      sink,
      config: TransformerConfig::default(),
      _phantom: PhantomData,
    }
  }
}

impl<T> Input for SignalLogTransformer<T>
where
  T: std::fmt::Debug + Display + Clone + Send + Sync + 'static,
{
  type Input = T;
  type InputStream = ItemStream<T>;
}

impl<T> Output for SignalLogTransformer<T>
where
  T: std::fmt::Debug + Display + Clone + Send + Sync + 'static,
{
  type Output = T;
  type OutputStream = ItemStream<T>;
}

impl<T> Transformer for SignalLogTransformer<T>
where
  T: std::fmt::Debug + Display + Clone + Send + Sync + 'static,
{
  fn transform(&mut self, input: Self::InputStream) -> Self::OutputStream {
    Box::pin(SignalLog::new(input, self.sink.clone()))
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
      name: self.config.name().unwrap_or_else(|| "log".to_string()),
      type_name: "SignalLogTransformer".to_string(),
    }
  }
}
