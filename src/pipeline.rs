//! # Pipeline Builder and Runner
//!
//! A pipeline is a producer, a chain of stages and a consumer. The builder is a
//! small state machine: [`PipelineBuilder<Empty>`] accepts a producer, after
//! which stages can be appended in order, and a consumer turns the builder into
//! a runnable [`Pipeline`].
//!
//! Every run is fail-fast. The first failure ends the run: the stream stops
//! right after forwarding it, so no later item is pulled from the producer and
//! the consumer sees the failure as the last element of its stream. This holds
//! at the producer, after every stage and at the consumer, whatever the
//! individual components do.
//!
//! ## Diagnostics
//!
//! - [`PipelineBuilder::checkpoint`] places a labeled checkpoint in the chain
//! - [`Transformer::with_checkpoint`] labels a stage; its checkpoint follows it
//! - [`PipelineBuilder::with_operator_debug`] records every stage added
//!   afterwards on failures that pass it
//!
//! ## Error handlers
//!
//! A failure must be handled somewhere: either by the consumer's error handler
//! or by a [`PipelineBuilder::do_on_error`] stage downstream of the failing
//! stage. A failed run whose failure reached no handler returns
//! [`PipelineError::Unhandled`].

use crate::error::{ComponentInfo, ErrorHandler, PipelineError, StreamError};
use crate::log_sink::SharedLogSink;
use crate::output::{ItemStream, Output};
use crate::transformers::{CheckpointTransformer, DoOnErrorTransformer, SignalLogTransformer};
use crate::{consumer::Consumer, producer::Producer, transformer::Transformer};
use futures::StreamExt;
use std::fmt::Display;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};

/// Builder state before a producer is set.
pub struct Empty;

/// Builder state once the producer is set; holds the stream built so far.
pub struct HasProducer<T> {
  stream: ItemStream<T>,
  stages: usize,
}

/// Builds a pipeline step by step.
pub struct PipelineBuilder<State> {
  state: State,
  operator_debug: bool,
}

/// A fully assembled pipeline, ready to run.
pub struct Pipeline<T, C>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
  C: Consumer<Input = T, InputStream = ItemStream<T>>,
{
  stream: ItemStream<T>,
  consumer: C,
}

/// Outcome of a pipeline run.
#[derive(Debug, Clone)]
pub struct RunSummary<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  /// Number of items delivered to the consumer.
  pub delivered: usize,
  /// The failure that ended the run, if any.
  pub failure: Option<StreamError<T>>,
}

impl<T> RunSummary<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  /// Returns `true` when the run ended with a failure.
  pub fn failed(&self) -> bool {
    self.failure.is_some()
  }
}

struct RunState<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  delivered: usize,
  failure: Option<StreamError<T>>,
}

impl<T> Default for RunState<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  fn default() -> Self {
    Self {
      delivered: 0,
      failure: None,
    }
  }
}

/// Ends `stream` right after its first failure.
///
/// The upstream is not polled again once a failure has been forwarded, so
/// items behind the failing one are never produced.
pub fn fail_fast<T>(stream: ItemStream<T>) -> ItemStream<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  Box::pin(stream.scan(false, |failed, result| {
    if *failed {
      return futures::future::ready(None);
    }
    *failed = result.is_err();
    futures::future::ready(Some(result))
  }))
}

impl PipelineBuilder<Empty> {
  /// Creates an empty builder with operator debug disabled.
  pub fn new() -> Self {
    PipelineBuilder {
      state: Empty,
      operator_debug: false,
    }
  }

  /// Enables or disables operator debug for the stages added to this builder.
  #[must_use]
  pub fn with_operator_debug(mut self, enabled: bool) -> Self {
    self.operator_debug = enabled;
    self
  }

  /// Sets the producer at the start of the pipeline.
  ///
  /// The producer's stream ends after its first failure.
  pub fn producer<P>(self, mut producer: P) -> PipelineBuilder<HasProducer<P::Output>>
  where
    P: Producer + Output<OutputStream = ItemStream<<P as Output>::Output>>,
  {
    let info = producer.component_info();
    debug!(
      component = %info.name,
      operator_debug = self.operator_debug,
      "Pipeline producer attached"
    );

    PipelineBuilder {
      state: HasProducer {
        stream: fail_fast(producer.produce()),
        stages: 0,
      },
      operator_debug: self.operator_debug,
    }
  }
}

impl Default for PipelineBuilder<Empty> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> PipelineBuilder<HasProducer<T>>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  /// Appends a stage to the chain.
  ///
  /// The stage's output ends after its first failure. With operator debug on,
  /// the stage is recorded on failures passing it; a checkpoint label set with
  /// [`Transformer::with_checkpoint`] is recorded right after that.
  #[must_use]
  pub fn transformer<X>(mut self, mut transformer: X) -> Self
  where
    X: Transformer<
        Input = T,
        InputStream = ItemStream<T>,
        Output = T,
        OutputStream = ItemStream<T>,
      >,
  {
    let info = transformer.component_info();
    let label = transformer.config().checkpoint();
    debug!(
      component = %info.name,
      component_type = %info.type_name,
      position = self.state.stages,
      "Pipeline stage attached"
    );

    let mut stream = fail_fast(transformer.transform(self.state.stream));
    if self.operator_debug {
      stream = CheckpointTransformer::<T>::operator(&info).transform(stream);
    }
    if let Some(label) = label {
      stream = CheckpointTransformer::<T>::new(label).transform(stream);
    }

    self.state = HasProducer {
      stream,
      stages: self.state.stages + 1,
    };
    self
  }

  /// Places a labeled checkpoint at the current end of the chain.
  #[must_use]
  pub fn checkpoint(self, label: impl Into<String>) -> Self {
    self.passthrough(CheckpointTransformer::new(label))
  }

  /// Hands the failure of the run to `handler` at the current end of the chain.
  ///
  /// This declares error handling on the producer side: failures raised
  /// upstream of this point no longer need a consumer-side handler. Failures
  /// raised by stages added afterwards never reach `handler`.
  #[must_use]
  pub fn do_on_error(self, handler: ErrorHandler<T>) -> Self {
    self.passthrough(DoOnErrorTransformer::new(handler))
  }

  /// Logs every signal passing the current end of the chain to `sink`.
  #[must_use]
  pub fn log(self, sink: SharedLogSink) -> Self
  where
    T: Display,
  {
    self.passthrough(SignalLogTransformer::new(sink))
  }

  /// Finishes the pipeline with a consumer.
  pub fn consumer<C>(self, consumer: C) -> Pipeline<T, C>
  where
    C: Consumer<Input = T, InputStream = ItemStream<T>>,
  {
    Pipeline {
      stream: self.state.stream,
      consumer,
    }
  }

  fn passthrough<X>(mut self, mut stage: X) -> Self
  where
    X: Transformer<
        Input = T,
        InputStream = ItemStream<T>,
        Output = T,
        OutputStream = ItemStream<T>,
      >,
  {
    self.state.stream = stage.transform(self.state.stream);
    self
  }
}

impl<T, C> Pipeline<T, C>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
  C: Consumer<Input = T, InputStream = ItemStream<T>>,
{
  /// Runs the pipeline to completion.
  ///
  /// Returns the run summary together with the consumer. Fails with
  /// [`PipelineError::Unhandled`] when the run ended in a failure that no error
  /// handler was invoked with.
  pub async fn run(self) -> Result<(RunSummary<T>, C), PipelineError<T>> {
    let Pipeline {
      stream,
      mut consumer,
    } = self;
    let consumer_info: ComponentInfo = consumer.component_info();

    let state = Arc::new(Mutex::new(RunState::<T>::default()));
    let recorder = Arc::clone(&state);
    let observed: ItemStream<T> = Box::pin(fail_fast(stream).inspect(move |result| {
      let mut state = recorder.lock().unwrap_or_else(PoisonError::into_inner);
      match result {
        Ok(_) => state.delivered += 1,
        Err(error) => {
          state.failure.get_or_insert_with(|| error.clone());
        }
      }
    }));

    consumer.consume(observed).await;

    let RunState { delivered, failure } =
      std::mem::take(&mut *state.lock().unwrap_or_else(PoisonError::into_inner));
    debug!(
      consumer = %consumer_info.name,
      delivered,
      failed = failure.is_some(),
      "Pipeline run finished"
    );

    match failure {
      Some(error) if !error.is_handled() => {
        warn!(
          component = %error.component.name,
          error = %error,
          "Pipeline failure was not handled"
        );
        Err(PipelineError::Unhandled(error))
      }
      failure => Ok((RunSummary { delivered, failure }, consumer)),
    }
  }
}
