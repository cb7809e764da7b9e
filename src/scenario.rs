//! The letters demonstration.
//!
//! A stream of letters runs through poison stages that reject particular
//! letters. Each [`Variant`] handles the resulting failure differently:
//!
//! - [`Variant::Subscriber`]: the consumer carries the error handler
//! - [`Variant::Publisher`]: the pipeline declares the handler with `do_on_error`
//! - [`Variant::Checkpoint`]: as `Publisher`, with a checkpoint after the
//!   source and after every stage
//! - [`Variant::OperatorDebug`]: as `Checkpoint`, with operator debug enabled
//!
//! Every delivered letter is written to the log sink as `new letter <letter>`,
//! and every failure as an `OH NOES!` report.

use crate::consumers::CallbackConsumer;
use crate::error::PipelineError;
use crate::log_sink::SharedLogSink;
use crate::pipeline::RunSummary;
use crate::producers::VecProducer;
use crate::reporter::ErrorReporter;
use crate::transformers::PoisonTransformer;
use crate::{Consumer, PipelineBuilder, Producer, Transformer};
use std::fmt;
use tracing::info;

/// Letter rejected by the single poison stage of the first two variants.
pub const POISON_TOKEN: &str = "F";

/// Label of the checkpoint placed right after the source.
pub const SOURCE_CHECKPOINT: &str = "MY CHECKPOINT: letters should have been added to the stream";

/// A poison stage of the checkpoint variants and the label of its checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckpointStage {
  /// Letter rejected by the stage.
  pub trigger: &'static str,
  /// Label of the checkpoint following the stage.
  pub label: &'static str,
}

/// Stages of the checkpoint variants, in chain order.
pub const CHECKPOINT_STAGES: [CheckpointStage; 4] = [
  CheckpointStage {
    trigger: "C",
    label: "MY CHECKPOINT C: exception should have been forced at letter C",
  },
  CheckpointStage {
    trigger: "D",
    label: "MY CHECKPOINT D: exception should have been forced at letter D",
  },
  CheckpointStage {
    trigger: "F",
    label: "MY CHECKPOINT F: exception should have been forced at letter F",
  },
  CheckpointStage {
    trigger: "Z",
    label: "MY CHECKPOINT Z: NO exception should have been forced",
  },
];

/// Error-handling variant of the demonstration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Variant {
  /// Error handling in the consumer.
  Subscriber,
  /// Error handling declared on the producer side.
  Publisher,
  /// Producer-side handling plus checkpoints.
  Checkpoint,
  /// Producer-side handling plus checkpoints and operator debug.
  OperatorDebug,
}

impl Variant {
  /// All variants, in presentation order.
  pub const ALL: [Variant; 4] = [
    Variant::Subscriber,
    Variant::Publisher,
    Variant::Checkpoint,
    Variant::OperatorDebug,
  ];

  /// The letters the variant's source emits.
  pub fn tokens(self) -> Vec<String> {
    let tokens: &[&str] = match self {
      Variant::Publisher => &["AA", "BB", "CC", "DD", "F"],
      Variant::Subscriber | Variant::Checkpoint | Variant::OperatorDebug => {
        &["A", "B", "C", "D", "F"]
      }
    };
    tokens.iter().map(|token| token.to_string()).collect()
  }

  /// Whether the variant places checkpoints in the chain.
  pub fn uses_checkpoints(self) -> bool {
    matches!(self, Variant::Checkpoint | Variant::OperatorDebug)
  }
}

impl fmt::Display for Variant {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Variant::Subscriber => "subscriber",
      Variant::Publisher => "publisher",
      Variant::Checkpoint => "checkpoint",
      Variant::OperatorDebug => "operator-debug",
    };
    f.write_str(name)
  }
}

/// The line written for a delivered letter.
pub fn item_line(letter: &str) -> String {
  format!("new letter {letter}")
}

/// Runs `variant` with its own letters, writing all output to `sink`.
pub async fn run(
  variant: Variant,
  sink: SharedLogSink,
) -> Result<RunSummary<String>, PipelineError<String>> {
  run_letters(variant, variant.tokens(), sink).await
}

/// Runs `variant` over the given letters, writing all output to `sink`.
pub async fn run_letters(
  variant: Variant,
  letters: Vec<String>,
  sink: SharedLogSink,
) -> Result<RunSummary<String>, PipelineError<String>> {
  let reporter = ErrorReporter::new(sink.clone());
  let printer = sink.clone();
  let consumer = CallbackConsumer::new(move |letter: &String| printer.info(&item_line(letter)))
    .with_name("letter_printer".to_string());

  let builder = PipelineBuilder::new()
    .with_operator_debug(variant == Variant::OperatorDebug)
    .producer(VecProducer::new(letters).with_name("letters".to_string()));

  let (summary, _) = match variant {
    Variant::Subscriber => {
      builder
        .transformer(PoisonTransformer::new(POISON_TOKEN.to_string()))
        .log(sink)
        .consumer(consumer.with_error_handler(reporter.handler()))
        .run()
        .await?
    }
    Variant::Publisher => {
      builder
        .transformer(PoisonTransformer::new(POISON_TOKEN.to_string()))
        .log(sink)
        .do_on_error(reporter.handler())
        .consumer(consumer)
        .run()
        .await?
    }
    Variant::Checkpoint | Variant::OperatorDebug => {
      let mut builder = builder.checkpoint(SOURCE_CHECKPOINT);
      for stage in CHECKPOINT_STAGES {
        let poison = PoisonTransformer::new(stage.trigger.to_string()).with_checkpoint(stage.label);
        builder = builder.transformer(poison);
      }
      builder
        .log(sink)
        .do_on_error(reporter.handler())
        .consumer(consumer)
        .run()
        .await?
    }
  };

  info!(
    variant = %variant,
    delivered = summary.delivered,
    failed = summary.failed(),
    "Scenario finished"
  );
  Ok(summary)
}
