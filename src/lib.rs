//! # weavetrace
//!
//! Fail-fast reactive pipelines with error diagnostics, in pure Rust.
//!
//! weavetrace builds linear pipelines out of a producer, a chain of stages and a
//! consumer. Any stage may fail; the first failure ends the run and travels
//! downstream to the error handlers configured for it. On its way it collects a
//! diagnostic trail: the checkpoints it passed, and with operator debug enabled,
//! every stage it passed.
//!
//! ## Key Features
//!
//! - **Fail-Fast**: The first failure terminates the run; nothing after the
//!   failing item is produced
//! - **Two Error Sinks**: Handle failures in the consumer, or declare handling on
//!   the producer side with `do_on_error`
//! - **Checkpoints**: Labeled markers that show where a failure was observed
//! - **Operator Debug**: Automatic checkpoints for every stage
//!
//! ## Quick Start
//!
//! ```rust
//! use weavetrace::consumers::VecConsumer;
//! use weavetrace::error::{StreamError, error_handler};
//! use weavetrace::producers::VecProducer;
//! use weavetrace::transformers::PoisonTransformer;
//! use weavetrace::{PipelineBuilder, Transformer};
//!
//! # tokio_test::block_on(async {
//! let letters: Vec<String> = vec!["A", "B", "F", "G"].into_iter().map(String::from).collect();
//! let (summary, consumer) = PipelineBuilder::new()
//!     .producer(VecProducer::new(letters))
//!     .transformer(PoisonTransformer::new("F".to_string()).with_checkpoint("no F's past here"))
//!     .do_on_error(error_handler(|error: &StreamError<String>| eprintln!("{error}")))
//!     .consumer(VecConsumer::new())
//!     .run()
//!     .await
//!     .expect("failure is handled by do_on_error");
//!
//! assert_eq!(consumer.into_vec(), vec!["A", "B"]);
//! let failure = summary.failure.expect("F is poisonous");
//! assert_eq!(failure.diagnostics().labels().collect::<Vec<_>>(), vec!["no F's past here"]);
//! # });
//! ```

#![warn(missing_docs)]

/// Consumer trait and configuration.
pub mod consumer;
/// Built-in consumers.
pub mod consumers;
/// Diagnostic trail of observed sites.
pub mod diagnostic;
/// Error types and error handlers.
pub mod error;
/// Input side of pipeline components.
pub mod input;
/// Log line sinks.
pub mod log_sink;
/// Output side of pipeline components.
pub mod output;
/// Pipeline builder and runner.
pub mod pipeline;
/// Producer trait and configuration.
pub mod producer;
/// Built-in producers.
pub mod producers;
/// Human-readable failure reports.
pub mod reporter;
/// The letters demonstration in its four error-handling variants.
pub mod scenario;
/// Transformer trait and configuration.
pub mod transformer;
/// Built-in pipeline stages.
pub mod transformers;

#[cfg(test)]
mod error_test;

pub use consumer::{Consumer, ConsumerConfig};
pub use input::Input;
pub use output::Output;
pub use pipeline::{Pipeline, PipelineBuilder, RunSummary};
pub use producer::{Producer, ProducerConfig};
pub use transformer::{Transformer, TransformerConfig};
