//! # Transformers Module
//!
//! Pipeline stages for weavetrace. Every stage maps items of one type to the
//! same type, so stages can be chained freely by the
//! [`PipelineBuilder`](crate::pipeline::PipelineBuilder).
//!
//! ## Overview
//!
//! - **Failing stages**: [`PoisonTransformer`] rejects a trigger token,
//!   [`TryMapTransformer`] applies a fallible function
//! - **Diagnostics**: [`CheckpointTransformer`] records itself on failures
//!   flowing past
//! - **Observation**: [`DoOnErrorTransformer`] hands the failure to an error
//!   handler, [`SignalLogTransformer`] logs every stream signal
//!
//! ## Error Handling
//!
//! Stages never swallow failures. A failure raised by a stage, or received from
//! upstream, is forwarded downstream as the last element of the stream.

/// Labeled and operator checkpoints.
pub mod checkpoint_transformer;
/// Producer-side error handler stage.
pub mod do_on_error_transformer;
/// Stage failing on a trigger token.
pub mod poison_transformer;
/// Stream signal logging.
pub mod signal_log_transformer;
/// Stage applying a fallible function.
pub mod try_map_transformer;

pub use checkpoint_transformer::CheckpointTransformer;
pub use do_on_error_transformer::DoOnErrorTransformer;
pub use poison_transformer::PoisonTransformer;
pub use signal_log_transformer::{SignalLog, SignalLogTransformer};
pub use try_map_transformer::TryMapTransformer;
