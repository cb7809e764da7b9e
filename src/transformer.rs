//! # Transformer Trait
//!
//! This module defines the [`Transformer`] trait for pipeline stages. A stage
//! maps every successful item to a new item or to a failure; failures that
//! arrive from upstream are passed through untouched (apart from diagnostic
//! annotations).
//!
//! ## Key Concepts
//!
//! - **Transformer**: A component that transforms a stream of items
//! - **TransformerConfig**: Name and optional checkpoint label of a stage
//! - **Checkpoint label**: When set, the pipeline builder places a checkpoint
//!   with this label right after the stage
//!
//! ## Example
//!
//! ```rust
//! use weavetrace::transformers::PoisonTransformer;
//! use weavetrace::Transformer;
//!
//! let stage = PoisonTransformer::new("F".to_string())
//!     .with_name("reject-f".to_string())
//!     .with_checkpoint("MY CHECKPOINT F");
//!
//! assert_eq!(stage.config().checkpoint(), Some("MY CHECKPOINT F".to_string()));
//! assert_eq!(stage.component_info().name, "reject-f");
//! ```

use crate::error::ComponentInfo;
use crate::{input::Input, output::Output};

/// Configuration for transformers: naming and checkpoint labeling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformerConfig {
  /// Optional name for identifying this transformer in logs and error reports.
  pub name: Option<String>,
  /// Optional checkpoint label recorded when a failure passes this stage.
  pub checkpoint: Option<String>,
}

impl TransformerConfig {
  /// Sets the name for this transformer configuration.
  #[must_use]
  pub fn with_name(mut self, name: String) -> Self {
    self.name = Some(name);
    self
  }

  /// Sets the checkpoint label for this transformer configuration.
  #[must_use]
  pub fn with_checkpoint(mut self, label: String) -> Self {
    self.checkpoint = Some(label);
    self
  }

  /// Returns the current name, if set.
  pub fn name(&self) -> Option<String> {
    self.name.clone()
  }

  /// Returns the checkpoint label, if set.
  pub fn checkpoint(&self) -> Option<String> {
    self.checkpoint.clone()
  }
}

/// Trait for pipeline stages.
///
/// `transform` only wires up the returned stream; no item is processed until
/// the stream is polled.
pub trait Transformer: Input + Output {
  /// Transforms a stream of input items into a stream of output items.
  fn transform(&mut self, input: Self::InputStream) -> Self::OutputStream;

  /// Sets the configuration for this transformer.
  fn set_config(&mut self, config: TransformerConfig) {
    self.set_config_impl(config);
  }

  /// Returns a reference to the transformer's configuration.
  fn config(&self) -> &TransformerConfig {
    self.get_config_impl()
  }

  /// Returns a mutable reference to the transformer's configuration.
  fn config_mut(&mut self) -> &mut TransformerConfig {
    self.get_config_mut_impl()
  }

  /// Sets the name for this transformer.
  #[must_use]
  fn with_name(mut self, name: String) -> Self
  where
    Self: Sized,
  {
    self.config_mut().name = Some(name);
    self
  }

  /// Labels this stage with a checkpoint.
  #[must_use]
  fn with_checkpoint(mut self, label: impl Into<String>) -> Self
  where
    Self: Sized,
  {
    self.config_mut().checkpoint = Some(label.into());
    self
  }

  /// Returns information about this transformer component.
  fn component_info(&self) -> ComponentInfo {
    ComponentInfo {
      name: self
        .config()
        .name
        .clone()
        .unwrap_or_else(|| "transformer".to_string()),
      type_name: std::any::type_name::<Self>().to_string(),
    }
  }

  /// Internal implementation for setting configuration.
  fn set_config_impl(&mut self, config: TransformerConfig);
  /// Internal implementation for getting configuration.
  fn get_config_impl(&self) -> &TransformerConfig;
  /// Internal implementation for getting mutable configuration.
  fn get_config_mut_impl(&mut self) -> &mut TransformerConfig;
}
