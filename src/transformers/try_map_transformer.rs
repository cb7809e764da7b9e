//! Fallible map transformer for weavetrace.
//!
//! This module provides [`TryMapTransformer`], a stage that applies a fallible
//! function to each item. `Ok` results continue downstream; an `Err` becomes the
//! failure of the run, tagged with the item that caused it and this stage's
//! component information.
//!
//! # Example
//!
//! ```rust
//! use weavetrace::error::PoisonItemError;
//! use weavetrace::transformers::TryMapTransformer;
//!
//! let shout = TryMapTransformer::new(|letter: String| {
//!     if letter.is_empty() {
//!         Err(PoisonItemError::new("<empty>"))
//!     } else {
//!         Ok(letter.to_uppercase())
//!     }
//! });
//! # let _ = shout;
//! ```

use crate::error::{ComponentInfo, StreamError};
use crate::output::ItemStream;
use crate::{Input, Output, Transformer, TransformerConfig};
use futures::StreamExt;
use std::error::Error;
use std::marker::PhantomData;

/// A transformer that applies a fallible function to each item in the stream.
pub struct TryMapTransformer<F, T, E>
where
  F: FnMut(T) -> Result<T, E> + Send + Clone + 'static,
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
  E: Error + Send + Sync + 'static,
{
  /// The function to apply to each input item.
  pub f: F,
  /// Configuration for the transformer.
  pub config: TransformerConfig,
  _phantom: PhantomData<fn(T) -> E>,
}

impl<F, T, E> TryMapTransformer<F, T, E>
where
  F: FnMut(T) -> Result<T, E> + Send + Clone + 'static,
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
  E: Error + Send + Sync + 'static,
{
  /// Creates a new `TryMapTransformer` with the given function.
  pub fn new(f: F) -> Self {
    Self {
      f,
      config: TransformerConfig::default(),
      _phantom: PhantomData,
    }
  }
}

impl<F, T, E> Clone for TryMapTransformer<F, T, E>
where
  F: FnMut(T) -> Result<T, E> + Send + Clone + 'static,
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
  E: Error + Send + Sync + 'static,
{
  fn clone(&self) -> Self {
    Self {
      f: self.f.clone(),
      config: self.config.clone(),
      _phantom: PhantomData,
    }
  }
}

impl<F, T, E> Input for TryMapTransformer<F, T, E>
where
  F: FnMut(T) -> Result<T, E> + Send + Clone + 'static,
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
  E: Error + Send + Sync + 'static,
{
  type Input = T;
  type InputStream = ItemStream<T>;
}

impl<F, T, E> Output for TryMapTransformer<F, T, E>
where
  F: FnMut(T) -> Result<T, E> + Send + Clone + 'static,
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
  E: Error + Send + Sync + 'static,
{
  type Output = T;
  type OutputStream = ItemStream<T>;
}

impl<F, T, E> Transformer for TryMapTransformer<F, T, E>
where
  F: FnMut(T) -> Result<T, E> + Send + Clone + 'static,
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
  E: Error + Send + Sync + 'static,
{
  fn transform(&mut self, input: Self::InputStream) -> Self::OutputStream {
    let mut f = self.f.clone();
    let component = self.component_info();

    Box::pin(input.map(move |result| {
      result.and_then(|item| {
        let original = item.clone();
        f(item).map_err(|error| StreamError::raised_by(error, original, &component))
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
        .unwrap_or_else(|| "try_map_transformer".to_string()),
      type_name: "TryMapTransformer".to_string(),
    }
  }
}
