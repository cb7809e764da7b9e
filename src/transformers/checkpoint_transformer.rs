//! Checkpoint transformer for weavetrace.
//!
//! A checkpoint passes items through untouched. When a failure flows past it,
//! the checkpoint appends its site to the failure's diagnostic trail. Since a
//! failure only travels downstream, the trail ends up holding exactly the
//! checkpoints placed at or after the failing stage, in chain order.

use crate::diagnostic::ObservedSite;
use crate::error::ComponentInfo;
use crate::output::ItemStream;
use crate::{Input, Output, Transformer, TransformerConfig};
use futures::StreamExt;
use std::marker::PhantomData;
use tracing::debug;

/// A pass-through stage that records itself on failures flowing past.
#[derive(Debug, Clone)]
pub struct CheckpointTransformer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  site: ObservedSite,
  /// Configuration for the transformer.
  pub config: TransformerConfig,
  _phantom: PhantomData<T>,
}

impl<T> CheckpointTransformer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  /// Creates a labeled checkpoint.
  pub fn new(label: impl Into<String>) -> Self {
    Self::for_site(ObservedSite::Checkpoint(label.into()))
  }

  /// Creates a checkpoint that records the given stage, as operator debug does.
  pub fn operator(stage: &ComponentInfo) -> Self {
    Self::for_site(ObservedSite::Operator {
      type_name: stage.type_name.clone(),
      name: stage.name.clone(),
    })
  }

  fn for_site(site: ObservedSite) -> Self {
    Self {
      site,
      config: TransformerConfig::default(),
      _phantom: PhantomData,
    }
  }

  /// The site this checkpoint records.
  pub fn site(&self) -> &ObservedSite {
    &self.site
  }
}

impl<T> Input for CheckpointTransformer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  type Input = T;
  type InputStream = ItemStream<T>;
}

impl<T> Output for CheckpointTransformer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  type Output = T;
  type OutputStream = ItemStream<T>;
}

impl<T> Transformer for CheckpointTransformer<T>
where
  T: std::fmt::Debug + Clone + Send + Sync + 'static,
{
  fn transform(&mut self, input: Self::InputStream) -> Self::OutputStream {
    let site = self.site.clone();

    Box::pin(input.map(move |result| {
      result.map_err(|mut error| {
        debug!(site = %site, failed_in = %error.component.name, "Checkpoint observed failure");
        error.observe(site.clone());
        error
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
        .unwrap_or_else(|| self.site.label().to_string()),
      type_name: "CheckpointTransformer".to_string(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::{PoisonItemError, StreamError};
  use futures::stream;

  #[tokio::test]
  async fn test_checkpoint_ignores_successful_items() {
    let mut checkpoint = CheckpointTransformer::new("after source");
    let input: ItemStream<String> = Box::pin(stream::iter(vec![
      Ok::<_, StreamError<String>>("A".to_string()),
      Ok("B".to_string()),
    ]));

    let output: Vec<String> = checkpoint
      .transform(input)
      .map(|r| r.unwrap())
      .collect()
      .await;

    assert_eq!(output, vec!["A", "B"]);
  }

  #[tokio::test]
  async fn test_checkpoint_records_failure() {
    let stage = ComponentInfo::new("poison[F]".to_string(), "PoisonTransformer".to_string());
    let failure = StreamError::raised_by(PoisonItemError::new("F"), "F".to_string(), &stage);
    let mut labeled = CheckpointTransformer::new("MY CHECKPOINT F");
    let mut operator = CheckpointTransformer::operator(&stage);

    let input: ItemStream<String> = Box::pin(stream::iter(vec![Err::<String, _>(failure)]));
    let output: Vec<_> = operator.transform(labeled.transform(input)).collect().await;

    let error = output[0].as_ref().unwrap_err();
    assert_eq!(
      error.diagnostics().sites(),
      &[
        ObservedSite::Checkpoint("MY CHECKPOINT F".to_string()),
        ObservedSite::Operator {
          type_name: "PoisonTransformer".to_string(),
          name: "poison[F]".to_string(),
        },
      ]
    );
  }

  #[test]
  fn test_checkpoint_component_info_uses_label() {
    let checkpoint = CheckpointTransformer::<i32>::new("here");
    assert_eq!(checkpoint.component_info().name, "here");
    assert_eq!(checkpoint.site().label(), "here");
  }
}
