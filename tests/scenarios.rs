use proptest::prelude::*;
use std::sync::Arc;
use weavetrace::diagnostic::{OBSERVED_HEADER, SITE_PREFIX};
use weavetrace::log_sink::{LogLevel, MemoryLogSink};
use weavetrace::reporter::DEFAULT_HEADER;
use weavetrace::scenario::{self, CHECKPOINT_STAGES, SOURCE_CHECKPOINT, Variant, item_line};

fn letters(items: &[&str]) -> Vec<String> {
  items.iter().map(|item| item.to_string()).collect()
}

fn item_lines(sink: &MemoryLogSink) -> Vec<String> {
  sink
    .messages_at(LogLevel::Info)
    .into_iter()
    .filter(|line| line.starts_with("new letter "))
    .collect()
}

fn checkpoint_line(label: &str) -> String {
  format!("{SITE_PREFIX}checkpoint ⇢ {label}")
}

#[tokio::test]
async fn test_subscriber_variant() {
  let sink = MemoryLogSink::new();
  let summary = scenario::run(Variant::Subscriber, Arc::new(sink.clone()))
    .await
    .unwrap();

  assert_eq!(summary.delivered, 4);
  assert_eq!(
    item_lines(&sink),
    vec!["new letter A", "new letter B", "new letter C", "new letter D"]
  );
  assert_eq!(
    sink.messages_at(LogLevel::Error),
    vec![
      "| onError(Error in poison[F] (PoisonTransformer): can't be an F! no F's!)",
      DEFAULT_HEADER,
      "Error in poison[F] (PoisonTransformer): can't be an F! no F's!",
    ]
  );
  let failure = summary.failure.unwrap();
  assert_eq!(failure.item(), Some(&"F".to_string()));
  assert!(failure.diagnostics().is_empty());
}

#[tokio::test]
async fn test_publisher_variant() {
  let sink = MemoryLogSink::new();
  let summary = scenario::run(Variant::Publisher, Arc::new(sink.clone()))
    .await
    .unwrap();

  assert_eq!(
    item_lines(&sink),
    vec!["new letter AA", "new letter BB", "new letter CC", "new letter DD"]
  );
  let headers = sink
    .messages_at(LogLevel::Error)
    .iter()
    .filter(|line| *line == DEFAULT_HEADER)
    .count();
  assert_eq!(headers, 1);
  assert_eq!(summary.failure.unwrap().message(), "can't be an F! no F's!");
}

#[tokio::test]
async fn test_publisher_variant_signal_log() {
  let sink = MemoryLogSink::new();
  scenario::run(Variant::Publisher, Arc::new(sink.clone()))
    .await
    .unwrap();

  let messages = sink.messages();
  assert_eq!(messages[0], "| onSubscribe()");
  assert_eq!(messages[1], "| onNext(AA)");
  assert_eq!(messages[2], item_line("AA"));
  assert!(!messages.iter().any(|line| line == "| onComplete()"));
}

#[tokio::test]
async fn test_checkpoint_variant_fails_at_first_stage() {
  let sink = MemoryLogSink::new();
  let summary = scenario::run(Variant::Checkpoint, Arc::new(sink.clone()))
    .await
    .unwrap();

  assert_eq!(item_lines(&sink), vec!["new letter A", "new letter B"]);

  let failure = summary.failure.unwrap();
  assert_eq!(failure.message(), "can't be an C! no C's!");
  let expected: Vec<&str> = CHECKPOINT_STAGES.iter().map(|stage| stage.label).collect();
  assert_eq!(failure.diagnostics().labels().collect::<Vec<_>>(), expected);

  let mut report = vec![
    DEFAULT_HEADER.to_string(),
    "Error in poison[C] (PoisonTransformer): can't be an C! no C's!".to_string(),
    OBSERVED_HEADER.to_string(),
  ];
  report.extend(CHECKPOINT_STAGES.iter().map(|stage| checkpoint_line(stage.label)));
  let errors = sink.messages_at(LogLevel::Error);
  assert_eq!(errors[1..].to_vec(), report);
  assert!(!errors.contains(&checkpoint_line(SOURCE_CHECKPOINT)));
}

#[tokio::test]
async fn test_checkpoint_variant_fails_late_in_chain() {
  let sink = MemoryLogSink::new();
  let summary = scenario::run_letters(
    Variant::Checkpoint,
    letters(&["A", "B", "F"]),
    Arc::new(sink.clone()),
  )
  .await
  .unwrap();

  assert_eq!(item_lines(&sink), vec!["new letter A", "new letter B"]);
  let failure = summary.failure.unwrap();
  assert_eq!(
    failure.diagnostics().labels().collect::<Vec<_>>(),
    vec![CHECKPOINT_STAGES[2].label, CHECKPOINT_STAGES[3].label]
  );
}

#[tokio::test]
async fn test_operator_debug_variant_traces_every_stage() {
  let sink = MemoryLogSink::new();
  let summary = scenario::run(Variant::OperatorDebug, Arc::new(sink.clone()))
    .await
    .unwrap();

  let failure = summary.failure.unwrap();
  let mut expected = Vec::new();
  for stage in CHECKPOINT_STAGES {
    expected.push(format!("poison[{}]", stage.trigger));
    expected.push(stage.label.to_string());
  }
  let labels: Vec<String> = failure
    .diagnostics()
    .labels()
    .map(str::to_string)
    .collect();
  assert_eq!(labels, expected);

  let errors = sink.messages_at(LogLevel::Error);
  assert!(errors.contains(&format!("{SITE_PREFIX}PoisonTransformer ⇢ poison[C]")));
  assert!(errors.contains(&checkpoint_line(CHECKPOINT_STAGES[0].label)));
}

#[tokio::test]
async fn test_empty_input_completes_silently() {
  for variant in Variant::ALL {
    let sink = MemoryLogSink::new();
    let summary = scenario::run_letters(variant, Vec::new(), Arc::new(sink.clone()))
      .await
      .unwrap();

    assert_eq!(summary.delivered, 0);
    assert!(!summary.failed());
    assert!(item_lines(&sink).is_empty());
    assert!(sink.messages_at(LogLevel::Error).is_empty());
    assert_eq!(sink.messages(), vec!["| onSubscribe()", "| onComplete()"]);
  }
}

#[tokio::test]
async fn test_runs_are_idempotent() {
  for variant in Variant::ALL {
    let first = MemoryLogSink::new();
    let second = MemoryLogSink::new();

    scenario::run(variant, Arc::new(first.clone())).await.unwrap();
    scenario::run(variant, Arc::new(second.clone())).await.unwrap();

    assert_eq!(first.lines(), second.lines());
  }
}

fn safe_letters() -> impl Strategy<Value = Vec<String>> {
  prop::collection::vec("[ABEGH]{1,2}", 0..8)
}

proptest! {
  #[test]
  fn test_clean_sequences_are_fully_delivered(input in safe_letters()) {
    let sink = MemoryLogSink::new();
    let summary = tokio_test::block_on(
      scenario::run_letters(Variant::Publisher, input.clone(), Arc::new(sink.clone())),
    )
    .unwrap();

    prop_assert_eq!(summary.delivered, input.len());
    prop_assert!(summary.failure.is_none());
    let expected: Vec<String> = input.iter().map(|letter| item_line(letter)).collect();
    prop_assert_eq!(item_lines(&sink), expected);
    prop_assert!(sink.messages_at(LogLevel::Error).is_empty());
  }

  #[test]
  fn test_poison_at_position_k(prefix in safe_letters(), suffix in safe_letters()) {
    let mut input = prefix.clone();
    input.push("F".to_string());
    input.extend(suffix);

    let sink = MemoryLogSink::new();
    let summary = tokio_test::block_on(
      scenario::run_letters(Variant::Subscriber, input, Arc::new(sink.clone())),
    )
    .unwrap();

    prop_assert_eq!(summary.delivered, prefix.len());
    let expected: Vec<String> = prefix.iter().map(|letter| item_line(letter)).collect();
    prop_assert_eq!(item_lines(&sink), expected);
    let reports = sink
      .messages_at(LogLevel::Error)
      .iter()
      .filter(|line| *line == DEFAULT_HEADER)
      .count();
    prop_assert_eq!(reports, 1);
  }

  #[test]
  fn test_recorded_checkpoints_are_a_suffix(prefix in safe_letters(), failing in 0..4usize) {
    let mut input = prefix.clone();
    input.push(CHECKPOINT_STAGES[failing].trigger.to_string());

    let summary = tokio_test::block_on(
      scenario::run_letters(Variant::Checkpoint, input, Arc::new(MemoryLogSink::new())),
    )
    .unwrap();

    let failure = summary.failure.unwrap();
    let expected: Vec<&str> = CHECKPOINT_STAGES[failing..]
      .iter()
      .map(|stage| stage.label)
      .collect();
    prop_assert_eq!(failure.diagnostics().labels().collect::<Vec<_>>(), expected);
    prop_assert_eq!(summary.delivered, prefix.len());
  }
}
