//! Diagnostic trail carried by a failure.
//!
//! A [`DiagnosticContext`] lists, in chain order, every site that saw a
//! failure pass by on its way downstream. Sites upstream of the failing stage
//! never see the failure and are therefore never recorded.
//!
//! Two kinds of site exist:
//!
//! - **Checkpoints**: user-supplied labels placed in the chain.
//! - **Operators**: stages recorded automatically when operator debug is
//!   enabled on the pipeline builder.

use std::fmt;

/// First line of the observed-sites section of an error report.
pub const OBSERVED_HEADER: &str = "Error has been observed at the following site(s):";

/// Prefix of each observed-site line in an error report.
pub const SITE_PREFIX: &str = "\t|_ ";

/// A point in the chain that observed a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservedSite {
  /// A labeled checkpoint.
  Checkpoint(String),
  /// A stage recorded by operator debug.
  Operator {
    /// Type of the stage, e.g. `PoisonTransformer`.
    type_name: String,
    /// Name of the stage.
    name: String,
  },
}

impl ObservedSite {
  /// The label identifying this site.
  pub fn label(&self) -> &str {
    match self {
      ObservedSite::Checkpoint(label) => label,
      ObservedSite::Operator { name, .. } => name,
    }
  }

  /// Renders the report line for this site, e.g. `\t|_ checkpoint ⇢ MY CHECKPOINT`.
  pub fn report_line(&self) -> String {
    format!("{SITE_PREFIX}{self}")
  }
}

impl fmt::Display for ObservedSite {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ObservedSite::Checkpoint(label) => write!(f, "checkpoint ⇢ {label}"),
      ObservedSite::Operator { type_name, name } => write!(f, "{type_name} ⇢ {name}"),
    }
  }
}

/// Ordered trail of the sites that observed a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticContext {
  sites: Vec<ObservedSite>,
}

impl DiagnosticContext {
  /// Creates an empty trail.
  pub fn new() -> Self {
    Self::default()
  }

  /// Appends a site to the end of the trail.
  pub fn observe(&mut self, site: ObservedSite) {
    self.sites.push(site);
  }

  /// The recorded sites in chain order.
  pub fn sites(&self) -> &[ObservedSite] {
    &self.sites
  }

  /// The labels of the recorded sites in chain order.
  pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
    self.sites.iter().map(ObservedSite::label)
  }

  /// Returns `true` when no site observed the failure.
  pub fn is_empty(&self) -> bool {
    self.sites.is_empty()
  }

  /// Number of recorded sites.
  pub fn len(&self) -> usize {
    self.sites.len()
  }

  /// Report lines: the observed-sites header followed by one line per site.
  ///
  /// Empty when nothing was observed.
  pub fn report_lines(&self) -> Vec<String> {
    if self.sites.is_empty() {
      return Vec::new();
    }
    std::iter::once(OBSERVED_HEADER.to_string())
      .chain(self.sites.iter().map(ObservedSite::report_line))
      .collect()
  }
}

impl fmt::Display for DiagnosticContext {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.report_lines().join("\n"))
  }
}
