use std::collections::BTreeSet;

use crate::generator::dialect::Dialect;

/// Settings injected once per transformation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, bon::Builder)]
pub struct ModelgenConfig {
  #[builder(default)]
  pub dialect: Dialect,
  /// Top-level schema names never turned into models.
  #[builder(default)]
  pub excluded_models: BTreeSet<String>,
}
