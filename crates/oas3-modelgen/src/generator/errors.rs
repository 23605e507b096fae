use thiserror::Error;

/// Fatal errors of a transformation run.
///
/// Every variant aborts the run; partially built models and routes are discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelgenError {
  #[error("reference '{pointer}' does not resolve inside the document")]
  DanglingReference { pointer: String },

  #[error("invalid definition for '{property}': {message}")]
  InvalidDefinition { property: String, message: String },

  #[error("not supported for dialect '{dialect}': {message}")]
  NotSupported { dialect: String, message: String },

  #[error("malformed path '{path}': {reason}")]
  MalformedPath { path: String, reason: String },

  #[error("reference cycle detected at '{pointer}': {}", chain.join(" -> "))]
  CycleDetected { pointer: String, chain: Vec<String> },
}

impl ModelgenError {
  pub(crate) fn invalid_definition(property: impl Into<String>, message: impl Into<String>) -> Self {
    Self::InvalidDefinition {
      property: property.into(),
      message: message.into(),
    }
  }

  pub(crate) fn malformed_path(path: impl Into<String>, reason: impl ToString) -> Self {
    Self::MalformedPath {
      path: path.into(),
      reason: reason.to_string(),
    }
  }
}

pub type Result<T> = std::result::Result<T, ModelgenError>;
