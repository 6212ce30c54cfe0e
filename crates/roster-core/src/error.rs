//! Error types for `roster-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A required top-level request or id was not supplied.
  #[error("value cannot be null: {0}")]
  NullArgument(&'static str),

  /// A field failed validation, a uniqueness rule was violated, or a
  /// referenced id does not exist.
  #[error("{0}")]
  InvalidArgument(String),

  #[error("repository error: {0}")]
  Repository(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn repository<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Repository(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
