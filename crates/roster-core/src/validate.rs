//! Field-level validation of request DTOs.
//!
//! Every failing rule is collected, in declaration order. The stores surface
//! only the first one as [`Error::InvalidArgument`].

use std::{fmt, sync::LazyLock};

use regex::Regex;

use crate::Error;

#[allow(clippy::expect_used)]
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[^@\s]+@[^@\s]+$").expect("static regex should not panic")
});

/// A single failed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
  pub field:   &'static str,
  pub message: &'static str,
}

/// All rules that failed for one request, in the order they were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
  pub fn push(&mut self, field: &'static str, message: &'static str) {
    self.0.push(FieldError { field, message });
  }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn first(&self) -> Option<&FieldError> { self.0.first() }

  pub fn iter(&self) -> impl Iterator<Item = &FieldError> { self.0.iter() }

  /// `Ok(())` if no rule failed.
  pub fn into_result(self) -> Result<(), Self> {
    if self.is_empty() { Ok(()) } else { Err(self) }
  }
}

impl fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.first() {
      Some(e) => f.write_str(e.message),
      None => f.write_str("valid"),
    }
  }
}

impl From<ValidationErrors> for Error {
  fn from(errors: ValidationErrors) -> Self {
    Error::InvalidArgument(errors.to_string())
  }
}

/// Implemented by every request type a store accepts.
pub trait Validate {
  fn validate(&self) -> Result<(), ValidationErrors>;
}

/// `true` for a missing, empty, or whitespace-only value.
pub fn is_blank(value: Option<&str>) -> bool {
  value.is_none_or(|v| v.trim().is_empty())
}

/// A single `@` with something on both sides and no whitespace anywhere.
pub fn is_email(value: &str) -> bool { EMAIL.is_match(value) }

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn blank_values() {
    assert!(is_blank(None));
    assert!(is_blank(Some("")));
    assert!(is_blank(Some("  \t")));
    assert!(!is_blank(Some("x")));
  }

  #[test]
  fn email_shapes() {
    assert!(is_email("person@example.com"));
    assert!(is_email("a@b"));
    assert!(!is_email("person.example.com"));
    assert!(!is_email("@example.com"));
    assert!(!is_email("person@"));
    assert!(!is_email("a@b@c"));
    assert!(!is_email("a b@c"));
  }

  #[test]
  fn first_error_wins() {
    let mut errors = ValidationErrors::default();
    errors.push("person_name", "Person name is required");
    errors.push("email", "Email is required");

    let err = Error::from(errors.clone());
    assert!(
      matches!(err, Error::InvalidArgument(ref m) if m == "Person name is required")
    );
    assert_eq!(errors.iter().count(), 2);
  }

  #[test]
  fn empty_is_ok() {
    assert!(ValidationErrors::default().into_result().is_ok());
  }
}
