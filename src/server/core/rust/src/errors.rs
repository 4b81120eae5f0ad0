/* src/server/core/rust/src/errors.rs */

use std::fmt;

#[derive(Debug)]
pub struct PleatError {
  code: String,
  message: String,
  status: u16,
}

fn default_status(code: &str) -> u16 {
  match code {
    "VALIDATION_ERROR" => 400,
    "NOT_FOUND" => 404,
    "RENDER_ERROR" => 500,
    "INTERNAL_ERROR" => 500,
    _ => 500,
  }
}

impl PleatError {
  pub fn new(code: impl Into<String>, message: impl Into<String>, status: u16) -> Self {
    Self { code: code.into(), message: message.into(), status }
  }

  pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
    let code = code.into();
    let status = default_status(&code);
    Self { code, message: message.into(), status }
  }

  pub fn validation(msg: impl Into<String>) -> Self {
    Self::with_code("VALIDATION_ERROR", msg)
  }

  pub fn not_found(msg: impl Into<String>) -> Self {
    Self::with_code("NOT_FOUND", msg)
  }

  /// Fault raised by a segment's render closure.
  pub fn render(msg: impl Into<String>) -> Self {
    Self::with_code("RENDER_ERROR", msg)
  }

  pub fn internal(msg: impl Into<String>) -> Self {
    Self::with_code("INTERNAL_ERROR", msg)
  }

  pub fn code(&self) -> &str {
    &self.code
  }

  pub fn message(&self) -> &str {
    &self.message
  }

  pub fn status(&self) -> u16 {
    self.status
  }
}

impl fmt::Display for PleatError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.code, self.message)
  }
}

impl std::error::Error for PleatError {}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_status_known_codes() {
    assert_eq!(default_status("VALIDATION_ERROR"), 400);
    assert_eq!(default_status("NOT_FOUND"), 404);
    assert_eq!(default_status("RENDER_ERROR"), 500);
    assert_eq!(default_status("INTERNAL_ERROR"), 500);
  }

  #[test]
  fn default_status_unknown_code() {
    assert_eq!(default_status("CUSTOM_ERROR"), 500);
  }

  #[test]
  fn new_explicit_status() {
    let err = PleatError::new("NOT_FOUND", "gone", 404);
    assert_eq!(err.code(), "NOT_FOUND");
    assert_eq!(err.message(), "gone");
    assert_eq!(err.status(), 404);
  }

  #[test]
  fn convenience_constructors() {
    assert_eq!(PleatError::validation("x").status(), 400);
    assert_eq!(PleatError::not_found("x").status(), 404);
    assert_eq!(PleatError::render("x").status(), 500);
    assert_eq!(PleatError::internal("x").status(), 500);
  }

  #[test]
  fn display_format() {
    let err = PleatError::not_found("missing");
    assert_eq!(err.to_string(), "NOT_FOUND: missing");
  }
}
