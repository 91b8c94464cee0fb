//! Validation errors and the handlers that decide how to surface them.
//!
//! A [`Validator`] never fails on its own account. It appends each violation
//! it finds to a [`ValidationHandler`] and forwards whatever the handler
//! answers. The handler is the strategy: [`Notification`] collects every
//! error and lets the pass run to completion, [`ThrowsValidationHandler`]
//! ends the pass at the first one.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

// ─── Errors ──────────────────────────────────────────────────────────────────

/// A single human-readable validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ThisError)]
#[error("{message}")]
pub struct Error {
  pub message: String,
}

impl Error {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
    }
  }

  pub fn message(&self) -> &str { &self.message }
}

/// Raised by a handler that refuses to let validation continue.
/// Carries every error the handler had accumulated, never zero.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("{}", join_messages(.errors))]
pub struct ValidationError {
  errors: Vec<Error>,
}

impl ValidationError {
  /// Returns `None` when `errors` is empty.
  pub fn from_errors(errors: Vec<Error>) -> Option<Self> {
    (!errors.is_empty()).then_some(Self { errors })
  }

  pub fn errors(&self) -> &[Error] { &self.errors }

  pub fn into_errors(self) -> Vec<Error> { self.errors }
}

impl From<Error> for ValidationError {
  fn from(error: Error) -> Self {
    Self {
      errors: vec![error],
    }
  }
}

fn join_messages(errors: &[Error]) -> String {
  errors
    .iter()
    .map(Error::message)
    .collect::<Vec<_>>()
    .join("; ")
}

// ─── Handlers ────────────────────────────────────────────────────────────────

/// Accumulates validation errors and decides whether the pass may go on.
pub trait ValidationHandler {
  /// Record `error`. A handler that stops on violations returns the
  /// accumulated errors as a [`ValidationError`]; the caller must stop.
  fn append(&mut self, error: Error) -> Result<(), ValidationError>;

  /// Errors recorded so far, in the order they were appended.
  fn errors(&self) -> &[Error];

  /// Append every error recorded by `other`, stopping as soon as this
  /// handler refuses one.
  fn append_all<H>(&mut self, other: &H) -> Result<(), ValidationError>
  where
    Self: Sized,
    H: ValidationHandler + ?Sized,
  {
    for error in other.errors() {
      self.append(error.clone())?;
    }
    Ok(())
  }

  fn has_error(&self) -> bool { !self.errors().is_empty() }

  fn first_error(&self) -> Option<&Error> { self.errors().first() }
}

/// Collects every error without interrupting the pass. The caller inspects
/// [`ValidationHandler::errors`] afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
  errors: Vec<Error>,
}

impl Notification {
  pub fn create() -> Self { Self::default() }

  pub fn with_error(error: Error) -> Self {
    Self {
      errors: vec![error],
    }
  }

  /// Wrap an arbitrary failure (a gateway error, a missing record) as a
  /// notification holding its display text.
  pub fn from_failure(failure: impl fmt::Display) -> Self {
    Self::with_error(Error::new(failure.to_string()))
  }

  /// `Ok` if nothing was recorded, otherwise the recorded errors.
  pub fn into_result(self) -> Result<(), ValidationError> {
    match ValidationError::from_errors(self.errors) {
      Some(err) => Err(err),
      None => Ok(()),
    }
  }
}

impl ValidationHandler for Notification {
  fn append(&mut self, error: Error) -> Result<(), ValidationError> {
    self.errors.push(error);
    Ok(())
  }

  fn errors(&self) -> &[Error] { &self.errors }
}

impl From<ValidationError> for Notification {
  fn from(err: ValidationError) -> Self {
    Self {
      errors: err.into_errors(),
    }
  }
}

impl fmt::Display for Notification {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&join_messages(&self.errors))
  }
}

/// Fails the pass on the first appended error.
#[derive(Debug, Clone, Default)]
pub struct ThrowsValidationHandler {
  errors: Vec<Error>,
}

impl ThrowsValidationHandler {
  pub fn new() -> Self { Self::default() }
}

impl ValidationHandler for ThrowsValidationHandler {
  fn append(&mut self, error: Error) -> Result<(), ValidationError> {
    self.errors.push(error);
    Err(ValidationError {
      errors: self.errors.clone(),
    })
  }

  fn errors(&self) -> &[Error] { &self.errors }
}

// ─── Validator ───────────────────────────────────────────────────────────────

/// Checks the invariants of one value against a handler.
///
/// Implementations return `Err` only when the handler refused an error; they
/// must stop checking at that point.
pub trait Validator {
  fn validate<H>(&self, handler: &mut H) -> Result<(), ValidationError>
  where
    H: ValidationHandler + ?Sized;
}
