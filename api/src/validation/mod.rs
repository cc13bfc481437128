//! Input validation and sanitization for the contact intake pipeline.
//!
//! Three pieces, composed explicitly by the intake handler rather than
//! hidden behind schema hooks:
//!
//! 1. **Sanitizers** — pure functions that clean free-text input.
//! 2. **Validators** — reusable field checks returning `Result<(), String>`.
//! 3. **Requests** — the [`Validatable`] implementation wiring both onto
//!    the wire-level [`shared::ContactRequest`].
//!
//! Validation is aggregate: every failing field is collected before a
//! response is produced, so a caller can fix all problems at once.

use serde::Serialize;

pub mod requests;
pub mod sanitizers;
pub mod validators;

/// A field-level validation error.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// Types that can be sanitized in place and validated as a whole.
pub trait Validatable: Sized {
    /// Sanitize the data in place (trim, strip HTML, normalize).
    fn sanitize(&mut self);

    /// Validate the data, returning every field error at once.
    fn validate(&self) -> Result<(), Vec<FieldError>>;
}

/// Accumulator for field errors across independent checks.
#[derive(Debug, Default)]
pub struct ValidationBuilder {
    errors: Vec<FieldError>,
}

impl ValidationBuilder {
    pub fn new() -> Self {
        Self { errors: vec![] }
    }

    /// Record an error if the check fails.
    pub fn check<F>(&mut self, field: &str, validator: F) -> &mut Self
    where
        F: FnOnce() -> Result<(), String>,
    {
        if let Err(message) = validator() {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn build(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}
