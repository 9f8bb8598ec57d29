//! Input binding and validation.
//!
//! Each form converts an untyped submission into a cleaned value set, or a
//! set of errors keyed by field name. Field-level rules run first and all
//! of their failures are collected; cross-field rules run once per
//! submission after every field-level rule has passed. Forms never touch
//! persisted state.

pub mod author;
pub mod book;
pub mod instance;
pub mod renew;
pub mod validators;

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

/// Machine-readable reason for a single field failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum FieldErrorCode {
    RequiredFieldMissing,
    DateTooEarly,
    DateTooLate,
    InvalidDateOrder,
    DuplicateName,
    InvalidChoice,
    MissingBorrower,
}

/// One itemized failure on one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub code: FieldErrorCode,
    pub message: String,
}

impl FieldError {
    pub fn new(code: FieldErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn required() -> Self {
        Self::new(FieldErrorCode::RequiredFieldMissing, "This field is required")
    }

    pub fn invalid_choice(message: impl Into<String>) -> Self {
        Self::new(FieldErrorCode::InvalidChoice, message)
    }
}

/// Validation errors keyed by the submitted field name.
///
/// Cross-field failures are recorded under the field they are most usefully
/// shown next to (the death date for ordering, the last name for duplicate
/// names), mirroring how the submission would be re-rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FormErrors(#[schema(value_type = Object)] BTreeMap<String, Vec<FieldError>>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for a field, preserving earlier failures on it.
    pub fn add(&mut self, field: &str, error: FieldError) {
        self.0.entry(field.to_string()).or_default().push(error);
    }

    /// Fold another error set into this one.
    pub fn merge(&mut self, other: FormErrors) {
        for (field, errors) in other.0 {
            self.0.entry(field).or_default().extend(errors);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Failures recorded for a field, if any.
    pub fn field(&self, field: &str) -> Option<&[FieldError]> {
        self.0.get(field).map(|v| v.as_slice())
    }

    /// Turn an accumulated error set into a result.
    pub fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Bind a required text field: trimmed, non-empty, or a
/// `RequiredFieldMissing` recorded against it.
pub(crate) fn required_text(
    value: &Option<String>,
    field: &str,
    errors: &mut FormErrors,
) -> Option<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Some(v.to_string()),
        _ => {
            errors.add(field, FieldError::required());
            None
        }
    }
}
