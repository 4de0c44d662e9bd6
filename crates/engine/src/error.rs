//! The module contains the errors the engine can raise.
//!
//! The taxonomy mirrors what the HTTP layer needs to build a response:
//!
//! - [`Validation`] carries the offending field (and stop index for
//!   itinerary input) so the caller can render a field-level error.
//! - [`LockedTrip`] and [`Forbidden`] are authorization failures.
//! - [`NotFound`] covers missing trips, shares and catalog references.
//! - [`Conflict`] is raised for a duplicate share link.
//!
//! [`Validation`]: EngineError::Validation
//! [`LockedTrip`]: EngineError::LockedTrip
//! [`Forbidden`]: EngineError::Forbidden
//! [`NotFound`]: EngineError::NotFound
//! [`Conflict`]: EngineError::Conflict

use core::fmt;

use sea_orm::DbErr;
use thiserror::Error;

/// A single rejected input field.
///
/// `stop` is set when the field belongs to a stop (or one of its activities)
/// inside an itinerary payload, so the UI can point at the right row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub stop: Option<usize>,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stop {
            Some(index) => write!(f, "{} (stop {}): {}", self.field, index, self.message),
            None => write!(f, "{}: {}", self.field, self.message),
        }
    }
}

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    Validation(ValidationError),
    #[error("trip \"{0}\" is locked")]
    LockedTrip(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("\"{0}\" not found")]
    NotFound(String),
    #[error("\"{0}\" already present")]
    Conflict(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// Validation failure on a trip-level field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(ValidationError {
            field: field.into(),
            stop: None,
            message: message.into(),
        })
    }

    /// Validation failure on a field of the stop at `index` (0-based input
    /// position, as submitted by the caller).
    pub fn validation_at(
        index: usize,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Validation(ValidationError {
            field: field.into(),
            stop: Some(index),
            message: message.into(),
        })
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::LockedTrip(a), Self::LockedTrip(b)) => a == b,
            (Self::Forbidden(a), Self::Forbidden(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::Conflict(a), Self::Conflict(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
