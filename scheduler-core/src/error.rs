/// Structured error types for scheduler-core.
///
/// Validation and business-rule failures are raised by the service layer and
/// caught by whichever command triggered them. The binary (scheduler-cli)
/// wraps these in `anyhow` for reporting.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Boxed source for storage backends, so this crate does not depend on sqlx.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for scheduler-core operations
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// One or more required form fields were left empty
    #[error("Please complete all required fields. Missing: {}", fields.join(", "))]
    RequiredField { fields: Vec<&'static str> },

    /// Appointment end precedes its start
    #[error("End time cannot be before the Start time.")]
    EndBeforeStart,

    /// Start or end falls outside the Eastern business-hours window
    #[error(
        "WARNING: Appointment does not fall within business hours between 8 AM and 10 PM EST."
    )]
    OutsideBusinessHours,

    /// Candidate overlaps another appointment of the same customer
    #[error(
        "WARNING: Appointment overlaps with another appointment the customer has scheduled (appointment {appointment_id})."
    )]
    Overlap { appointment_id: i32 },

    /// Lookup by id or name found nothing
    #[error("{resource} not found: {key}")]
    NotFound { resource: &'static str, key: String },

    /// Not every appointment of a customer could be removed
    #[error(
        "An error occurred and not all associated appointments were deleted ({remaining} remaining). Customer deletion aborted."
    )]
    DeletionFailed { remaining: usize },

    /// The login activity file could not be toggled writable/read-only
    #[error("Setting {path:?} {reason} failed.")]
    FilePermission { path: PathBuf, reason: &'static str },

    /// Login with an unknown username
    #[error("{message}")]
    UserNotFound { message: String },

    /// Login with the wrong password
    #[error("{message}")]
    PasswordIncorrect { message: String },

    /// Malformed user input (dates, times, names)
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// Storage backend failed
    #[error("Storage error during {operation}: {source}")]
    Storage {
        operation: &'static str,
        #[source]
        source: BoxError,
    },

    /// Configuration error
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

/// Result type alias for scheduler-core operations
pub type Result<T> = std::result::Result<T, SchedulerError>;

impl SchedulerError {
    pub fn required(fields: Vec<&'static str>) -> Self {
        Self::RequiredField { fields }
    }

    pub fn not_found(resource: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            resource,
            key: key.to_string(),
        }
    }

    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub fn storage(operation: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Storage {
            operation,
            source: source.into(),
        }
    }

    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Warnings the user may choose to proceed past
    pub fn is_overridable(&self) -> bool {
        matches!(self, Self::OutsideBusinessHours | Self::Overlap { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SchedulerError::required(vec!["title", "location"]);
        assert_eq!(
            err.to_string(),
            "Please complete all required fields. Missing: title, location"
        );

        let err = SchedulerError::not_found("customer", 42);
        assert_eq!(err.to_string(), "customer not found: 42");
    }

    #[test]
    fn test_overridable_warnings() {
        assert!(SchedulerError::OutsideBusinessHours.is_overridable());
        assert!(SchedulerError::Overlap { appointment_id: 3 }.is_overridable());
        assert!(!SchedulerError::EndBeforeStart.is_overridable());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: SchedulerError = io_err.into();

        assert!(matches!(err, SchedulerError::Io { .. }));
    }
}
