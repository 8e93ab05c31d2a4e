//! # Error Types
//!
//! Domain-specific error types for shutter-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  shutter-core errors (this file)                                    │
//! │  ├── CoreError        - Business rule violations                    │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  shutter-db errors (separate crate)                                 │
//! │  └── DbError          - Storage failures, version conflicts         │
//! │                                                                     │
//! │  shutter-engine errors                                              │
//! │  └── EngineError      - What API callers see (code + message)       │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → EngineError → caller           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (ids, statuses, amounts)
//! 3. Errors are enum variants, never String
//! 4. Every failure mode the engine can produce has a variant here or in
//!    the db crate; nothing is silently swallowed

use chrono::NaiveDate;
use thiserror::Error;

use crate::types::{BookingStatus, PaymentRequestStatus};

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. They should be caught
/// by the engine layer and translated to caller-facing codes.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Booking cannot be found.
    #[error("Booking not found: {0}")]
    BookingNotFound(String),

    /// Payment request id does not exist on this booking.
    #[error("Payment request not found: {request_id}")]
    RequestNotFound { request_id: String },

    /// Status transition not permitted by the lifecycle graph.
    ///
    /// ## When This Occurs
    /// - Cancelling a Completed booking
    /// - Confirming anything but a Pending booking
    /// - Any attempt to leave a terminal state
    #[error("Cannot move booking from {from:?} to {to:?}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    /// Payment request is not in a state that allows the operation.
    ///
    /// Processing and cancelling are only permitted while Pending.
    #[error("Payment request {request_id} is {status:?}, expected pending")]
    RequestNotPending {
        request_id: String,
        status: PaymentRequestStatus,
    },

    /// The requested amount would push outstanding requests past the total.
    ///
    /// ## Reservation Rule
    /// Pending requests reserve balance. The available amount is
    /// `total − (accepted + pending)`, so two simultaneous requests can
    /// never jointly overcommit.
    #[error("Payment request of {requested_paise} paise exceeds available balance of {available_paise} paise")]
    OverCommit {
        requested_paise: i64,
        available_paise: i64,
    },

    /// Payments are closed on cancelled/refunded bookings.
    #[error("Booking is {status:?}; payment requests are closed")]
    PaymentsClosed { status: BookingStatus },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// The rental range runs backwards.
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidTransition {
            from: BookingStatus::Completed,
            to: BookingStatus::Cancelled,
        };
        assert_eq!(
            err.to_string(),
            "Cannot move booking from Completed to Cancelled"
        );

        let err = CoreError::OverCommit {
            requested_paise: 800_000,
            available_paise: 767_000,
        };
        assert!(err.to_string().contains("800000"));
        assert!(err.to_string().contains("767000"));
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "reason".to_string(),
        };
        assert_eq!(err.to_string(), "reason is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "amount".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
