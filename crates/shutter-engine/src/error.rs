//! # Engine Error Type
//!
//! Unified error type for engine operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Shutter                                │
//! │                                                                         │
//! │  Client                      Rust Backend                               │
//! │  ──────                      ────────────                               │
//! │                                                                         │
//! │  create_payment_request                                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Engine Operation                                                │  │
//! │  │  Result<T, EngineError>                                          │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Database Error? ─── DbError::VersionConflict ──► retried ──┐   │  │
//! │  │         │                                                    │   │  │
//! │  │         ▼                                                    ▼   │  │
//! │  │  Domain Error? ── CoreError::OverCommit ──► EngineError ───────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄────────────────────────────────────────────────────────────────────  │
//! │                                                                         │
//! │  { "code": "OVER_COMMIT", "message": "Requested ₹8,000.00 but..." }    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors carry both a machine-readable `code` and a human-readable
//! `message`, serialized for whatever transport fronts the engine.

use serde::Serialize;
use shutter_core::CoreError;
use shutter_db::DbError;

/// Error returned from engine operations.
///
/// ## Serialization
/// This is what clients receive when an operation fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Booking not found: b-123"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for engine responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Database operation failed (500)
    DatabaseError,

    /// Lifecycle rule violated (422)
    BusinessLogic,

    /// Payment request exceeds the available balance
    OverCommit,

    /// Payments are closed on a terminal booking
    PaymentsClosed,

    /// Requested equipment is not available for the date range
    Unavailable,

    /// Concurrent writes exhausted the retry budget (409)
    Conflict,

    /// Internal server error (500)
    Internal,
}

impl EngineError {
    /// Creates a new engine error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        EngineError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        EngineError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        EngineError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        EngineError::new(ErrorCode::Internal, message)
    }

    /// Creates an availability rejection.
    pub fn unavailable(message: impl Into<String>) -> Self {
        EngineError::new(ErrorCode::Unavailable, message)
    }
}

/// Converts domain errors to engine errors.
impl From<CoreError> for EngineError {
    fn from(err: CoreError) -> Self {
        match &err {
            CoreError::BookingNotFound(id) => EngineError::not_found("Booking", id),
            CoreError::RequestNotFound { request_id } => {
                EngineError::not_found("Payment request", request_id)
            }
            CoreError::InvalidTransition { .. } => {
                EngineError::new(ErrorCode::BusinessLogic, err.to_string())
            }
            CoreError::RequestNotPending { .. } => {
                EngineError::new(ErrorCode::BusinessLogic, err.to_string())
            }
            CoreError::OverCommit { .. } => EngineError::new(ErrorCode::OverCommit, err.to_string()),
            CoreError::PaymentsClosed { .. } => {
                EngineError::new(ErrorCode::PaymentsClosed, err.to_string())
            }
            CoreError::Validation(e) => EngineError::validation(e.to_string()),
        }
    }
}

/// Converts bare validation errors (from the shutter-core validators) to
/// engine errors.
impl From<shutter_core::ValidationError> for EngineError {
    fn from(err: shutter_core::ValidationError) -> Self {
        EngineError::validation(err.to_string())
    }
}

/// Converts database errors to engine errors.
impl From<DbError> for EngineError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => EngineError::not_found(&entity, &id),
            DbError::VersionConflict { entity, id, .. } => EngineError::new(
                ErrorCode::Conflict,
                format!("{} {} was modified concurrently, please retry", entity, id),
            ),
            DbError::UniqueViolation { field, value } => EngineError::new(
                ErrorCode::ValidationError,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::ConnectionFailed(_) => {
                EngineError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                EngineError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                EngineError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::Serialization(e) => {
                tracing::error!("Column serialization failed: {}", e);
                EngineError::new(ErrorCode::DatabaseError, "Stored booking is corrupted")
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                EngineError::new(ErrorCode::ValidationError, "Invalid reference")
            }
            DbError::PoolExhausted => {
                EngineError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                EngineError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for EngineError {}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
