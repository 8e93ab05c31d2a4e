//! # Booking State Machine
//!
//! Governs booking status transitions. This module owns the lifecycle
//! graph; repositories and operations only ever call through here.
//!
//! ## Lifecycle Graph
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                                                                     │
//! │   Pending ──► Confirmed ──► InProgress ──► Completed ──► Refunded   │
//! │      │            │                                        (terminal)│
//! │      │            │                                                 │
//! │      └────────────┴──────► Cancelled  (terminal)                    │
//! │                            reason required                          │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Transitions never touch pricing: they assert the guard, flip `status`,
//! and stamp `updated_at`. Cancel additionally records the reason and time.

use chrono::{DateTime, Utc};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Booking, BookingStatus};

// =============================================================================
// Transition Table
// =============================================================================

/// Whether the lifecycle graph permits `from → to`.
pub const fn can_transition(from: BookingStatus, to: BookingStatus) -> bool {
    use BookingStatus::*;
    matches!(
        (from, to),
        (Pending, Confirmed)
            | (Pending, Cancelled)
            | (Confirmed, Cancelled)
            | (Confirmed, InProgress)
            | (InProgress, Completed)
            | (Completed, Refunded)
    )
}

/// Checks a transition and returns the typed error naming both statuses.
fn guard(from: BookingStatus, to: BookingStatus) -> CoreResult<()> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition { from, to })
    }
}

// =============================================================================
// Booking Transitions
// =============================================================================

impl Booking {
    /// A booking can be cancelled only before it begins.
    #[inline]
    pub fn can_cancel(&self) -> bool {
        matches!(
            self.status,
            BookingStatus::Pending | BookingStatus::Confirmed
        )
    }

    /// Admin confirms a pending booking.
    pub fn confirm(&mut self, now: DateTime<Utc>) -> CoreResult<()> {
        guard(self.status, BookingStatus::Confirmed)?;
        self.status = BookingStatus::Confirmed;
        self.updated_at = now;
        Ok(())
    }

    /// Customer or admin cancels. Reason is required and recorded.
    pub fn cancel(&mut self, reason: &str, now: DateTime<Utc>) -> CoreResult<()> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(ValidationError::Required {
                field: "cancellation reason".to_string(),
            }
            .into());
        }

        guard(self.status, BookingStatus::Cancelled)?;
        self.status = BookingStatus::Cancelled;
        self.cancellation_reason = Some(reason.to_string());
        self.cancelled_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// The event start is reached (or an admin advances the booking).
    pub fn begin(&mut self, now: DateTime<Utc>) -> CoreResult<()> {
        guard(self.status, BookingStatus::InProgress)?;
        self.status = BookingStatus::InProgress;
        self.updated_at = now;
        Ok(())
    }

    /// Admin marks the rental/shoot as finished.
    pub fn complete(&mut self, now: DateTime<Utc>) -> CoreResult<()> {
        guard(self.status, BookingStatus::Completed)?;
        self.status = BookingStatus::Completed;
        self.updated_at = now;
        Ok(())
    }

    /// Exceptional admin action after completion. Status flip only; any
    /// money movement happens through an external refund workflow.
    pub fn refund(&mut self, now: DateTime<Utc>) -> CoreResult<()> {
        guard(self.status, BookingStatus::Refunded)?;
        self.status = BookingStatus::Refunded;
        self.updated_at = now;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_booking;

    #[test]
    fn test_transition_table() {
        use BookingStatus::*;

        assert!(can_transition(Pending, Confirmed));
        assert!(can_transition(Pending, Cancelled));
        assert!(can_transition(Confirmed, Cancelled));
        assert!(can_transition(Confirmed, InProgress));
        assert!(can_transition(InProgress, Completed));
        assert!(can_transition(Completed, Refunded));

        assert!(!can_transition(Pending, InProgress));
        assert!(!can_transition(InProgress, Cancelled));
        assert!(!can_transition(Completed, Cancelled));
        assert!(!can_transition(Pending, Refunded));
    }

    #[test]
    fn test_terminal_states_are_closed() {
        use BookingStatus::*;
        let every = [Pending, Confirmed, InProgress, Completed, Cancelled, Refunded];

        for to in every {
            assert!(!can_transition(Cancelled, to));
            assert!(!can_transition(Refunded, to));
        }
    }

    #[test]
    fn test_full_lifecycle() {
        let mut booking = sample_booking();
        let now = Utc::now();

        booking.confirm(now).unwrap();
        assert_eq!(booking.status, BookingStatus::Confirmed);

        booking.begin(now).unwrap();
        booking.complete(now).unwrap();
        booking.refund(now).unwrap();
        assert_eq!(booking.status, BookingStatus::Refunded);

        // Terminal: nothing moves out
        assert!(booking.confirm(now).is_err());
        assert!(booking.cancel("changed my mind", now).is_err());
    }

    #[test]
    fn test_cancel_records_reason_and_time() {
        let mut booking = sample_booking();
        let now = Utc::now();

        booking.cancel("venue unavailable", now).unwrap();
        assert_eq!(booking.status, BookingStatus::Cancelled);
        assert_eq!(
            booking.cancellation_reason.as_deref(),
            Some("venue unavailable")
        );
        assert_eq!(booking.cancelled_at, Some(now));
        assert_eq!(booking.updated_at, now);
    }

    #[test]
    fn test_cancel_requires_reason() {
        let mut booking = sample_booking();
        let err = booking.cancel("   ", Utc::now()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(booking.status, BookingStatus::Pending);
    }

    #[test]
    fn test_cancel_completed_fails() {
        let mut booking = sample_booking();
        let now = Utc::now();
        booking.confirm(now).unwrap();
        booking.begin(now).unwrap();
        booking.complete(now).unwrap();

        let err = booking.cancel("too late", now).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidTransition {
                from: BookingStatus::Completed,
                to: BookingStatus::Cancelled,
            }
        ));
        assert!(!booking.can_cancel());
    }
}
