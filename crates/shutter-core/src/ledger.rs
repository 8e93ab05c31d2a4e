//! # Payment Ledger
//!
//! Maintains the sequence of payment requests against a booking's total and
//! derives `payment_status`. This module is the only code that touches the
//! money fields after creation.
//!
//! ## Reservation Accounting
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  total ₹7,670                                                       │
//! │                                                                     │
//! │  Request ₹3,000 ──► Pending    reserved: 3,000   available: 4,670   │
//! │  Request ₹5,000 ──► REJECTED: 3,000 + 5,000 > 7,670 (overcommit)    │
//! │  Accept  ₹3,000 ──► Accepted   advance: 3,000    remaining: 4,670   │
//! │  Request ₹4,670 ──► Pending    reserved: 7,670   available: 0       │
//! │  Accept  ₹4,670 ──► Accepted   remaining: 0 → FullyPaid             │
//! │                                                                     │
//! │  Invariant: Σ(Pending + Accepted) never exceeds the total.          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The overcommit check is check-then-act; callers must hold per-booking
//! serialization (the storage layer's version-checked commit) around any
//! mutation here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{
    Booking, PaymentMethod, PaymentRequest, PaymentRequestStatus, PaymentStatus,
};

// =============================================================================
// Admin Decision
// =============================================================================

/// Admin decision on a pending payment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentDecision {
    Accept,
    Reject,
}

// =============================================================================
// Ledger Operations
// =============================================================================

impl Booking {
    /// Sum of admin-accepted amounts.
    pub fn accepted_total(&self) -> Money {
        self.payment_requests
            .iter()
            .filter(|r| r.status == PaymentRequestStatus::Accepted)
            .fold(Money::zero(), |acc, r| acc + r.amount())
    }

    /// Sum of amounts that still reserve balance (Pending + Accepted).
    pub fn reserved_total(&self) -> Money {
        self.payment_requests
            .iter()
            .filter(|r| r.reserves_balance())
            .fold(Money::zero(), |acc, r| acc + r.amount())
    }

    /// `total − Σaccepted`; the customer-facing balance.
    pub fn remaining_amount(&self) -> Money {
        (self.total_amount() - self.accepted_total()).clamp_non_negative()
    }

    /// Balance a new request may claim: `total − (pending + accepted)`.
    pub fn available_for_request(&self) -> Money {
        (self.total_amount() - self.reserved_total()).clamp_non_negative()
    }

    /// Creates a pending payment request, reserving its amount.
    ///
    /// ## Failure Modes
    /// - `PaymentsClosed` on a cancelled/refunded booking
    /// - `Validation` when `amount <= 0`
    /// - `OverCommit` when the amount exceeds the available balance
    ///   (outstanding pending requests included, so two in-flight requests
    ///   can never jointly exceed the total)
    pub fn create_payment_request(
        &mut self,
        amount: Money,
        method: PaymentMethod,
        now: DateTime<Utc>,
    ) -> CoreResult<&PaymentRequest> {
        if self.status.is_terminal() {
            return Err(CoreError::PaymentsClosed {
                status: self.status,
            });
        }

        if !amount.is_positive() {
            return Err(ValidationError::MustBePositive {
                field: "amount".to_string(),
            }
            .into());
        }

        let available = self.available_for_request();
        if amount > available {
            return Err(CoreError::OverCommit {
                requested_paise: amount.paise(),
                available_paise: available.paise(),
            });
        }

        let request = PaymentRequest {
            id: Uuid::new_v4().to_string(),
            booking_id: self.id.clone(),
            amount_paise: amount.paise(),
            method,
            status: PaymentRequestStatus::Pending,
            requested_at: now,
            processed_at: None,
            admin_notes: None,
        };

        let index = self.payment_requests.len();
        self.payment_requests.push(request);
        self.updated_at = now;

        // A pending request never changes accepted totals, but the derived
        // fields are recomputed anyway so every mutation path is uniform.
        self.recompute_payment_fields();

        Ok(&self.payment_requests[index])
    }

    /// Customer cancels their own request while it is still pending.
    ///
    /// The entry is removed outright, freeing its reservation. Processed
    /// entries are immutable history and cannot be cancelled.
    pub fn cancel_payment_request(
        &mut self,
        request_id: &str,
        now: DateTime<Utc>,
    ) -> CoreResult<PaymentRequest> {
        let index = self.find_request(request_id)?;

        let status = self.payment_requests[index].status;
        if status != PaymentRequestStatus::Pending {
            return Err(CoreError::RequestNotPending {
                request_id: request_id.to_string(),
                status,
            });
        }

        let removed = self.payment_requests.remove(index);
        self.updated_at = now;
        self.recompute_payment_fields();
        Ok(removed)
    }

    /// Admin accepts or rejects a pending request.
    ///
    /// Accept folds the amount into the paid total and recomputes
    /// `advance`/`remaining`/`payment_status`; Reject releases the
    /// reservation with no change to accepted totals. Either way the
    /// request keeps its place in the ledger with `processed_at` stamped.
    pub fn process_payment_request(
        &mut self,
        request_id: &str,
        decision: PaymentDecision,
        admin_notes: Option<String>,
        now: DateTime<Utc>,
    ) -> CoreResult<&PaymentRequest> {
        let index = self.find_request(request_id)?;

        let status = self.payment_requests[index].status;
        if status != PaymentRequestStatus::Pending {
            return Err(CoreError::RequestNotPending {
                request_id: request_id.to_string(),
                status,
            });
        }

        {
            let request = &mut self.payment_requests[index];
            request.status = match decision {
                PaymentDecision::Accept => PaymentRequestStatus::Accepted,
                PaymentDecision::Reject => PaymentRequestStatus::Rejected,
            };
            request.processed_at = Some(now);
            request.admin_notes = admin_notes;
        }

        self.updated_at = now;
        self.recompute_payment_fields();

        Ok(&self.payment_requests[index])
    }

    /// Recomputes the ledger-derived fields from the request list.
    ///
    /// Called after every ledger mutation so the persisted booking always
    /// satisfies `remaining == total − Σaccepted` and the payment-status
    /// derivation.
    pub fn recompute_payment_fields(&mut self) {
        let accepted = self.accepted_total();
        let remaining = (self.total_amount() - accepted).clamp_non_negative();

        self.pricing.advance_paise = accepted.paise();
        self.pricing.remaining_paise = remaining.paise();

        // FullyPaid iff nothing remains, which includes a zero-total
        // booking (discount clamped to the whole subtotal).
        self.payment_status = if remaining.is_zero() {
            PaymentStatus::FullyPaid
        } else if accepted.is_positive() {
            PaymentStatus::AdvancePaid
        } else {
            PaymentStatus::Unpaid
        };
    }

    fn find_request(&self, request_id: &str) -> CoreResult<usize> {
        self.payment_requests
            .iter()
            .position(|r| r.id == request_id)
            .ok_or_else(|| CoreError::RequestNotFound {
                request_id: request_id.to_string(),
            })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_booking;

    // sample_booking() totals ₹7,670 (₹1,000 × 2 × 3 days + ₹500 fee + GST)

    #[test]
    fn test_request_exceeding_total_is_overcommit() {
        let mut booking = sample_booking();
        let err = booking
            .create_payment_request(Money::from_rupees(8_000), PaymentMethod::Upi, Utc::now())
            .unwrap_err();

        assert!(matches!(err, CoreError::OverCommit { .. }));
        assert!(booking.payment_requests.is_empty());
    }

    #[test]
    fn test_pending_requests_reserve_balance() {
        let mut booking = sample_booking();
        let now = Utc::now();

        booking
            .create_payment_request(Money::from_rupees(3_000), PaymentMethod::Upi, now)
            .unwrap();

        // 3,000 pending + 5,000 > 7,670
        let err = booking
            .create_payment_request(Money::from_rupees(5_000), PaymentMethod::Cash, now)
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::OverCommit {
                available_paise: 467_000,
                ..
            }
        ));
    }

    #[test]
    fn test_accept_then_pay_off_reaches_fully_paid() {
        let mut booking = sample_booking();
        let now = Utc::now();

        let first = booking
            .create_payment_request(Money::from_rupees(3_000), PaymentMethod::Upi, now)
            .unwrap()
            .id
            .clone();
        booking
            .process_payment_request(&first, PaymentDecision::Accept, None, now)
            .unwrap();

        assert_eq!(booking.remaining_amount(), Money::from_rupees(4_670));
        assert_eq!(booking.payment_status, PaymentStatus::AdvancePaid);
        assert_eq!(booking.pricing.advance_paise, 300_000);

        let second = booking
            .create_payment_request(Money::from_rupees(4_670), PaymentMethod::BankTransfer, now)
            .unwrap()
            .id
            .clone();
        booking
            .process_payment_request(&second, PaymentDecision::Accept, None, now)
            .unwrap();

        assert_eq!(booking.remaining_amount(), Money::zero());
        assert_eq!(booking.payment_status, PaymentStatus::FullyPaid);
        assert_eq!(booking.pricing.remaining_paise, 0);
    }

    #[test]
    fn test_reject_releases_reservation() {
        let mut booking = sample_booking();
        let now = Utc::now();

        let id = booking
            .create_payment_request(Money::from_rupees(7_670), PaymentMethod::Cheque, now)
            .unwrap()
            .id
            .clone();
        assert_eq!(booking.available_for_request(), Money::zero());

        booking
            .process_payment_request(&id, PaymentDecision::Reject, Some("bounced".into()), now)
            .unwrap();

        assert_eq!(booking.available_for_request(), Money::from_rupees(7_670));
        assert_eq!(booking.payment_status, PaymentStatus::Unpaid);
        // Rejected entry stays in the ledger
        assert_eq!(booking.payment_requests.len(), 1);
        assert!(booking.payment_requests[0].processed_at.is_some());
    }

    #[test]
    fn test_cancel_pending_removes_and_frees() {
        let mut booking = sample_booking();
        let now = Utc::now();

        let id = booking
            .create_payment_request(Money::from_rupees(5_000), PaymentMethod::Upi, now)
            .unwrap()
            .id
            .clone();

        let removed = booking.cancel_payment_request(&id, now).unwrap();
        assert_eq!(removed.amount(), Money::from_rupees(5_000));
        assert!(booking.payment_requests.is_empty());
        assert_eq!(booking.available_for_request(), Money::from_rupees(7_670));
    }

    #[test]
    fn test_cancel_processed_request_fails() {
        let mut booking = sample_booking();
        let now = Utc::now();

        let id = booking
            .create_payment_request(Money::from_rupees(1_000), PaymentMethod::Upi, now)
            .unwrap()
            .id
            .clone();
        booking
            .process_payment_request(&id, PaymentDecision::Accept, None, now)
            .unwrap();

        let err = booking.cancel_payment_request(&id, now).unwrap_err();
        assert!(matches!(err, CoreError::RequestNotPending { .. }));
    }

    #[test]
    fn test_process_twice_fails() {
        let mut booking = sample_booking();
        let now = Utc::now();

        let id = booking
            .create_payment_request(Money::from_rupees(1_000), PaymentMethod::Cash, now)
            .unwrap()
            .id
            .clone();
        booking
            .process_payment_request(&id, PaymentDecision::Reject, None, now)
            .unwrap();

        let err = booking
            .process_payment_request(&id, PaymentDecision::Accept, None, now)
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::RequestNotPending {
                status: PaymentRequestStatus::Rejected,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_request_id() {
        let mut booking = sample_booking();
        let err = booking
            .cancel_payment_request("no-such-id", Utc::now())
            .unwrap_err();
        assert!(matches!(err, CoreError::RequestNotFound { .. }));
    }

    #[test]
    fn test_non_positive_amounts_rejected() {
        let mut booking = sample_booking();
        let now = Utc::now();

        for paise in [0, -100] {
            let err = booking
                .create_payment_request(Money::from_paise(paise), PaymentMethod::Upi, now)
                .unwrap_err();
            assert!(matches!(err, CoreError::Validation(_)));
        }
    }

    #[test]
    fn test_payments_closed_after_cancel() {
        let mut booking = sample_booking();
        let now = Utc::now();
        booking.cancel("plans changed", now).unwrap();

        let err = booking
            .create_payment_request(Money::from_rupees(100), PaymentMethod::Upi, now)
            .unwrap_err();
        assert!(matches!(err, CoreError::PaymentsClosed { .. }));
    }

    #[test]
    fn test_zero_total_booking_is_fully_paid() {
        // Discount clamped to the whole subtotal leaves total = 0. With
        // nothing remaining the booking is FullyPaid from the start.
        let mut booking = sample_booking();
        booking.pricing.total_paise = 0;
        booking.pricing.remaining_paise = 0;

        booking.recompute_payment_fields();
        assert_eq!(booking.payment_status, PaymentStatus::FullyPaid);
        assert_eq!(booking.pricing.remaining_paise, 0);
        assert_eq!(booking.pricing.advance_paise, 0);

        // Nothing is requestable against a zero balance
        let err = booking
            .create_payment_request(Money::from_paise(1), PaymentMethod::Upi, Utc::now())
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::OverCommit {
                available_paise: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_ledger_consistency_invariant() {
        let mut booking = sample_booking();
        let now = Utc::now();

        // Arbitrary request/process sequence; the invariant must hold after
        // every step.
        let a = booking
            .create_payment_request(Money::from_rupees(2_000), PaymentMethod::Upi, now)
            .unwrap()
            .id
            .clone();
        let b = booking
            .create_payment_request(Money::from_rupees(1_500), PaymentMethod::Cash, now)
            .unwrap()
            .id
            .clone();
        booking
            .process_payment_request(&a, PaymentDecision::Accept, None, now)
            .unwrap();
        booking
            .process_payment_request(&b, PaymentDecision::Reject, None, now)
            .unwrap();

        assert_eq!(
            booking.remaining_amount(),
            booking.total_amount() - booking.accepted_total()
        );
        assert_eq!(booking.pricing.advance_paise, 200_000);
        assert_eq!(booking.pricing.remaining_paise, 567_000);
    }
}
