//! # Payment Operations
//!
//! Customer-side payment requests and admin-side decisions.
//!
//! ## Concurrency
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Two customers race to request against the same ₹7,670 balance:    │
//! │                                                                     │
//! │  A: load v0 ── request ₹5,000 ── commit WHERE version=0 ── OK (v1)  │
//! │  B: load v0 ── request ₹5,000 ── commit WHERE version=0 ── LOST    │
//! │        │                                                            │
//! │        └── reload v1 ── request ₹5,000 ── OverCommit (only ₹2,670) │
//! │                                                                     │
//! │  The ledger's check-then-act runs inside the version-checked        │
//! │  cycle, so Σ(Pending + Accepted) can never exceed the total.        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::{debug, info};

use shutter_core::validation::validate_payment_amount;
use shutter_core::{Booking, Money, PaymentDecision, PaymentMethod, PaymentRequest};

use crate::error::EngineResult;
use crate::Engine;

impl Engine {
    /// Customer asks to put an amount toward the booking balance.
    ///
    /// Returns the created (pending) request.
    pub async fn create_payment_request(
        &self,
        booking_id: &str,
        amount_paise: i64,
        method: PaymentMethod,
    ) -> EngineResult<PaymentRequest> {
        debug!(booking_id, amount_paise, ?method, "create_payment_request");
        validate_payment_amount(amount_paise)?;

        let amount = Money::from_paise(amount_paise);
        let (_, request) = self
            .commit_with_retry(booking_id, |booking| {
                booking
                    .create_payment_request(amount, method, Utc::now())
                    .map(|r| r.clone())
            })
            .await?;

        info!(
            booking_id,
            request_id = %request.id,
            amount_paise,
            "Payment request created"
        );
        Ok(request)
    }

    /// Customer withdraws a still-pending request, freeing its
    /// reservation. Returns the removed entry.
    pub async fn cancel_payment_request(
        &self,
        booking_id: &str,
        request_id: &str,
    ) -> EngineResult<PaymentRequest> {
        debug!(booking_id, request_id, "cancel_payment_request");

        let (_, removed) = self
            .commit_with_retry(booking_id, |booking| {
                booking.cancel_payment_request(request_id, Utc::now())
            })
            .await?;

        info!(booking_id, request_id, "Payment request cancelled");
        Ok(removed)
    }

    /// Admin accepts or rejects a pending request.
    ///
    /// Returns the updated booking so admin views can show the new
    /// advance/remaining figures without a second read.
    pub async fn process_payment_request(
        &self,
        booking_id: &str,
        request_id: &str,
        decision: PaymentDecision,
        admin_notes: Option<String>,
    ) -> EngineResult<Booking> {
        debug!(booking_id, request_id, ?decision, "process_payment_request");

        let (booking, ()) = self
            .commit_with_retry(booking_id, |booking| {
                booking
                    .process_payment_request(
                        request_id,
                        decision,
                        admin_notes.clone(),
                        Utc::now(),
                    )
                    .map(|_| ())
            })
            .await?;

        info!(
            booking_id,
            request_id,
            ?decision,
            payment_status = ?booking.payment_status,
            remaining_paise = booking.pricing.remaining_paise,
            "Payment request processed"
        );
        Ok(booking)
    }
}
