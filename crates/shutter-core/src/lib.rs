//! # shutter-core: Pure Business Logic for Shutter
//!
//! This crate is the **heart** of the Shutter booking engine. It contains
//! the pricing calculator, lifecycle state machine, and payment ledger as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shutter Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Booking Form / Admin Console                    │   │
//! │  │    Equipment picker ──► Price preview ──► Payment requests      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                shutter-engine (Operations Layer)                │   │
//! │  │    create_booking, price_preview, process_payment_request, ...  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shutter-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │  money   │ │ pricing  │ │  state   │ │  ledger  │          │   │
//! │  │   │  Money   │ │ breakdown│ │ lifecycle│ │ payments │          │   │
//! │  │   │  TaxCalc │ │ duration │ │  graph   │ │ no over- │          │   │
//! │  │   │          │ │          │ │          │ │  commit  │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  shutter-db (Database Layer)                    │   │
//! │  │            SQLite queries, migrations, repositories             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Booking, PaymentRequest, EquipmentLine, etc.)
//! - [`money`] - Money type with integer paise arithmetic (no floating point!)
//! - [`duration`] - Date/time range → whole days + metered minutes
//! - [`pricing`] - The single pricing calculator
//! - [`state`] - Booking lifecycle state machine
//! - [`ledger`] - Payment-request ledger and derived payment fields
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//! 5. **Caller-Supplied Clock**: Timestamps arrive as arguments, never from `Utc::now()`
//!
//! ## Example Usage
//!
//! ```rust
//! use shutter_core::money::Money;
//! use shutter_core::types::TaxRate;
//! use shutter_core::GST_RATE_BPS;
//!
//! // Create money from paise (never from floats!)
//! let subtotal = Money::from_rupees(6_500);
//!
//! // GST at 18%, rounded half-up
//! let gst = subtotal.calculate_tax(TaxRate::from_bps(GST_RATE_BPS));
//! assert_eq!(gst, Money::from_rupees(1_170));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod duration;
pub mod error;
pub mod ledger;
pub mod money;
pub mod pricing;
pub mod state;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use shutter_core::Money` instead of
// `use shutter_core::money::Money`

pub use duration::RentalDuration;
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::PaymentDecision;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// GST applied to the discount-adjusted subtotal, in basis points.
///
/// 1800 bps = 18%, the composite rate for equipment rental and
/// photography services. A future multi-rate catalog would move this
/// onto the equipment line snapshot.
pub const GST_RATE_BPS: u32 = 1800;

/// Hourly add-on rate as a share of the daily rate, in basis points.
///
/// Each metered hour bills at 15% of the line's daily rate, on top of
/// the whole-day charge.
pub const HOURLY_RATE_BPS: u32 = 1500;

/// Maximum equipment lines on a single booking.
///
/// ## Business Reason
/// Prevents runaway selections; real bookings rarely exceed a dozen
/// catalog entries.
pub const MAX_EQUIPMENT_LINES: usize = 50;

/// Maximum quantity of a single equipment line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 100 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 99;

/// Maximum daily rate snapshot on an equipment line, in paise.
///
/// ## Business Reason
/// ₹10,00,000/day comfortably tops the catalog, and the cap keeps the
/// worst-case pricing product (rate × quantity × days × lines) inside
/// i64 even for decade-long date ranges.
pub const MAX_DAILY_RATE_PAISE: i64 = 100_000_000;

// =============================================================================
// Test Support
// =============================================================================

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{NaiveDate, Utc};

    use crate::duration::resolve;
    use crate::money::Money;
    use crate::pricing::{compute_breakdown, PriceInputs};
    use crate::types::{
        Booking, BookingStatus, BookingType, EquipmentLine, EventDetails, EventType,
        PaymentStatus,
    };

    /// A freshly created pending booking: 2 × ₹1,000/day camera over
    /// 3 days plus ₹500 delivery, GST 18% → total ₹7,670.
    pub fn sample_booking() -> Booking {
        let start_date = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let end_date = NaiveDate::from_ymd_opt(2026, 3, 12).unwrap();
        let duration = resolve(start_date, end_date, false, None, None).unwrap();

        let equipment = vec![EquipmentLine {
            equipment_ref_id: "cam-5d".to_string(),
            quantity: 2,
            daily_rate_paise: Money::from_rupees(1_000).paise(),
        }];

        let pricing = compute_breakdown(&PriceInputs {
            lines: &equipment,
            duration,
            include_hours: false,
            service_charges: Money::from_rupees(500),
            discount: Money::zero(),
        });

        let now = Utc::now();
        Booking {
            id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            booking_code: "SB-20260310-0001".to_string(),
            customer_id: "cust-42".to_string(),
            booking_type: BookingType::EquipmentRental,
            event_type: EventType::Wedding,
            start_date,
            end_date,
            include_hours: false,
            start_time: None,
            end_time: None,
            total_days: duration.total_days,
            total_minutes: duration.total_minutes,
            equipment,
            subscription_ref_id: None,
            details: EventDetails {
                venue: "Lakeside Hall".to_string(),
                address: "12 MG Road".to_string(),
                contact_person: "Asha".to_string(),
                contact_phone: "98XXXXXX01".to_string(),
                special_requirements: None,
                guest_count: Some(120),
            },
            pricing,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            payment_requests: Vec::new(),
            cancellation_reason: None,
            cancelled_at: None,
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }
}
