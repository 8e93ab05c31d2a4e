//! # Domain Types
//!
//! Core domain types used throughout Shutter.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌────────────────┐  ┌──────────────────┐  ┌──────────────────┐    │
//! │  │    Booking     │  │  PaymentRequest  │  │  EquipmentLine   │    │
//! │  │  ────────────  │  │  ──────────────  │  │  ──────────────  │    │
//! │  │  id (UUID)     │  │  id (UUID)       │  │  equipment_ref   │    │
//! │  │  booking_code  │  │  amount_paise    │  │  quantity        │    │
//! │  │  status        │  │  method          │  │  daily_rate      │    │
//! │  │  pricing       │  │  status          │  │  (rate snapshot) │    │
//! │  └────────────────┘  └──────────────────┘  └──────────────────┘    │
//! │                                                                     │
//! │  ┌────────────────┐  ┌──────────────────┐  ┌──────────────────┐    │
//! │  │ BookingStatus  │  │  PaymentStatus   │  │  PaymentMethod   │    │
//! │  │  Pending ...   │  │  Unpaid          │  │  Cash, Upi, ...  │    │
//! │  │  Refunded      │  │  AdvancePaid     │  │                  │    │
//! │  │  Cancelled     │  │  FullyPaid       │  │                  │    │
//! │  └────────────────┘  └──────────────────┘  └──────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! The booking has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - `booking_code`: human-readable, shown to customers and admins

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1800 bps = 18% (GST on rental and service charges)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Booking Classification
// =============================================================================

/// What is being booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BookingType {
    /// Equipment-only rental (camera bodies, lenses, lighting).
    EquipmentRental,
    /// Photography coverage of an off-site event.
    EventCoverage,
    /// Function shoot (receptions, ceremonies).
    FunctionShoot,
    /// In-studio session.
    StudioSession,
}

/// The occasion the booking is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Wedding,
    Birthday,
    Corporate,
    Party,
    Portrait,
    Fashion,
    Product,
    Other,
}

// =============================================================================
// Booking Status
// =============================================================================

/// The lifecycle status of a booking.
///
/// Transitions are governed by the state machine in [`crate::state`];
/// nothing else may flip this field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Created, awaiting admin confirmation.
    Pending,
    /// Confirmed by an admin.
    Confirmed,
    /// Rental/shoot is underway.
    InProgress,
    /// Rental/shoot finished.
    Completed,
    /// Cancelled before it began (terminal).
    Cancelled,
    /// Refunded after completion (terminal).
    Refunded,
}

impl BookingStatus {
    /// Terminal states admit no further transitions.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Refunded)
    }
}

impl Default for BookingStatus {
    fn default() -> Self {
        BookingStatus::Pending
    }
}

// =============================================================================
// Payment Status
// =============================================================================

/// Derived payment state of a booking.
///
/// Never set directly: recomputed from the payment ledger after every
/// mutation (`Unpaid` → `AdvancePaid` → `FullyPaid`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// No accepted payments yet.
    Unpaid,
    /// Some, but not all, of the total has been accepted.
    AdvancePaid,
    /// Accepted payments cover the full total.
    FullyPaid,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Unpaid
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Upi,
    CreditCard,
    DebitCard,
    NetBanking,
    Cheque,
    BankTransfer,
}

// =============================================================================
// Payment Request Status
// =============================================================================

/// Status of a single payment request within the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentRequestStatus {
    /// Awaiting admin decision; reserves balance against the total.
    Pending,
    /// Accepted; the amount counts toward the paid total.
    Accepted,
    /// Rejected; the reservation is released.
    Rejected,
}

// =============================================================================
// Equipment Line
// =============================================================================

/// One selected equipment catalog entry on a booking.
///
/// ## Snapshot Pattern
/// `equipment_ref_id` is a weak reference to the externally-owned catalog;
/// `daily_rate_paise` is frozen at creation time. Catalog price changes
/// never reprice an existing booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentLine {
    /// Catalog entry this line refers to (never owned here).
    pub equipment_ref_id: String,

    /// Units reserved. Always > 0.
    pub quantity: i64,

    /// Daily rate in paise at time of booking (frozen).
    pub daily_rate_paise: i64,
}

impl EquipmentLine {
    /// Returns the frozen daily rate as Money.
    #[inline]
    pub fn daily_rate(&self) -> Money {
        Money::from_paise(self.daily_rate_paise)
    }
}

// =============================================================================
// Event Details
// =============================================================================

/// Free-form details about the event being covered.
///
/// Non-validating beyond presence of the contact fields; the engine stores
/// what the customer entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    pub venue: String,
    pub address: String,
    pub contact_person: String,
    pub contact_phone: String,
    pub special_requirements: Option<String>,
    pub guest_count: Option<i64>,
}

// =============================================================================
// Pricing Breakdown
// =============================================================================

/// The derived multi-component price of a booking.
///
/// All fields are non-negative paise. Never hand-edited: produced by the
/// pricing calculator at creation, with `advance`/`remaining` maintained by
/// the payment ledger afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingBreakdown {
    /// Equipment daily + hourly components.
    pub equipment_total_paise: i64,
    /// Flat booking-type-dependent charge (delivery fee or service fee).
    pub service_charges_paise: i64,
    /// GST on the discount-adjusted subtotal.
    pub taxes_paise: i64,
    /// Externally supplied subscription benefit, clamped to the subtotal.
    pub discount_paise: i64,
    /// Grand total owed.
    pub total_paise: i64,
    /// Sum of accepted payments so far.
    pub advance_paise: i64,
    /// `total - advance`; never negative.
    pub remaining_paise: i64,
}

impl PricingBreakdown {
    #[inline]
    pub fn equipment_total(&self) -> Money {
        Money::from_paise(self.equipment_total_paise)
    }

    #[inline]
    pub fn service_charges(&self) -> Money {
        Money::from_paise(self.service_charges_paise)
    }

    #[inline]
    pub fn taxes(&self) -> Money {
        Money::from_paise(self.taxes_paise)
    }

    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_paise(self.discount_paise)
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_paise(self.total_paise)
    }

    #[inline]
    pub fn advance(&self) -> Money {
        Money::from_paise(self.advance_paise)
    }

    #[inline]
    pub fn remaining(&self) -> Money {
        Money::from_paise(self.remaining_paise)
    }
}

// =============================================================================
// Payment Request
// =============================================================================

/// A customer-initiated ask to apply an amount toward the booking balance.
///
/// Owned exclusively by its booking; entries reach a terminal status but are
/// never deleted, except an explicit customer cancel while still Pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub id: String,
    pub booking_id: String,
    /// Requested amount in paise. Always > 0.
    pub amount_paise: i64,
    pub method: PaymentMethod,
    pub status: PaymentRequestStatus,
    #[ts(as = "String")]
    pub requested_at: DateTime<Utc>,
    /// Set when an admin accepts or rejects.
    #[ts(as = "Option<String>")]
    pub processed_at: Option<DateTime<Utc>>,
    pub admin_notes: Option<String>,
}

impl PaymentRequest {
    /// Returns the requested amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_paise(self.amount_paise)
    }

    /// Whether this request still reserves balance (Pending or Accepted).
    #[inline]
    pub fn reserves_balance(&self) -> bool {
        matches!(
            self.status,
            PaymentRequestStatus::Pending | PaymentRequestStatus::Accepted
        )
    }
}

// =============================================================================
// Booking
// =============================================================================

/// A customer's reservation of equipment and/or services for a date range.
///
/// The aggregate root of the engine. All mutations go through the state
/// machine ([`crate::state`]) and the payment ledger ([`crate::ledger`]);
/// the `version` field backs optimistic concurrency in the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Human-readable code shown to customers (e.g. `SB-20260829-0412`).
    pub booking_code: String,

    /// Owning customer identity. Immutable.
    pub customer_id: String,

    pub booking_type: BookingType,
    pub event_type: EventType,

    /// Inclusive rental range; `end_date >= start_date`.
    #[ts(as = "String")]
    pub start_date: NaiveDate,
    #[ts(as = "String")]
    pub end_date: NaiveDate,

    /// Whether per-day metered hours apply.
    pub include_hours: bool,
    #[ts(as = "Option<String>")]
    pub start_time: Option<NaiveTime>,
    #[ts(as = "Option<String>")]
    pub end_time: Option<NaiveTime>,

    /// Whole rental days (inclusive); same-day booking = 1.
    pub total_days: i64,

    /// Total metered hour-span across all days, in minutes.
    /// Zero when `include_hours` is false or the per-day span is
    /// non-positive. Minutes keep pricing math integer-exact.
    pub total_minutes: i64,

    /// Selected equipment with frozen rate snapshots.
    pub equipment: Vec<EquipmentLine>,

    /// Optional weak reference to an externally-owned discount plan.
    pub subscription_ref_id: Option<String>,

    pub details: EventDetails,

    pub pricing: PricingBreakdown,

    pub status: BookingStatus,
    pub payment_status: PaymentStatus,

    /// Ordered payment ledger, append-only (except pending-cancel removal).
    pub payment_requests: Vec<PaymentRequest>,

    /// Set only by the Cancel transition.
    pub cancellation_reason: Option<String>,
    #[ts(as = "Option<String>")]
    pub cancelled_at: Option<DateTime<Utc>>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,

    /// Optimistic-concurrency token; incremented on every committed write.
    pub version: i64,
}

impl Booking {
    /// Total metered hours as a fraction (display/serialization only;
    /// all pricing math uses `total_minutes`).
    #[inline]
    pub fn total_hours(&self) -> f64 {
        self.total_minutes as f64 / 60.0
    }

    /// Returns the total amount owed as Money.
    #[inline]
    pub fn total_amount(&self) -> Money {
        self.pricing.total()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(1800);
        assert_eq!(rate.bps(), 1800);
        assert!((rate.percentage() - 18.0).abs() < 0.001);
    }

    #[test]
    fn test_booking_status_terminal() {
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(BookingStatus::Refunded.is_terminal());
        assert!(!BookingStatus::Pending.is_terminal());
        assert!(!BookingStatus::Completed.is_terminal());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(BookingStatus::default(), BookingStatus::Pending);
        assert_eq!(PaymentStatus::default(), PaymentStatus::Unpaid);
    }

    #[test]
    fn test_reserves_balance() {
        let mut request = PaymentRequest {
            id: "r1".to_string(),
            booking_id: "b1".to_string(),
            amount_paise: 1000,
            method: PaymentMethod::Upi,
            status: PaymentRequestStatus::Pending,
            requested_at: Utc::now(),
            processed_at: None,
            admin_notes: None,
        };
        assert!(request.reserves_balance());

        request.status = PaymentRequestStatus::Accepted;
        assert!(request.reserves_balance());

        request.status = PaymentRequestStatus::Rejected;
        assert!(!request.reserves_balance());
    }
}
