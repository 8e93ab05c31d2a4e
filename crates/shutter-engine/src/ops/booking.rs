//! # Booking Operations
//!
//! Creation, pricing preview, lifecycle transitions, and queries.
//!
//! ## Server-Side Repricing
//! Requests never carry totals. Whatever a client previewed, the engine
//! re-resolves the duration and recomputes the full breakdown from the
//! submitted lines before anything is persisted, so a tampered or stale
//! preview can never buy a discount.

use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use shutter_core::duration::{resolve, RentalDuration};
use shutter_core::pricing::{compute_breakdown, PriceInputs};
use shutter_core::validation::{
    validate_equipment_lines, validate_event_details, validate_reason, validate_required,
};
use shutter_core::{
    Booking, BookingStatus, BookingType, EquipmentLine, EventDetails, EventType, Money,
    PaymentStatus, PricingBreakdown,
};
use shutter_db::{BookingFilter, DbError};

use crate::error::{EngineError, EngineResult};
use crate::Engine;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Input for booking creation.
///
/// Deliberately carries no pricing or status fields; those are derived
/// server-side. Daily rates on the equipment lines are the catalog
/// snapshot taken by the caller at selection time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub customer_id: String,
    pub booking_type: BookingType,
    pub event_type: EventType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub include_hours: bool,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub equipment: Vec<EquipmentLine>,
    pub subscription_ref_id: Option<String>,
    /// Subscription benefit in paise, resolved by the caller's plan
    /// lookup. Clamped to the subtotal during pricing.
    #[serde(default)]
    pub discount_paise: i64,
    pub details: EventDetails,
}

/// Input for a price preview. Dates and lines may be absent while the
/// form is still being filled; the preview collapses instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePreviewRequest {
    pub booking_type: BookingType,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub include_hours: bool,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub equipment: Vec<EquipmentLine>,
    #[serde(default)]
    pub discount_paise: i64,
}

/// Filters for the booking list view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBookingsRequest {
    pub status: Option<BookingStatus>,
    pub customer_id: Option<String>,
    #[serde(default)]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

/// One page of bookings plus the unpaginated match count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingListResponse {
    pub bookings: Vec<Booking>,
    pub total: i64,
}

// How many daily-sequence collisions to absorb before giving up.
const MAX_CODE_RETRIES: u32 = 5;

// =============================================================================
// Operations
// =============================================================================

impl Engine {
    /// Creates a booking: validates input, probes availability, resolves
    /// the duration, prices the selection, issues a daily booking code,
    /// and persists the aggregate.
    pub async fn create_booking(&self, request: CreateBookingRequest) -> EngineResult<Booking> {
        debug!(customer_id = %request.customer_id, "create_booking");

        validate_required("customerId", &request.customer_id)?;
        validate_equipment_lines(&request.equipment)?;
        validate_event_details(&request.details)?;

        let duration = resolve(
            request.start_date,
            request.end_date,
            request.include_hours,
            request.start_time,
            request.end_time,
        )?;

        self.availability
            .check(&request.equipment, request.start_date, request.end_date)
            .await
            .map_err(|u| EngineError::unavailable(u.to_string()))?;

        let service_charges = self.service_charges_for(request.booking_type);
        let discount = Money::from_paise(request.discount_paise).clamp_non_negative();

        let pricing = compute_breakdown(&PriceInputs {
            lines: &request.equipment,
            duration,
            include_hours: request.include_hours,
            service_charges,
            discount,
        });

        let now = Utc::now();
        let mut booking = Booking {
            id: Uuid::new_v4().to_string(),
            booking_code: String::new(), // issued below
            customer_id: request.customer_id,
            booking_type: request.booking_type,
            event_type: request.event_type,
            start_date: request.start_date,
            end_date: request.end_date,
            include_hours: request.include_hours,
            start_time: request.start_time,
            end_time: request.end_time,
            total_days: duration.total_days,
            total_minutes: duration.total_minutes,
            equipment: request.equipment,
            subscription_ref_id: request.subscription_ref_id,
            details: request.details,
            pricing,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            payment_requests: Vec::new(),
            cancellation_reason: None,
            cancelled_at: None,
            created_at: now,
            updated_at: now,
            version: 0,
        };

        // Derive the payment status instead of trusting the Unpaid
        // initializer: a fully discounted booking has nothing remaining
        // and is born FullyPaid.
        booking.recompute_payment_fields();

        self.insert_with_code(&mut booking).await?;

        info!(
            booking_id = %booking.id,
            code = %booking.booking_code,
            total_paise = booking.pricing.total_paise,
            "Booking created"
        );
        Ok(booking)
    }

    /// Computes a price preview without touching the database.
    ///
    /// Pure apart from validation: the same inputs always produce the
    /// same breakdown the eventual `create_booking` will persist.
    pub fn price_preview(&self, request: &PricePreviewRequest) -> EngineResult<PricingBreakdown> {
        validate_equipment_lines(&request.equipment)?;

        let duration = match (request.start_date, request.end_date) {
            (Some(start), Some(end)) => resolve(
                start,
                end,
                request.include_hours,
                request.start_time,
                request.end_time,
            )?,
            _ => RentalDuration::empty(),
        };

        Ok(compute_breakdown(&PriceInputs {
            lines: &request.equipment,
            duration,
            include_hours: request.include_hours,
            service_charges: self.service_charges_for(request.booking_type),
            discount: Money::from_paise(request.discount_paise).clamp_non_negative(),
        }))
    }

    /// Gets a booking by ID.
    pub async fn get_booking(&self, id: &str) -> EngineResult<Booking> {
        self.db
            .bookings()
            .get_by_id(id)
            .await?
            .ok_or_else(|| EngineError::not_found("Booking", id))
    }

    /// Gets a booking by its human-readable code.
    pub async fn get_booking_by_code(&self, code: &str) -> EngineResult<Booking> {
        self.db
            .bookings()
            .get_by_code(code)
            .await?
            .ok_or_else(|| EngineError::not_found("Booking", code))
    }

    /// Lists bookings, newest first.
    pub async fn list_bookings(
        &self,
        request: &ListBookingsRequest,
    ) -> EngineResult<BookingListResponse> {
        let page = self
            .db
            .bookings()
            .list(&BookingFilter {
                status: request.status,
                customer_id: request.customer_id.clone(),
                limit: request.limit,
                offset: request.offset,
            })
            .await?;

        Ok(BookingListResponse {
            bookings: page.bookings,
            total: page.total,
        })
    }

    /// Admin confirms a pending booking.
    pub async fn confirm_booking(&self, id: &str) -> EngineResult<Booking> {
        let (booking, ()) = self.commit_with_retry(id, |b| b.confirm(Utc::now())).await?;
        info!(booking_id = %id, "Booking confirmed");
        Ok(booking)
    }

    /// Marks a confirmed booking as underway.
    pub async fn begin_booking(&self, id: &str) -> EngineResult<Booking> {
        let (booking, ()) = self.commit_with_retry(id, |b| b.begin(Utc::now())).await?;
        info!(booking_id = %id, "Booking in progress");
        Ok(booking)
    }

    /// Marks an in-progress booking as finished.
    pub async fn complete_booking(&self, id: &str) -> EngineResult<Booking> {
        let (booking, ()) = self.commit_with_retry(id, |b| b.complete(Utc::now())).await?;
        info!(booking_id = %id, "Booking completed");
        Ok(booking)
    }

    /// Flags a completed booking as refunded. Money movement is external.
    pub async fn refund_booking(&self, id: &str) -> EngineResult<Booking> {
        let (booking, ()) = self.commit_with_retry(id, |b| b.refund(Utc::now())).await?;
        info!(booking_id = %id, "Booking refunded");
        Ok(booking)
    }

    /// Cancels a booking with a recorded reason.
    pub async fn cancel_booking(&self, id: &str, reason: &str) -> EngineResult<Booking> {
        validate_reason(reason)?;

        let (booking, ()) = self
            .commit_with_retry(id, |b| b.cancel(reason, Utc::now()))
            .await?;
        info!(booking_id = %id, reason, "Booking cancelled");
        Ok(booking)
    }

    fn service_charges_for(&self, booking_type: BookingType) -> Money {
        match booking_type {
            BookingType::EquipmentRental => self.config.delivery_fee,
            BookingType::EventCoverage
            | BookingType::FunctionShoot
            | BookingType::StudioSession => self.config.service_fee,
        }
    }

    /// Issues a `SB-YYYYMMDD-NNNN` code and inserts the booking, stepping
    /// the sequence past any concurrent creation that claimed the same
    /// number (the UNIQUE index on booking_code is the arbiter).
    async fn insert_with_code(&self, booking: &mut Booking) -> EngineResult<()> {
        let prefix = format!("SB-{}-", booking.created_at.format("%Y%m%d"));
        let mut sequence = self.db.bookings().count_by_code_prefix(&prefix).await? + 1;

        let mut attempt: u32 = 0;
        loop {
            booking.booking_code = format!("{prefix}{sequence:04}");

            match self.db.bookings().insert(booking).await {
                Ok(()) => return Ok(()),
                Err(DbError::UniqueViolation { .. }) if attempt < MAX_CODE_RETRIES => {
                    attempt += 1;
                    sequence += 1;
                    debug!(code = %booking.booking_code, "Booking code taken, stepping sequence");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
