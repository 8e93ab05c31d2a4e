//! # Booking Repository
//!
//! Database operations for bookings and their payment ledgers.
//!
//! ## Commit Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Version-Checked Booking Commit                          │
//! │                                                                         │
//! │  1. LOAD                                                               │
//! │     └── get_by_id() → Booking { version: 4, ... }                      │
//! │                                                                         │
//! │  2. MUTATE (in shutter-core, outside this crate)                       │
//! │     └── state machine / payment ledger updates the in-memory copy      │
//! │                                                                         │
//! │  3. COMMIT                                                             │
//! │     └── update() runs, in one transaction:                             │
//! │         UPDATE bookings SET ..., version = 5                           │
//! │           WHERE id = ? AND version = 4                                 │
//! │         ├── 0 rows? → VersionConflict (caller reloads and retries)     │
//! │         └── 1 row?  → rewrite the payment_requests ledger              │
//! │                                                                         │
//! │  The version check makes every read-mutate-write cycle atomic:         │
//! │  two admins processing the same booking can never silently             │
//! │  overwrite each other.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Equipment lines and event details are stored as JSON columns: they are
//! only ever read and written through the aggregate, never queried by field.

use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use shutter_core::{
    Booking, BookingStatus, BookingType, EquipmentLine, EventDetails, EventType, PaymentMethod,
    PaymentRequest, PaymentRequestStatus, PaymentStatus, PricingBreakdown,
};

// =============================================================================
// Row Types
// =============================================================================

/// Flat row shape of the `bookings` table.
///
/// Runtime-bound queries decode into this, then [`BookingRow::into_booking`]
/// parses the JSON columns and attaches the ledger.
#[derive(Debug, FromRow)]
struct BookingRow {
    id: String,
    booking_code: String,
    customer_id: String,
    booking_type: BookingType,
    event_type: EventType,
    start_date: chrono::NaiveDate,
    end_date: chrono::NaiveDate,
    include_hours: bool,
    start_time: Option<chrono::NaiveTime>,
    end_time: Option<chrono::NaiveTime>,
    total_days: i64,
    total_minutes: i64,
    equipment_json: String,
    subscription_ref_id: Option<String>,
    details_json: String,
    equipment_total_paise: i64,
    service_charges_paise: i64,
    taxes_paise: i64,
    discount_paise: i64,
    total_paise: i64,
    advance_paise: i64,
    remaining_paise: i64,
    status: BookingStatus,
    payment_status: PaymentStatus,
    cancellation_reason: Option<String>,
    cancelled_at: Option<chrono::DateTime<chrono::Utc>>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
    version: i64,
}

impl BookingRow {
    fn into_booking(self, payment_requests: Vec<PaymentRequest>) -> DbResult<Booking> {
        let equipment: Vec<EquipmentLine> = serde_json::from_str(&self.equipment_json)?;
        let details: EventDetails = serde_json::from_str(&self.details_json)?;

        Ok(Booking {
            id: self.id,
            booking_code: self.booking_code,
            customer_id: self.customer_id,
            booking_type: self.booking_type,
            event_type: self.event_type,
            start_date: self.start_date,
            end_date: self.end_date,
            include_hours: self.include_hours,
            start_time: self.start_time,
            end_time: self.end_time,
            total_days: self.total_days,
            total_minutes: self.total_minutes,
            equipment,
            subscription_ref_id: self.subscription_ref_id,
            details,
            pricing: PricingBreakdown {
                equipment_total_paise: self.equipment_total_paise,
                service_charges_paise: self.service_charges_paise,
                taxes_paise: self.taxes_paise,
                discount_paise: self.discount_paise,
                total_paise: self.total_paise,
                advance_paise: self.advance_paise,
                remaining_paise: self.remaining_paise,
            },
            status: self.status,
            payment_status: self.payment_status,
            payment_requests,
            cancellation_reason: self.cancellation_reason,
            cancelled_at: self.cancelled_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
            version: self.version,
        })
    }
}

/// Flat row shape of the `payment_requests` table.
#[derive(Debug, FromRow)]
struct RequestRow {
    id: String,
    booking_id: String,
    amount_paise: i64,
    method: PaymentMethod,
    status: PaymentRequestStatus,
    requested_at: chrono::DateTime<chrono::Utc>,
    processed_at: Option<chrono::DateTime<chrono::Utc>>,
    admin_notes: Option<String>,
}

impl From<RequestRow> for PaymentRequest {
    fn from(row: RequestRow) -> Self {
        PaymentRequest {
            id: row.id,
            booking_id: row.booking_id,
            amount_paise: row.amount_paise,
            method: row.method,
            status: row.status,
            requested_at: row.requested_at,
            processed_at: row.processed_at,
            admin_notes: row.admin_notes,
        }
    }
}

// =============================================================================
// Filters and Pages
// =============================================================================

/// Optional filters for booking list queries.
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    /// Restrict to a lifecycle status.
    pub status: Option<BookingStatus>,
    /// Restrict to one customer's bookings.
    pub customer_id: Option<String>,
    /// Page size. Zero means the default of 50.
    pub limit: i64,
    /// Page start offset.
    pub offset: i64,
}

/// One page of bookings plus the unpaginated match count.
#[derive(Debug)]
pub struct BookingPage {
    pub bookings: Vec<Booking>,
    pub total: i64,
}

const DEFAULT_PAGE_SIZE: i64 = 50;

const BOOKING_COLUMNS: &str = "\
    id, booking_code, customer_id, booking_type, event_type, \
    start_date, end_date, include_hours, start_time, end_time, \
    total_days, total_minutes, equipment_json, subscription_ref_id, details_json, \
    equipment_total_paise, service_charges_paise, taxes_paise, discount_paise, \
    total_paise, advance_paise, remaining_paise, \
    status, payment_status, cancellation_reason, cancelled_at, \
    created_at, updated_at, version";

// =============================================================================
// Repository
// =============================================================================

/// Repository for booking database operations.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: SqlitePool,
}

impl BookingRepository {
    /// Creates a new BookingRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BookingRepository { pool }
    }

    /// Inserts a freshly created booking and its (usually empty) ledger.
    pub async fn insert(&self, booking: &Booking) -> DbResult<()> {
        debug!(id = %booking.id, code = %booking.booking_code, "Inserting booking");

        let equipment_json = serde_json::to_string(&booking.equipment)?;
        let details_json = serde_json::to_string(&booking.details)?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, booking_code, customer_id, booking_type, event_type,
                start_date, end_date, include_hours, start_time, end_time,
                total_days, total_minutes, equipment_json, subscription_ref_id, details_json,
                equipment_total_paise, service_charges_paise, taxes_paise, discount_paise,
                total_paise, advance_paise, remaining_paise,
                status, payment_status, cancellation_reason, cancelled_at,
                created_at, updated_at, version
            ) VALUES (
                ?, ?, ?, ?, ?,
                ?, ?, ?, ?, ?,
                ?, ?, ?, ?, ?,
                ?, ?, ?, ?,
                ?, ?, ?,
                ?, ?, ?, ?,
                ?, ?, ?
            )
            "#,
        )
        .bind(&booking.id)
        .bind(&booking.booking_code)
        .bind(&booking.customer_id)
        .bind(booking.booking_type)
        .bind(booking.event_type)
        .bind(booking.start_date)
        .bind(booking.end_date)
        .bind(booking.include_hours)
        .bind(booking.start_time)
        .bind(booking.end_time)
        .bind(booking.total_days)
        .bind(booking.total_minutes)
        .bind(&equipment_json)
        .bind(&booking.subscription_ref_id)
        .bind(&details_json)
        .bind(booking.pricing.equipment_total_paise)
        .bind(booking.pricing.service_charges_paise)
        .bind(booking.pricing.taxes_paise)
        .bind(booking.pricing.discount_paise)
        .bind(booking.pricing.total_paise)
        .bind(booking.pricing.advance_paise)
        .bind(booking.pricing.remaining_paise)
        .bind(booking.status)
        .bind(booking.payment_status)
        .bind(&booking.cancellation_reason)
        .bind(booking.cancelled_at)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .bind(booking.version)
        .execute(&mut *tx)
        .await?;

        for (position, request) in booking.payment_requests.iter().enumerate() {
            insert_request(&mut tx, request, position as i64).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Gets a booking by ID, with its ledger in position order.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Booking>> {
        let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?");
        let row: Option<BookingRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let requests = self.load_requests(id).await?;
                Ok(Some(row.into_booking(requests)?))
            }
            None => Ok(None),
        }
    }

    /// Gets a booking by its human-readable code.
    pub async fn get_by_code(&self, code: &str) -> DbResult<Option<Booking>> {
        let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE booking_code = ?");
        let row: Option<BookingRow> = sqlx::query_as(&sql)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let requests = self.load_requests(&row.id.clone()).await?;
                Ok(Some(row.into_booking(requests)?))
            }
            None => Ok(None),
        }
    }

    /// Commits a mutated booking with a version check.
    ///
    /// `booking.version` must hold the version that was loaded; the row is
    /// written with `version + 1`. The ledger is rewritten wholesale in the
    /// same transaction, which also covers pending-request removal.
    ///
    /// ## Returns
    /// The committed (incremented) version.
    ///
    /// ## Errors
    /// - `VersionConflict` when another writer committed first
    /// - `NotFound` when the booking does not exist at all
    pub async fn update(&self, booking: &Booking) -> DbResult<i64> {
        let expected = booking.version;
        let next = expected + 1;

        debug!(id = %booking.id, expected_version = expected, "Committing booking update");

        let equipment_json = serde_json::to_string(&booking.equipment)?;
        let details_json = serde_json::to_string(&booking.details)?;

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE bookings SET
                booking_type = ?, event_type = ?,
                start_date = ?, end_date = ?, include_hours = ?,
                start_time = ?, end_time = ?,
                total_days = ?, total_minutes = ?,
                equipment_json = ?, subscription_ref_id = ?, details_json = ?,
                equipment_total_paise = ?, service_charges_paise = ?, taxes_paise = ?,
                discount_paise = ?, total_paise = ?, advance_paise = ?, remaining_paise = ?,
                status = ?, payment_status = ?,
                cancellation_reason = ?, cancelled_at = ?,
                updated_at = ?, version = ?
            WHERE id = ? AND version = ?
            "#,
        )
        .bind(booking.booking_type)
        .bind(booking.event_type)
        .bind(booking.start_date)
        .bind(booking.end_date)
        .bind(booking.include_hours)
        .bind(booking.start_time)
        .bind(booking.end_time)
        .bind(booking.total_days)
        .bind(booking.total_minutes)
        .bind(&equipment_json)
        .bind(&booking.subscription_ref_id)
        .bind(&details_json)
        .bind(booking.pricing.equipment_total_paise)
        .bind(booking.pricing.service_charges_paise)
        .bind(booking.pricing.taxes_paise)
        .bind(booking.pricing.discount_paise)
        .bind(booking.pricing.total_paise)
        .bind(booking.pricing.advance_paise)
        .bind(booking.pricing.remaining_paise)
        .bind(booking.status)
        .bind(booking.payment_status)
        .bind(&booking.cancellation_reason)
        .bind(booking.cancelled_at)
        .bind(booking.updated_at)
        .bind(next)
        .bind(&booking.id)
        .bind(expected)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            // Distinguish a stale version from a missing booking.
            let exists: Option<i64> =
                sqlx::query_scalar("SELECT version FROM bookings WHERE id = ?")
                    .bind(&booking.id)
                    .fetch_optional(&mut *tx)
                    .await?;

            return Err(match exists {
                Some(_) => DbError::version_conflict("Booking", &booking.id, expected),
                None => DbError::not_found("Booking", &booking.id),
            });
        }

        // Rewrite the ledger. Requests keep their IDs, so this is a no-op
        // for untouched entries and handles removal of cancelled ones.
        sqlx::query("DELETE FROM payment_requests WHERE booking_id = ?")
            .bind(&booking.id)
            .execute(&mut *tx)
            .await?;

        for (position, request) in booking.payment_requests.iter().enumerate() {
            insert_request(&mut tx, request, position as i64).await?;
        }

        tx.commit().await?;
        Ok(next)
    }

    /// Lists bookings, newest first, with optional filters.
    pub async fn list(&self, filter: &BookingFilter) -> DbResult<BookingPage> {
        let limit = if filter.limit > 0 {
            filter.limit
        } else {
            DEFAULT_PAGE_SIZE
        };

        let mut where_clause = String::from(" WHERE 1=1");
        if filter.status.is_some() {
            where_clause.push_str(" AND status = ?");
        }
        if filter.customer_id.is_some() {
            where_clause.push_str(" AND customer_id = ?");
        }

        let count_sql = format!("SELECT COUNT(*) FROM bookings{where_clause}");
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(status) = filter.status {
            count_query = count_query.bind(status);
        }
        if let Some(customer_id) = &filter.customer_id {
            count_query = count_query.bind(customer_id);
        }
        let total = count_query.fetch_one(&self.pool).await?;

        let list_sql = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings{where_clause} \
             ORDER BY created_at DESC, booking_code DESC LIMIT ? OFFSET ?"
        );
        let mut list_query = sqlx::query_as::<_, BookingRow>(&list_sql);
        if let Some(status) = filter.status {
            list_query = list_query.bind(status);
        }
        if let Some(customer_id) = &filter.customer_id {
            list_query = list_query.bind(customer_id);
        }
        let rows = list_query
            .bind(limit)
            .bind(filter.offset)
            .fetch_all(&self.pool)
            .await?;

        let mut bookings = Vec::with_capacity(rows.len());
        for row in rows {
            let requests = self.load_requests(&row.id.clone()).await?;
            bookings.push(row.into_booking(requests)?);
        }

        Ok(BookingPage { bookings, total })
    }

    /// Counts bookings whose code starts with the given prefix.
    ///
    /// Backs the daily `SB-YYYYMMDD-NNNN` sequence.
    pub async fn count_by_code_prefix(&self, prefix: &str) -> DbResult<i64> {
        let pattern = format!("{prefix}%");
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE booking_code LIKE ?")
                .bind(&pattern)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Total bookings in the database.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn load_requests(&self, booking_id: &str) -> DbResult<Vec<PaymentRequest>> {
        let rows: Vec<RequestRow> = sqlx::query_as(
            r#"
            SELECT id, booking_id, amount_paise, method, status,
                   requested_at, processed_at, admin_notes
            FROM payment_requests
            WHERE booking_id = ?
            ORDER BY position
            "#,
        )
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PaymentRequest::from).collect())
    }
}

async fn insert_request(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    request: &PaymentRequest,
    position: i64,
) -> DbResult<()> {
    sqlx::query(
        r#"
        INSERT INTO payment_requests (
            id, booking_id, amount_paise, method, status,
            requested_at, processed_at, admin_notes, position
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&request.id)
    .bind(&request.booking_id)
    .bind(request.amount_paise)
    .bind(request.method)
    .bind(request.status)
    .bind(request.requested_at)
    .bind(request.processed_at)
    .bind(&request.admin_notes)
    .bind(position)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::{NaiveDate, Utc};
    use shutter_core::duration::resolve;
    use shutter_core::pricing::{compute_breakdown, PriceInputs};
    use shutter_core::{Money, PaymentDecision};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn sample_booking(code: &str) -> Booking {
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
            id: uuid::Uuid::new_v4().to_string(),
            booking_code: code.to_string(),
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

    #[tokio::test]
    async fn test_insert_and_get_round_trip() {
        let db = test_db().await;
        let booking = sample_booking("SB-20260310-0001");

        db.bookings().insert(&booking).await.unwrap();
        let loaded = db.bookings().get_by_id(&booking.id).await.unwrap().unwrap();

        assert_eq!(loaded.booking_code, "SB-20260310-0001");
        assert_eq!(loaded.equipment, booking.equipment);
        assert_eq!(loaded.details, booking.details);
        assert_eq!(loaded.pricing, booking.pricing);
        assert_eq!(loaded.status, BookingStatus::Pending);
        assert_eq!(loaded.version, 0);
        assert_eq!(loaded.pricing.total_paise, 767_000);
    }

    #[tokio::test]
    async fn test_get_by_code() {
        let db = test_db().await;
        let booking = sample_booking("SB-20260310-0002");
        db.bookings().insert(&booking).await.unwrap();

        let loaded = db
            .bookings()
            .get_by_code("SB-20260310-0002")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.id, booking.id);

        assert!(db.bookings().get_by_code("SB-nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_booking_code_rejected() {
        let db = test_db().await;
        let first = sample_booking("SB-20260310-0003");
        let second = sample_booking("SB-20260310-0003");

        db.bookings().insert(&first).await.unwrap();
        let err = db.bookings().insert(&second).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_version_checked_update() {
        let db = test_db().await;
        let mut booking = sample_booking("SB-20260310-0004");
        db.bookings().insert(&booking).await.unwrap();

        booking.confirm(Utc::now()).unwrap();
        let next = db.bookings().update(&booking).await.unwrap();
        assert_eq!(next, 1);

        let loaded = db.bookings().get_by_id(&booking.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, BookingStatus::Confirmed);
        assert_eq!(loaded.version, 1);
    }

    #[tokio::test]
    async fn test_stale_version_conflicts() {
        let db = test_db().await;
        let booking = sample_booking("SB-20260310-0005");
        db.bookings().insert(&booking).await.unwrap();

        // Writer A commits from version 0
        let mut a = db.bookings().get_by_id(&booking.id).await.unwrap().unwrap();
        a.confirm(Utc::now()).unwrap();
        db.bookings().update(&a).await.unwrap();

        // Writer B still holds version 0
        let mut b = booking.clone();
        b.cancel("changed plans", Utc::now()).unwrap();
        let err = db.bookings().update(&b).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::VersionConflict { expected: 0, .. }
        ));
    }

    #[tokio::test]
    async fn test_update_missing_booking_is_not_found() {
        let db = test_db().await;
        let booking = sample_booking("SB-20260310-0006");

        let err = db.bookings().update(&booking).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_ledger_round_trip_preserves_order() {
        let db = test_db().await;
        let mut booking = sample_booking("SB-20260310-0007");
        db.bookings().insert(&booking).await.unwrap();

        let now = Utc::now();
        let first = booking
            .create_payment_request(Money::from_rupees(3_000), PaymentMethod::Upi, now)
            .unwrap()
            .id
            .clone();
        booking
            .create_payment_request(Money::from_rupees(2_000), PaymentMethod::Cash, now)
            .unwrap();
        booking
            .process_payment_request(&first, PaymentDecision::Accept, None, now)
            .unwrap();
        db.bookings().update(&booking).await.unwrap();

        let loaded = db.bookings().get_by_id(&booking.id).await.unwrap().unwrap();
        assert_eq!(loaded.payment_requests.len(), 2);
        assert_eq!(loaded.payment_requests[0].id, first);
        assert_eq!(
            loaded.payment_requests[0].status,
            PaymentRequestStatus::Accepted
        );
        assert_eq!(loaded.payment_status, PaymentStatus::AdvancePaid);
        assert_eq!(loaded.pricing.advance_paise, 300_000);
    }

    #[tokio::test]
    async fn test_list_filters_by_status() {
        let db = test_db().await;

        let pending = sample_booking("SB-20260310-0008");
        let mut confirmed = sample_booking("SB-20260310-0009");
        confirmed.confirm(Utc::now()).unwrap();

        db.bookings().insert(&pending).await.unwrap();
        db.bookings().insert(&confirmed).await.unwrap();

        let page = db
            .bookings()
            .list(&BookingFilter {
                status: Some(BookingStatus::Confirmed),
                ..BookingFilter::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.bookings.len(), 1);
        assert_eq!(page.bookings[0].id, confirmed.id);

        let all = db.bookings().list(&BookingFilter::default()).await.unwrap();
        assert_eq!(all.total, 2);
    }

    #[tokio::test]
    async fn test_list_pagination() {
        let db = test_db().await;
        for i in 0..5 {
            let booking = sample_booking(&format!("SB-20260310-01{i:02}"));
            db.bookings().insert(&booking).await.unwrap();
        }

        let page = db
            .bookings()
            .list(&BookingFilter {
                limit: 2,
                offset: 2,
                ..BookingFilter::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total, 5);
        assert_eq!(page.bookings.len(), 2);
    }

    #[tokio::test]
    async fn test_count_by_code_prefix() {
        let db = test_db().await;
        db.bookings()
            .insert(&sample_booking("SB-20260310-0001"))
            .await
            .unwrap();
        db.bookings()
            .insert(&sample_booking("SB-20260310-0002"))
            .await
            .unwrap();
        db.bookings()
            .insert(&sample_booking("SB-20260311-0001"))
            .await
            .unwrap();

        let count = db
            .bookings()
            .count_by_code_prefix("SB-20260310-")
            .await
            .unwrap();
        assert_eq!(count, 2);
    }
}
