//! # Engine Operations
//!
//! The workflows clients call. Every mutation follows the same shape:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                 Load → Mutate → Commit (with retry)                 │
//! │                                                                     │
//! │  1. LOAD     repository.get_by_id()  → Booking { version: n }      │
//! │  2. MUTATE   shutter-core state machine / ledger (pure, in memory) │
//! │  3. COMMIT   repository.update()     → WHERE version = n           │
//! │        │                                                            │
//! │        ├── Ok           → done, version is n+1                     │
//! │        ├── Conflict     → another writer won; reload and retry     │
//! │        │                  (bounded by config.max_commit_retries)   │
//! │        └── Other error  → surface immediately                      │
//! │                                                                     │
//! │  Domain errors from step 2 are never retried: a rejected           │
//! │  transition stays rejected no matter how often it is replayed.     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::warn;

use shutter_core::{Booking, CoreError};
use shutter_db::DbError;

use crate::error::{EngineError, EngineResult};
use crate::Engine;

pub mod booking;
pub mod payment;

impl Engine {
    /// Runs a load-mutate-commit cycle with bounded conflict retries.
    ///
    /// The closure applies the domain mutation and may return a value
    /// extracted from the mutated aggregate (e.g. the created payment
    /// request). On commit the returned booking carries the new version.
    pub(crate) async fn commit_with_retry<T, F>(
        &self,
        booking_id: &str,
        mut mutate: F,
    ) -> EngineResult<(Booking, T)>
    where
        F: FnMut(&mut Booking) -> Result<T, CoreError>,
    {
        let mut attempt: u32 = 0;
        loop {
            let mut booking = self
                .db
                .bookings()
                .get_by_id(booking_id)
                .await?
                .ok_or_else(|| EngineError::not_found("Booking", booking_id))?;

            let outcome = mutate(&mut booking)?;

            match self.db.bookings().update(&booking).await {
                Ok(version) => {
                    booking.version = version;
                    return Ok((booking, outcome));
                }
                Err(DbError::VersionConflict { .. })
                    if attempt < self.config.max_commit_retries =>
                {
                    attempt += 1;
                    warn!(booking_id, attempt, "Commit lost a version race, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
