//! # Equipment Availability Probe
//!
//! The equipment catalog is externally owned, so the engine cannot decide
//! availability itself. Deployments inject a probe; the default accepts
//! everything, which matches a catalog service that does its own holds.
//!
//! ## Seam
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  create_booking                                                     │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  AvailabilityProbe::check(lines, start, end)                        │
//! │       │                                                             │
//! │       ├── Ok(())            → booking proceeds                      │
//! │       └── Err(Unavailable)  → creation rejected, nothing persisted  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;

use shutter_core::EquipmentLine;

/// Why a selection cannot be fulfilled for the requested range.
#[derive(Debug, Clone)]
pub struct Unavailable {
    /// The catalog entry that failed the check.
    pub equipment_ref_id: String,
    /// Probe-supplied explanation, shown to the customer.
    pub reason: String,
}

impl std::fmt::Display for Unavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} is unavailable: {}", self.equipment_ref_id, self.reason)
    }
}

/// Checks whether an equipment selection can be fulfilled for a date range.
///
/// Implementations typically call the catalog service. The check is
/// advisory: the catalog remains the system of record for holds, and a
/// race between check and confirm is resolved there.
#[async_trait]
pub trait AvailabilityProbe: Send + Sync {
    async fn check(
        &self,
        lines: &[EquipmentLine],
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<(), Unavailable>;
}

/// Default probe: every selection is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysAvailable;

#[async_trait]
impl AvailabilityProbe for AlwaysAvailable {
    async fn check(
        &self,
        _lines: &[EquipmentLine],
        _start_date: NaiveDate,
        _end_date: NaiveDate,
    ) -> Result<(), Unavailable> {
        Ok(())
    }
}
