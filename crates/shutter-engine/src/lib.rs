//! # shutter-engine: Operation Layer for Shutter
//!
//! The workflows clients call: booking creation, price preview, lifecycle
//! transitions, and payment-request handling. This crate is the **only**
//! mutation entry point; nothing else writes bookings.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shutter Architecture                             │
//! │                                                                         │
//! │  Booking Form / Admin Console                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               ★ shutter-engine (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐  ┌────────────┐  ┌─────────────────────────┐  │   │
//! │  │   │ ops::      │  │ ops::      │  │ availability            │  │   │
//! │  │   │ booking    │  │ payment    │  │ (injected probe)        │  │   │
//! │  │   │ create     │  │ request    │  │                         │  │   │
//! │  │   │ preview    │  │ cancel     │  │ config                  │  │   │
//! │  │   │ transitions│  │ process    │  │ (fees, retry budget)    │  │   │
//! │  │   └─────┬──────┘  └─────┬──────┘  └─────────────────────────┘  │   │
//! │  │         │               │                                       │   │
//! │  │         └───── load → mutate (shutter-core) → commit ─────┐    │   │
//! │  └────────────────────────────────────────────────────────────│────┘   │
//! │                                                               ▼        │
//! │                                    shutter-db (version-checked writes) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shutter_db::{Database, DbConfig};
//! use shutter_engine::{Engine, EngineConfig};
//!
//! let db = Database::new(DbConfig::new("./shutter.db")).await?;
//! let engine = Engine::new(db);
//!
//! let booking = engine.create_booking(request).await?;
//! engine.confirm_booking(&booking.id).await?;
//! ```

use std::sync::Arc;

// =============================================================================
// Module Declarations
// =============================================================================

pub mod availability;
pub mod config;
pub mod error;
pub mod ops;

// =============================================================================
// Re-exports
// =============================================================================

pub use availability::{AlwaysAvailable, AvailabilityProbe, Unavailable};
pub use config::EngineConfig;
pub use error::{EngineError, EngineResult, ErrorCode};
pub use ops::booking::{
    BookingListResponse, CreateBookingRequest, ListBookingsRequest, PricePreviewRequest,
};

use shutter_db::Database;

// =============================================================================
// Engine
// =============================================================================

/// The booking engine. Cheap to clone; share one per process.
#[derive(Clone)]
pub struct Engine {
    pub(crate) db: Database,
    pub(crate) config: EngineConfig,
    pub(crate) availability: Arc<dyn AvailabilityProbe>,
}

impl Engine {
    /// Creates an engine with default configuration and an
    /// always-available probe.
    pub fn new(db: Database) -> Self {
        Engine::with_config(db, EngineConfig::default())
    }

    /// Creates an engine with explicit configuration.
    pub fn with_config(db: Database, config: EngineConfig) -> Self {
        Engine {
            db,
            config,
            availability: Arc::new(AlwaysAvailable),
        }
    }

    /// Replaces the availability probe (catalog integration).
    pub fn with_availability(mut self, probe: Arc<dyn AvailabilityProbe>) -> Self {
        self.availability = probe;
        self
    }

    /// The underlying database handle.
    pub fn db(&self) -> &Database {
        &self.db
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
