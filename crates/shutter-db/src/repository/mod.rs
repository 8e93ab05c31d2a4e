//! # Repository Module
//!
//! Repository implementations for database access.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Repository Pattern                                │
//! │                                                                         │
//! │  Engine Operation                                                      │
//! │       │                                                                 │
//! │       │  "load booking b-123, commit version 4"                        │
//! │       ▼                                                                 │
//! │  ┌───────────────────┐                                                 │
//! │  │ BookingRepository │ ← Knows SQL, knows tables                       │
//! │  └───────────────────┘                                                 │
//! │       │                                                                 │
//! │       │  SELECT / INSERT / version-checked UPDATE                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Operations never contain SQL                                        │
//! │  • SQL changes don't touch the workflow layer                          │
//! │  • Queries live next to the schema they depend on                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod booking;
