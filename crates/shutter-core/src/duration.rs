//! # Duration Resolver
//!
//! Pure function turning a date range (and optional time range) into whole
//! rental days and a metered hour span.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  total_days    = (end_date − start_date) + 1     same-day = 1 day   │
//! │                                                                     │
//! │  hours off     → total_minutes = 0                                  │
//! │  hours on      → per-day span = end_time − start_time (minutes)     │
//! │                  total_minutes = max(0, span) × total_days          │
//! │                                                                     │
//! │  end_time <= start_time is NOT an error: the span collapses to 0.   │
//! │  The booking form does not block it, so neither do we.              │
//! │                                                                     │
//! │  end_date < start_date IS an error.                                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Minutes, not fractional hours, are the internal unit so that the
//! pricing calculator stays in exact integer arithmetic.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Rental Duration
// =============================================================================

/// Resolved duration of a rental: whole days plus a metered hour span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RentalDuration {
    /// Whole rental days, inclusive of both endpoints. Zero only for the
    /// "no dates selected yet" preview state.
    pub total_days: i64,

    /// Metered span per day, in minutes. Zero unless hours are included.
    pub minutes_per_day: i64,

    /// `minutes_per_day * total_days`.
    pub total_minutes: i64,
}

impl RentalDuration {
    /// The preview duration used while the booking form has no dates yet.
    #[inline]
    pub const fn empty() -> Self {
        RentalDuration {
            total_days: 0,
            minutes_per_day: 0,
            total_minutes: 0,
        }
    }

    /// Total metered hours as a fraction, for display.
    #[inline]
    pub fn total_hours(&self) -> f64 {
        self.total_minutes as f64 / 60.0
    }
}

// =============================================================================
// Resolver
// =============================================================================

/// Resolves a date range and optional time-of-day range into a
/// [`RentalDuration`].
///
/// Fails only when `end_date < start_date`; everything else (absent times,
/// backwards times) degrades to a zero hour span.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use shutter_core::duration::resolve;
///
/// let start = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 3, 12).unwrap();
///
/// let duration = resolve(start, end, false, None, None).unwrap();
/// assert_eq!(duration.total_days, 3);
/// assert_eq!(duration.total_minutes, 0);
/// ```
pub fn resolve(
    start_date: NaiveDate,
    end_date: NaiveDate,
    include_hours: bool,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
) -> Result<RentalDuration, ValidationError> {
    if end_date < start_date {
        return Err(ValidationError::EndBeforeStart {
            start: start_date,
            end: end_date,
        });
    }

    // Inclusive range: a same-day booking is one rental day.
    let total_days = (end_date - start_date).num_days() + 1;

    let minutes_per_day = match (include_hours, start_time, end_time) {
        (true, Some(from), Some(to)) => (to - from).num_minutes().max(0),
        _ => 0,
    };

    Ok(RentalDuration {
        total_days,
        minutes_per_day,
        total_minutes: minutes_per_day * total_days,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_same_day_is_one_day() {
        let d = date(2026, 5, 1);
        let duration = resolve(d, d, false, None, None).unwrap();
        assert_eq!(duration.total_days, 1);
        assert_eq!(duration.total_minutes, 0);
    }

    #[test]
    fn test_week_is_seven_days() {
        let start = date(2026, 5, 1);
        let end = date(2026, 5, 7);
        let duration = resolve(start, end, false, None, None).unwrap();
        assert_eq!(duration.total_days, 7);
    }

    #[test]
    fn test_backwards_range_is_rejected() {
        let err = resolve(date(2026, 5, 7), date(2026, 5, 1), false, None, None).unwrap_err();
        assert!(matches!(err, ValidationError::EndBeforeStart { .. }));
    }

    #[test]
    fn test_hours_multiply_across_days() {
        // 10:00-16:00 = 360 minutes/day over 3 days
        let duration = resolve(
            date(2026, 5, 1),
            date(2026, 5, 3),
            true,
            Some(time(10, 0)),
            Some(time(16, 0)),
        )
        .unwrap();
        assert_eq!(duration.minutes_per_day, 360);
        assert_eq!(duration.total_minutes, 1080);
        assert!((duration.total_hours() - 18.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fractional_hours() {
        // 09:15-11:45 = 2.5 hours
        let duration = resolve(
            date(2026, 5, 1),
            date(2026, 5, 1),
            true,
            Some(time(9, 15)),
            Some(time(11, 45)),
        )
        .unwrap();
        assert_eq!(duration.total_minutes, 150);
        assert!((duration.total_hours() - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_backwards_times_collapse_to_zero() {
        // Permissive: end before start yields zero hours, not an error
        let duration = resolve(
            date(2026, 5, 1),
            date(2026, 5, 2),
            true,
            Some(time(18, 0)),
            Some(time(9, 0)),
        )
        .unwrap();
        assert_eq!(duration.total_minutes, 0);
        assert_eq!(duration.total_days, 2);
    }

    #[test]
    fn test_hours_flag_without_times_is_zero() {
        let duration = resolve(
            date(2026, 5, 1),
            date(2026, 5, 2),
            true,
            Some(time(10, 0)),
            None,
        )
        .unwrap();
        assert_eq!(duration.total_minutes, 0);
    }
}
