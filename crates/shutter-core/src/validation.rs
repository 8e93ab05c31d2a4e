//! # Validation Module
//!
//! Input validation utilities for Shutter.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Booking form (frontend)                                   │
//! │  ├── Basic format checks, immediate feedback                        │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: Engine operation boundary (Rust)                          │
//! │  └── THIS MODULE: field + business-input validation                 │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Database (SQLite)                                         │
//! │  └── NOT NULL / CHECK / foreign key constraints                     │
//! │                                                                     │
//! │  Defense in depth: unrecognized or malformed values are rejected    │
//! │  at the boundary, never passed through as loose strings.            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::{EquipmentLine, EventDetails};
use crate::{MAX_DAILY_RATE_PAISE, MAX_EQUIPMENT_LINES, MAX_LINE_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates that a required text field is present.
///
/// ## Example
/// ```rust
/// use shutter_core::validation::validate_required;
///
/// assert!(validate_required("customerId", "cust-42").is_ok());
/// assert!(validate_required("customerId", "   ").is_err());
/// ```
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a cancellation reason: required, at most 500 characters.
pub fn validate_reason(reason: &str) -> ValidationResult<()> {
    let reason = reason.trim();

    if reason.is_empty() {
        return Err(ValidationError::Required {
            field: "reason".to_string(),
        });
    }

    if reason.len() > 500 {
        return Err(ValidationError::TooLong {
            field: "reason".to_string(),
            max: 500,
        });
    }

    Ok(())
}

/// Validates a UUID string format.
pub fn validate_uuid(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a payment amount in paise.
///
/// ## Rules
/// - Must be positive (> 0); the overcommit ceiling is checked by the
///   ledger, not here
pub fn validate_payment_amount(paise: i64) -> ValidationResult<()> {
    if paise <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }
    Ok(())
}

/// Validates an equipment line quantity.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a frozen daily rate in paise. Zero is allowed (promo items);
/// the ceiling keeps pricing products inside i64.
pub fn validate_daily_rate(paise: i64) -> ValidationResult<()> {
    if !(0..=MAX_DAILY_RATE_PAISE).contains(&paise) {
        return Err(ValidationError::OutOfRange {
            field: "dailyRate".to_string(),
            min: 0,
            max: MAX_DAILY_RATE_PAISE,
        });
    }
    Ok(())
}

// =============================================================================
// Aggregate Validators
// =============================================================================

/// Validates the full equipment selection for a booking.
pub fn validate_equipment_lines(lines: &[EquipmentLine]) -> ValidationResult<()> {
    if lines.len() > MAX_EQUIPMENT_LINES {
        return Err(ValidationError::OutOfRange {
            field: "equipment".to_string(),
            min: 0,
            max: MAX_EQUIPMENT_LINES as i64,
        });
    }

    for line in lines {
        validate_required("equipmentRefId", &line.equipment_ref_id)?;
        validate_quantity(line.quantity)?;
        validate_daily_rate(line.daily_rate_paise)?;
    }

    Ok(())
}

/// Validates event details: the contact fields the form marks required
/// must be present; everything else is stored as entered.
pub fn validate_event_details(details: &EventDetails) -> ValidationResult<()> {
    validate_required("contactPerson", &details.contact_person)?;
    validate_required("contactPhone", &details.contact_phone)?;

    if let Some(count) = details.guest_count {
        if count <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "guestCount".to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(qty: i64, rate: i64) -> EquipmentLine {
        EquipmentLine {
            equipment_ref_id: "cam-5d".to_string(),
            quantity: qty,
            daily_rate_paise: rate,
        }
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required("customerId", "cust-1").is_ok());
        assert!(validate_required("customerId", "").is_err());
        assert!(validate_required("customerId", "  ").is_err());
    }

    #[test]
    fn test_validate_reason() {
        assert!(validate_reason("double booked").is_ok());
        assert!(validate_reason("").is_err());
        assert!(validate_reason(&"x".repeat(501)).is_err());
    }

    #[test]
    fn test_validate_payment_amount() {
        assert!(validate_payment_amount(1).is_ok());
        assert!(validate_payment_amount(0).is_err());
        assert!(validate_payment_amount(-500).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_LINE_QUANTITY).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(MAX_LINE_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_daily_rate_bounds() {
        assert!(validate_daily_rate(0).is_ok());
        assert!(validate_daily_rate(MAX_DAILY_RATE_PAISE).is_ok());
        assert!(validate_daily_rate(-1).is_err());
        assert!(validate_daily_rate(MAX_DAILY_RATE_PAISE + 1).is_err());
    }

    #[test]
    fn test_validate_equipment_lines() {
        assert!(validate_equipment_lines(&[line(2, 100_000)]).is_ok());
        assert!(validate_equipment_lines(&[line(0, 100_000)]).is_err());
        assert!(validate_equipment_lines(&[line(1, -1)]).is_err());
        assert!(validate_equipment_lines(&[line(1, MAX_DAILY_RATE_PAISE + 1)]).is_err());

        let too_many: Vec<_> = (0..=MAX_EQUIPMENT_LINES).map(|_| line(1, 100)).collect();
        assert!(validate_equipment_lines(&too_many).is_err());
    }

    #[test]
    fn test_validate_event_details() {
        let mut details = EventDetails {
            contact_person: "Asha".to_string(),
            contact_phone: "98XXXXXX01".to_string(),
            ..EventDetails::default()
        };
        assert!(validate_event_details(&details).is_ok());

        details.guest_count = Some(0);
        assert!(validate_event_details(&details).is_err());

        details.guest_count = None;
        details.contact_phone = String::new();
        assert!(validate_event_details(&details).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("id", "550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("id", "").is_err());
        assert!(validate_uuid("id", "not-a-uuid").is_err());
    }
}
