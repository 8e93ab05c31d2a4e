//! # Pricing Calculator
//!
//! The single pure function that turns selected line items, a resolved
//! duration, service charges, and an optional subscription discount into a
//! price breakdown. Every entry point prices through here; there is no
//! second formula anywhere in the system.
//!
//! ## Component Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  equipment_total = Σ rate × qty × days                              │
//! │                  + Σ rate × 15% × qty × hours   (when hours apply)  │
//! │                                                                     │
//! │  subtotal  = equipment_total + service_charges                      │
//! │  discount  = min(discount, subtotal)        ← clamped, never debt   │
//! │  taxable   = subtotal − discount            ← discount BEFORE tax   │
//! │  taxes     = taxable × 18%                                          │
//! │  total     = taxable + taxes                                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Discount Ordering
//! The discount represents an equipment/service benefit, not a tax
//! exemption, so it is applied to the subtotal before GST. This is the one
//! documented ordering for all call sites (see DESIGN.md).
//!
//! ## Preview State
//! With zero line items or zero duration the breakdown collapses to the
//! standalone service charge, never an error. The booking form relies on
//! this while the customer is still filling in dates.

use crate::duration::RentalDuration;
use crate::money::Money;
use crate::types::{EquipmentLine, PricingBreakdown, TaxRate};
use crate::{GST_RATE_BPS, HOURLY_RATE_BPS};

// =============================================================================
// Inputs
// =============================================================================

/// Inputs to the pricing calculator.
///
/// `service_charges` is the flat booking-type-dependent charge (delivery
/// fee for equipment rentals, service fee for shoots). `discount` is the
/// externally supplied subscription benefit; the calculator clamps it but
/// never computes it.
#[derive(Debug, Clone, Copy)]
pub struct PriceInputs<'a> {
    pub lines: &'a [EquipmentLine],
    pub duration: RentalDuration,
    pub include_hours: bool,
    pub service_charges: Money,
    pub discount: Money,
}

// =============================================================================
// Calculator
// =============================================================================

/// Computes the full price breakdown.
///
/// Pure and deterministic: identical inputs yield identical output, with
/// no clock or randomness involved. `advance` starts at zero and
/// `remaining` at the total; the payment ledger maintains both afterwards.
///
/// ## Example
/// ```rust
/// use shutter_core::duration::RentalDuration;
/// use shutter_core::money::Money;
/// use shutter_core::pricing::{compute_breakdown, PriceInputs};
/// use shutter_core::types::EquipmentLine;
///
/// let lines = vec![EquipmentLine {
///     equipment_ref_id: "cam-5d".to_string(),
///     quantity: 2,
///     daily_rate_paise: Money::from_rupees(1_000).paise(),
/// }];
/// let duration = RentalDuration { total_days: 3, minutes_per_day: 0, total_minutes: 0 };
///
/// let pricing = compute_breakdown(&PriceInputs {
///     lines: &lines,
///     duration,
///     include_hours: false,
///     service_charges: Money::from_rupees(500),
///     discount: Money::zero(),
/// });
///
/// assert_eq!(pricing.equipment_total(), Money::from_rupees(6_000));
/// assert_eq!(pricing.taxes(), Money::from_rupees(1_170));
/// assert_eq!(pricing.total(), Money::from_rupees(7_670));
/// ```
pub fn compute_breakdown(inputs: &PriceInputs<'_>) -> PricingBreakdown {
    // Preview state: nothing selected yet, or no dates yet. The breakdown
    // collapses to the standalone service charge.
    if inputs.lines.is_empty() || inputs.duration.total_days == 0 {
        return PricingBreakdown {
            equipment_total_paise: 0,
            service_charges_paise: inputs.service_charges.paise(),
            taxes_paise: 0,
            discount_paise: 0,
            total_paise: inputs.service_charges.paise(),
            advance_paise: 0,
            remaining_paise: inputs.service_charges.paise(),
        };
    }

    let mut equipment_total = Money::zero();
    for line in inputs.lines {
        equipment_total += daily_component(line, inputs.duration.total_days);
        if inputs.include_hours {
            equipment_total += hourly_component(line, inputs.duration.total_minutes);
        }
    }

    let subtotal = equipment_total + inputs.service_charges;
    let discount = inputs.discount.clamp_non_negative().min(subtotal);
    let taxable = subtotal - discount;
    let taxes = taxable.calculate_tax(TaxRate::from_bps(GST_RATE_BPS));
    let total = taxable + taxes;

    PricingBreakdown {
        equipment_total_paise: equipment_total.paise(),
        service_charges_paise: inputs.service_charges.paise(),
        taxes_paise: taxes.paise(),
        discount_paise: discount.paise(),
        total_paise: total.paise(),
        advance_paise: 0,
        remaining_paise: total.paise(),
    }
}

/// Daily rental component: `rate × quantity × days`.
///
/// Widened to i128 like the hourly path; the rate ceiling in validation
/// keeps the result inside i64.
fn daily_component(line: &EquipmentLine, total_days: i64) -> Money {
    let paise = line.daily_rate_paise as i128 * line.quantity as i128 * total_days as i128;
    Money::from_paise(paise as i64)
}

/// Hourly add-on component: `rate × 15% × quantity × hours`.
///
/// The hour span arrives in minutes, so the whole product is computed in
/// one i128 expression and divided exactly once:
/// `rate × bps × qty × minutes / (10000 × 60)`, rounded half-up.
fn hourly_component(line: &EquipmentLine, total_minutes: i64) -> Money {
    if total_minutes <= 0 {
        return Money::zero();
    }

    const DENOMINATOR: i128 = 10_000 * 60;
    let numerator = line.daily_rate_paise as i128
        * HOURLY_RATE_BPS as i128
        * line.quantity as i128
        * total_minutes as i128;
    let paise = (numerator + DENOMINATOR / 2) / DENOMINATOR;
    Money::from_paise(paise as i64)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(ref_id: &str, qty: i64, rate_rupees: i64) -> EquipmentLine {
        EquipmentLine {
            equipment_ref_id: ref_id.to_string(),
            quantity: qty,
            daily_rate_paise: Money::from_rupees(rate_rupees).paise(),
        }
    }

    fn days(n: i64) -> RentalDuration {
        RentalDuration {
            total_days: n,
            minutes_per_day: 0,
            total_minutes: 0,
        }
    }

    #[test]
    fn test_daily_rate_times_quantity_times_days() {
        // ₹1,000/day × 2 units × 3 days + ₹500 service
        // taxes = (6000 + 500) × 18% = ₹1,170 → total ₹7,670
        let lines = vec![line("cam-5d", 2, 1_000)];
        let pricing = compute_breakdown(&PriceInputs {
            lines: &lines,
            duration: days(3),
            include_hours: false,
            service_charges: Money::from_rupees(500),
            discount: Money::zero(),
        });

        assert_eq!(pricing.equipment_total(), Money::from_rupees(6_000));
        assert_eq!(pricing.taxes(), Money::from_rupees(1_170));
        assert_eq!(pricing.total(), Money::from_rupees(7_670));
        assert_eq!(pricing.remaining(), Money::from_rupees(7_670));
        assert_eq!(pricing.advance(), Money::zero());
    }

    #[test]
    fn test_hourly_addon() {
        // ₹1,000/day, 1 unit, 2 days, 3 metered hours/day.
        // Hourly: 1000 × 15% × 1 × 6h = ₹900; daily: ₹2,000.
        let lines = vec![line("light-rig", 1, 1_000)];
        let duration = RentalDuration {
            total_days: 2,
            minutes_per_day: 180,
            total_minutes: 360,
        };
        let pricing = compute_breakdown(&PriceInputs {
            lines: &lines,
            duration,
            include_hours: true,
            service_charges: Money::zero(),
            discount: Money::zero(),
        });

        assert_eq!(pricing.equipment_total(), Money::from_rupees(2_900));
    }

    #[test]
    fn test_hourly_addon_ignored_without_flag() {
        let lines = vec![line("light-rig", 1, 1_000)];
        let duration = RentalDuration {
            total_days: 2,
            minutes_per_day: 180,
            total_minutes: 360,
        };
        let pricing = compute_breakdown(&PriceInputs {
            lines: &lines,
            duration,
            include_hours: false,
            service_charges: Money::zero(),
            discount: Money::zero(),
        });

        assert_eq!(pricing.equipment_total(), Money::from_rupees(2_000));
    }

    #[test]
    fn test_discount_applied_before_tax() {
        // subtotal 6500, discount 500 → taxable 6000, taxes 1080, total 7080
        let lines = vec![line("cam-5d", 2, 1_000)];
        let pricing = compute_breakdown(&PriceInputs {
            lines: &lines,
            duration: days(3),
            include_hours: false,
            service_charges: Money::from_rupees(500),
            discount: Money::from_rupees(500),
        });

        assert_eq!(pricing.discount(), Money::from_rupees(500));
        assert_eq!(pricing.taxes(), Money::from_rupees(1_080));
        assert_eq!(pricing.total(), Money::from_rupees(7_080));
    }

    #[test]
    fn test_discount_clamped_to_subtotal() {
        let lines = vec![line("tripod", 1, 100)];
        let pricing = compute_breakdown(&PriceInputs {
            lines: &lines,
            duration: days(1),
            include_hours: false,
            service_charges: Money::zero(),
            discount: Money::from_rupees(9_999),
        });

        assert_eq!(pricing.discount(), Money::from_rupees(100));
        assert_eq!(pricing.total(), Money::zero());
    }

    #[test]
    fn test_preview_collapse_no_lines() {
        let pricing = compute_breakdown(&PriceInputs {
            lines: &[],
            duration: days(3),
            include_hours: false,
            service_charges: Money::from_rupees(500),
            discount: Money::zero(),
        });

        assert_eq!(pricing.equipment_total(), Money::zero());
        assert_eq!(pricing.taxes(), Money::zero());
        assert_eq!(pricing.total(), Money::from_rupees(500));
    }

    #[test]
    fn test_preview_collapse_no_dates() {
        let lines = vec![line("cam-5d", 1, 1_000)];
        let pricing = compute_breakdown(&PriceInputs {
            lines: &lines,
            duration: RentalDuration::empty(),
            include_hours: false,
            service_charges: Money::from_rupees(500),
            discount: Money::zero(),
        });

        assert_eq!(pricing.total(), Money::from_rupees(500));
    }

    #[test]
    fn test_daily_component_at_rate_ceiling() {
        // Worst validation-accepted case: max rate, max quantity, a
        // decade-long range. The product must come out exact, not wrapped.
        let lines = vec![EquipmentLine {
            equipment_ref_id: "cine-package".to_string(),
            quantity: crate::MAX_LINE_QUANTITY,
            daily_rate_paise: crate::MAX_DAILY_RATE_PAISE,
        }];
        let pricing = compute_breakdown(&PriceInputs {
            lines: &lines,
            duration: days(3_650),
            include_hours: false,
            service_charges: Money::zero(),
            discount: Money::zero(),
        });

        let expected = crate::MAX_DAILY_RATE_PAISE * crate::MAX_LINE_QUANTITY * 3_650;
        assert_eq!(pricing.equipment_total_paise, expected);
        assert!(pricing.total_paise > pricing.equipment_total_paise);
    }

    #[test]
    fn test_determinism() {
        let lines = vec![line("cam-5d", 3, 1_234), line("lens-70-200", 1, 567)];
        let duration = RentalDuration {
            total_days: 5,
            minutes_per_day: 150,
            total_minutes: 750,
        };
        let inputs = PriceInputs {
            lines: &lines,
            duration,
            include_hours: true,
            service_charges: Money::from_rupees(500),
            discount: Money::from_rupees(50),
        };

        assert_eq!(compute_breakdown(&inputs), compute_breakdown(&inputs));
    }
}
