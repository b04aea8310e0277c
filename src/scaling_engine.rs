//! # Scaling Engine
//!
//! Multiplies a parsed quantity by a scale factor and rounds the result to a
//! precision that makes sense for its unit. The unit itself is left alone; picking
//! a better unit is the normalizer's job.

use crate::ingredient_model::{ParsedIngredient, ScaledQuantity};
use crate::measurement_types::{MeasurementSystem, Unit, UnitFamily};
use crate::scaling_config::RoundingConfig;
use log::trace;

/// How a quantity in a given unit is rounded
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoundingClass {
    /// Nearest kitchen fraction (spoons and cups)
    KitchenFraction,
    /// Whole items; values below one snap to quarters
    WholeCount,
    /// Fixed number of decimal places
    Decimal(u32),
    /// Whole pinches and dashes, at least one
    AtLeastOne,
    /// Left as is
    Unchanged,
}

impl RoundingClass {
    pub fn for_unit(unit: &Unit, config: &RoundingConfig) -> Self {
        match unit.family() {
            UnitFamily::Volume if unit.system() == Some(MeasurementSystem::UsVolume) => {
                RoundingClass::KitchenFraction
            }
            UnitFamily::Volume | UnitFamily::Weight => RoundingClass::Decimal(config.decimal_places),
            UnitFamily::Count => RoundingClass::WholeCount,
            UnitFamily::Vague if unit.is_scalable() => RoundingClass::AtLeastOne,
            UnitFamily::Vague => RoundingClass::Unchanged,
            UnitFamily::Unknown => RoundingClass::Decimal(config.other_decimal_places),
        }
    }
}

/// Scale a parsed ingredient with the default rounding policy
///
/// # Examples
///
/// ```rust
/// use recipe_scaling::ingredient_parser::parse_ingredient_text;
/// use recipe_scaling::scaling_engine::scale_ingredient;
/// use recipe_scaling::measurement_types::Unit;
///
/// let parsed = parse_ingredient_text("2 cups flour").unwrap();
/// let scaled = scale_ingredient(&parsed, 1.5);
/// assert_eq!(scaled.quantity, 3.0);
/// assert_eq!(scaled.unit, Unit::Cup);
/// ```
pub fn scale_ingredient(parsed: &ParsedIngredient, scale_factor: f64) -> ScaledQuantity {
    scale_ingredient_with(parsed, scale_factor, &RoundingConfig::default())
}

/// Factors this close to one leave quantities untouched
pub const IDENTITY_EPSILON: f64 = 1e-9;

pub fn is_identity_factor(scale_factor: f64) -> bool {
    (scale_factor - 1.0).abs() < IDENTITY_EPSILON
}

/// Scale a parsed ingredient.
///
/// `scale_factor` must be finite and positive; the orchestrator rejects anything
/// else before calling in. Unscalable and failed entries keep their quantity, and
/// a factor of one returns the parsed quantity without rounding.
pub fn scale_ingredient_with(
    parsed: &ParsedIngredient,
    scale_factor: f64,
    config: &RoundingConfig,
) -> ScaledQuantity {
    let scaled = scale_quantity(parsed, scale_factor);
    if !parsed.scalable || parsed.error.is_some() || is_identity_factor(scale_factor) {
        return scaled;
    }

    let quantity = round_quantity(scaled.quantity, &scaled.unit, config);
    trace!(
        "Scaled {} {} x{} -> {} (rounded {})",
        parsed.quantity,
        parsed.unit,
        scale_factor,
        scaled.quantity,
        quantity
    );

    ScaledQuantity {
        quantity,
        unit: scaled.unit,
    }
}

/// Multiply without rounding.
///
/// Used when the unit may still change: rounding belongs to the unit the
/// quantity is finally shown in.
pub fn scale_quantity(parsed: &ParsedIngredient, scale_factor: f64) -> ScaledQuantity {
    let quantity = if parsed.scalable && parsed.error.is_none() {
        parsed.quantity * scale_factor
    } else {
        parsed.quantity
    };

    ScaledQuantity {
        quantity,
        unit: parsed.unit.clone(),
    }
}

/// Round a quantity according to its unit's [`RoundingClass`].
///
/// A positive quantity never rounds down to zero.
pub fn round_quantity(value: f64, unit: &Unit, config: &RoundingConfig) -> f64 {
    match RoundingClass::for_unit(unit, config) {
        RoundingClass::KitchenFraction => snap_to_fractions(value, &config.kitchen_fractions),
        RoundingClass::WholeCount => {
            if value >= 1.0 {
                value.round()
            } else {
                let quarters = (value * 4.0).round() / 4.0;
                quarters.max(config.min_count_fraction)
            }
        }
        RoundingClass::Decimal(places) => {
            let rounded = round_to_places(value, places);
            if rounded <= 0.0 && value > 0.0 {
                1.0 / 10f64.powi(places as i32)
            } else {
                rounded
            }
        }
        RoundingClass::AtLeastOne => value.round().max(1.0),
        RoundingClass::Unchanged => value,
    }
}

/// Snap the fractional part of `value` to the nearest entry of `fractions`.
///
/// Ties go to the larger fraction. Positive values below the smallest non-zero
/// fraction snap up to it.
pub fn snap_to_fractions(value: f64, fractions: &[f64]) -> f64 {
    let whole = value.floor();
    let part = value - whole;

    let mut best = part;
    let mut best_distance = f64::INFINITY;
    for &fraction in fractions {
        let distance = (part - fraction).abs();
        if distance <= best_distance {
            best = fraction;
            best_distance = distance;
        }
    }

    let snapped = whole + best;
    if snapped <= 0.0 && value > 0.0 {
        fractions
            .iter()
            .copied()
            .filter(|f| *f > 0.0)
            .fold(f64::INFINITY, f64::min)
    } else {
        snapped
    }
}

pub fn round_to_places(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
