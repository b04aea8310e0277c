//! # Unit Conversion Module
//!
//! Re-expresses a scaled quantity in the unit of its ladder that reads best:
//! 0.125 cup becomes 2 tbsp, 20 tbsp becomes 1 1/4 cups, 1500 g becomes 1.5 kg.

use crate::measurement_types::{Unit, UnitFamily};
use crate::scaling_config::ScalingConfig;
use crate::scaling_engine::{is_identity_factor, round_quantity};
use crate::scaling_errors::ConversionError;
use log::{debug, warn};

const THRESHOLD_EPSILON: f64 = 1e-9;

/// Outcome of a unit selection. On error, `value` and `unit` are the input unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub value: f64,
    pub unit: Unit,
    pub error: Option<ConversionError>,
}

impl Conversion {
    fn unchanged(value: f64, unit: &Unit) -> Self {
        Self {
            value,
            unit: unit.clone(),
            error: None,
        }
    }

    fn failed(value: f64, unit: &Unit, error: ConversionError) -> Self {
        warn!("Keeping {} {} as is: {}", value, unit, error);
        Self {
            value,
            unit: unit.clone(),
            error: Some(error),
        }
    }
}

/// Pick the best unit for `quantity` with the default configuration
///
/// # Examples
///
/// ```rust
/// use recipe_scaling::measurement_types::Unit;
/// use recipe_scaling::unit_conversion::smart_convert_units;
///
/// let converted = smart_convert_units(16.0, &Unit::Tablespoon, 16.0);
/// assert_eq!(converted.value, 1.0);
/// assert_eq!(converted.unit, Unit::Cup);
/// ```
pub fn smart_convert_units(quantity: f64, unit: &Unit, context_factor: f64) -> Conversion {
    smart_convert_units_with(quantity, unit, context_factor, &ScalingConfig::default())
}

/// Pick the best unit for `quantity`.
///
/// `context_factor` is the scale factor that produced the quantity; at a factor of
/// one the recipe author's unit choice is kept. Otherwise the largest unit of the
/// ladder whose value stays at or above one is chosen (cups accept down to
/// `cup_threshold`), and the value is rounded for that unit.
pub fn smart_convert_units_with(
    quantity: f64,
    unit: &Unit,
    context_factor: f64,
    config: &ScalingConfig,
) -> Conversion {
    match unit.family() {
        UnitFamily::Count | UnitFamily::Vague => return Conversion::unchanged(quantity, unit),
        UnitFamily::Unknown => {
            return Conversion::failed(
                quantity,
                unit,
                ConversionError::UnknownUnit(unit.token().to_string()),
            )
        }
        UnitFamily::Volume | UnitFamily::Weight => {}
    }

    if !quantity.is_finite() || quantity <= 0.0 {
        return Conversion::failed(
            quantity,
            unit,
            ConversionError::NotConvertible(format!("{quantity} is not a positive amount")),
        );
    }

    if is_identity_factor(context_factor) {
        return Conversion::unchanged(quantity, unit);
    }

    let (Some(system), Some(factor)) = (unit.system(), unit.base_factor()) else {
        return Conversion::failed(
            quantity,
            unit,
            ConversionError::UnknownUnit(unit.token().to_string()),
        );
    };

    let ladder = system.ladder();
    if !ladder.contains(unit) {
        // Pints, quarts and the like stay in the unit the author chose
        return Conversion::unchanged(quantity, unit);
    }

    let base = quantity * factor;
    let chosen = ladder
        .iter()
        .rev()
        .find(|candidate| {
            let value = candidate_value(base, candidate);
            value + THRESHOLD_EPSILON >= promotion_threshold(candidate, config)
        })
        .unwrap_or(&ladder[0]);

    let value = round_quantity(
        candidate_value(base, chosen),
        chosen,
        &config.rounding,
    );

    if chosen != unit {
        debug!("Converted {} {} -> {} {}", quantity, unit, value, chosen);
    }

    Conversion {
        value,
        unit: chosen.clone(),
        error: None,
    }
}

fn candidate_value(base: f64, candidate: &Unit) -> f64 {
    base / candidate.base_factor().unwrap_or(1.0)
}

/// Smallest value at which a unit is preferred over the next smaller one
fn promotion_threshold(unit: &Unit, config: &ScalingConfig) -> f64 {
    match unit {
        Unit::Cup => config.normalization.cup_threshold,
        _ => 1.0,
    }
}
