//! # Ingredient Formatter
//!
//! Renders scaled ingredients as display lines ("1 1/4 cups flour", "3 eggs") and
//! the applied scale factor as a badge ("2.5x").

use crate::ingredient_model::ScaledIngredient;
use crate::measurement_types::Unit;
use crate::scaling_config::NormalizationConfig;

/// Fractions a spoon or cup quantity is rendered with, in display order
pub const DISPLAY_FRACTIONS: &[(f64, &str)] = &[
    (0.125, "1/8"),
    (0.25, "1/4"),
    (1.0 / 3.0, "1/3"),
    (0.5, "1/2"),
    (2.0 / 3.0, "2/3"),
    (0.75, "3/4"),
];

/// Render a scaled ingredient with the default display tolerances.
///
/// With `include_original_name` the parsed name is appended verbatim; without it
/// only the amount and unit are rendered. Failed entries render their source text
/// and unscalable entries their name.
///
/// # Examples
///
/// ```rust
/// use recipe_scaling::ingredient_formatter::format_ingredient;
/// use recipe_scaling::recipe_scaler::RecipeScaler;
///
/// let scaled = RecipeScaler::new().scale_entry(&"2 1/2 cups flour".into(), 0.5);
/// assert_eq!(format_ingredient(&scaled, true), "1 1/4 cups flour");
/// assert_eq!(format_ingredient(&scaled, false), "1 1/4 cups");
/// ```
pub fn format_ingredient(scaled: &ScaledIngredient, include_original_name: bool) -> String {
    format_ingredient_with(scaled, include_original_name, &NormalizationConfig::default())
}

pub fn format_ingredient_with(
    scaled: &ScaledIngredient,
    include_original_name: bool,
    config: &NormalizationConfig,
) -> String {
    if scaled.has_error {
        return scaled.original.describe();
    }
    if scaled.unit == Unit::ToTaste {
        return format!("{} to taste", scaled.name);
    }
    if !scaled.scalable {
        return scaled.name.clone();
    }

    let name = include_original_name.then_some(scaled.name.as_str());
    format_line(scaled.quantity, &scaled.unit, name, config)
}

/// Join amount, unit and name, skipping the unit for unitless entries
pub fn format_line(
    quantity: f64,
    unit: &Unit,
    name: Option<&str>,
    config: &NormalizationConfig,
) -> String {
    let mut parts = vec![format_quantity(quantity, unit, config)];

    let unit_name = unit.display_name(quantity);
    if !unit_name.is_empty() {
        parts.push(unit_name);
    }
    if let Some(name) = name.filter(|n| !n.is_empty()) {
        parts.push(name.to_string());
    }

    parts.join(" ")
}

/// Render a quantity: kitchen fractions for spoons, cups and counts, decimals otherwise
pub fn format_quantity(quantity: f64, unit: &Unit, config: &NormalizationConfig) -> String {
    if unit.is_fraction_friendly() {
        format_fraction(quantity, config.fraction_tolerance)
    } else {
        format_decimal(quantity, 2)
    }
}

/// Render `value` as a whole number, a kitchen fraction or a mixed number.
///
/// Values that are not within `tolerance` of a fraction in [`DISPLAY_FRACTIONS`]
/// fall back to a decimal.
///
/// # Examples
///
/// ```rust
/// use recipe_scaling::ingredient_formatter::format_fraction;
///
/// assert_eq!(format_fraction(2.5, 0.02), "2 1/2");
/// assert_eq!(format_fraction(0.3333, 0.02), "1/3");
/// assert_eq!(format_fraction(3.0, 0.02), "3");
/// assert_eq!(format_fraction(1.4, 0.02), "1.4");
/// ```
pub fn format_fraction(value: f64, tolerance: f64) -> String {
    let whole = value.floor();
    let part = value - whole;

    if part < tolerance {
        return format_whole(whole);
    }
    if 1.0 - part < tolerance {
        return format_whole(whole + 1.0);
    }

    for (fraction, label) in DISPLAY_FRACTIONS {
        if (part - fraction).abs() < tolerance {
            return if whole == 0.0 {
                label.to_string()
            } else {
                format!("{} {}", format_whole(whole), label)
            };
        }
    }

    format_decimal(value, 2)
}

/// Render `value` with at most `max_places` decimals and no trailing zeros
pub fn format_decimal(value: f64, max_places: usize) -> String {
    let text = format!("{:.*}", max_places, value);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

/// Badge text for a scale factor
///
/// # Examples
///
/// ```rust
/// use recipe_scaling::ingredient_formatter::format_scale_factor;
///
/// assert_eq!(format_scale_factor(2.5), "2.5x");
/// assert_eq!(format_scale_factor(1.0), "1x");
/// assert_eq!(format_scale_factor(10.0 / 3.0), "3.33x");
/// ```
pub fn format_scale_factor(scale_factor: f64) -> String {
    format!("{}x", format_decimal(scale_factor, 2))
}

fn format_whole(value: f64) -> String {
    format!("{}", value as i64)
}
