//! # Measurement Types Module
//!
//! This module defines the unit table shared by the ingredient parser, the scaling
//! engine and the unit normalizer: every unit knows its family, its measurement
//! system, its size relative to the smallest unit of that system, and how it is
//! displayed.

use crate::measurement_patterns::UNIT_ALIASES;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Measurement unit of a parsed ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Unit {
    // Volume units (US customary)
    /// Teaspoons
    Teaspoon,
    /// Tablespoons
    Tablespoon,
    /// Fluid ounces
    FluidOunce,
    /// Cups
    Cup,
    /// Pints
    Pint,
    /// Quarts
    Quart,
    /// Gallons
    Gallon,

    // Volume units (metric)
    /// Milliliters
    Milliliter,
    /// Liters
    Liter,

    // Weight units
    /// Grams
    Gram,
    /// Kilograms
    Kilogram,
    /// Ounces
    Ounce,
    /// Pounds
    Pound,

    // Count units
    /// Individual items; also the sentinel for "no unit detected"
    Piece,
    /// Cloves (garlic)
    Clove,
    /// Slices
    Slice,
    /// Cans
    Can,
    /// Packages
    Package,
    /// Bottles
    Bottle,

    // Vague units
    /// Pinches
    Pinch,
    /// Dashes
    Dash,
    /// "to taste", never scaled
    ToTaste,

    /// A unit token that is kept verbatim but has no conversion family
    Other(String),
}

/// Broad category a unit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitFamily {
    Volume,
    Weight,
    Count,
    Vague,
    Unknown,
}

/// Conversion ladder a convertible unit lives on.
///
/// Conversions never cross ladders, so a quantity entered in tablespoons is never
/// re-expressed in milliliters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementSystem {
    /// tsp, tbsp, fl oz, cup, pint, quart, gallon (base: teaspoon)
    UsVolume,
    /// ml, l (base: milliliter)
    MetricVolume,
    /// g, kg (base: gram)
    MetricWeight,
    /// oz, lb (base: ounce)
    ImperialWeight,
}

static US_VOLUME_LADDER: [Unit; 3] = [Unit::Teaspoon, Unit::Tablespoon, Unit::Cup];
static METRIC_VOLUME_LADDER: [Unit; 2] = [Unit::Milliliter, Unit::Liter];
static METRIC_WEIGHT_LADDER: [Unit; 2] = [Unit::Gram, Unit::Kilogram];
static IMPERIAL_WEIGHT_LADDER: [Unit; 2] = [Unit::Ounce, Unit::Pound];

impl MeasurementSystem {
    /// Units the normalizer may choose from, smallest first
    pub fn ladder(&self) -> &'static [Unit] {
        match self {
            MeasurementSystem::UsVolume => &US_VOLUME_LADDER,
            MeasurementSystem::MetricVolume => &METRIC_VOLUME_LADDER,
            MeasurementSystem::MetricWeight => &METRIC_WEIGHT_LADDER,
            MeasurementSystem::ImperialWeight => &IMPERIAL_WEIGHT_LADDER,
        }
    }
}

impl Unit {
    /// Look up a unit token (any spelling in the vocabulary).
    ///
    /// Returns `None` for tokens outside the vocabulary; callers decide whether
    /// such a token becomes [`Unit::Other`] or part of the ingredient name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recipe_scaling::measurement_types::Unit;
    ///
    /// assert_eq!(Unit::lookup("Tablespoons"), Some(Unit::Tablespoon));
    /// assert_eq!(Unit::lookup("T"), Some(Unit::Tablespoon));
    /// assert_eq!(Unit::lookup("t"), Some(Unit::Teaspoon));
    /// assert_eq!(Unit::lookup("sprig"), None);
    /// ```
    pub fn lookup(token: &str) -> Option<Unit> {
        let token = token.trim();
        // Single-letter spoon abbreviations are case sensitive
        match token {
            "T" | "T." => return Some(Unit::Tablespoon),
            "t" | "t." => return Some(Unit::Teaspoon),
            _ => {}
        }

        let lowered = token.to_lowercase();
        let lowered = lowered.trim_end_matches('.');
        UNIT_ALIASES.get(lowered).cloned()
    }

    /// Resolve an explicit unit string, keeping unknown tokens verbatim.
    ///
    /// Empty strings resolve to the [`Unit::Piece`] sentinel.
    pub fn from_token(token: &str) -> Unit {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Unit::Piece;
        }
        Unit::lookup(trimmed).unwrap_or_else(|| Unit::Other(trimmed.to_string()))
    }

    /// Canonical token, as stored in serialized output
    pub fn token(&self) -> &str {
        match self {
            Unit::Teaspoon => "tsp",
            Unit::Tablespoon => "tbsp",
            Unit::FluidOunce => "fl oz",
            Unit::Cup => "cup",
            Unit::Pint => "pint",
            Unit::Quart => "quart",
            Unit::Gallon => "gallon",
            Unit::Milliliter => "ml",
            Unit::Liter => "l",
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Ounce => "oz",
            Unit::Pound => "lb",
            Unit::Piece => "piece",
            Unit::Clove => "clove",
            Unit::Slice => "slice",
            Unit::Can => "can",
            Unit::Package => "package",
            Unit::Bottle => "bottle",
            Unit::Pinch => "pinch",
            Unit::Dash => "dash",
            Unit::ToTaste => "to taste",
            Unit::Other(token) => token.as_str(),
        }
    }

    /// Name used in a rendered ingredient line.
    ///
    /// Full-word units are pluralized when `quantity` is greater than one;
    /// abbreviations never are. [`Unit::Piece`] renders as an empty string.
    pub fn display_name(&self, quantity: f64) -> String {
        let plural = quantity > 1.0;
        let name = match self {
            Unit::Piece => "",
            Unit::Liter => "L",
            Unit::Cup if plural => "cups",
            Unit::Pint if plural => "pints",
            Unit::Quart if plural => "quarts",
            Unit::Gallon if plural => "gallons",
            Unit::Clove if plural => "cloves",
            Unit::Slice if plural => "slices",
            Unit::Can if plural => "cans",
            Unit::Package if plural => "packages",
            Unit::Bottle if plural => "bottles",
            Unit::Pinch if plural => "pinches",
            Unit::Dash if plural => "dashes",
            other => other.token(),
        };
        name.to_string()
    }

    pub fn family(&self) -> UnitFamily {
        match self {
            Unit::Teaspoon
            | Unit::Tablespoon
            | Unit::FluidOunce
            | Unit::Cup
            | Unit::Pint
            | Unit::Quart
            | Unit::Gallon
            | Unit::Milliliter
            | Unit::Liter => UnitFamily::Volume,
            Unit::Gram | Unit::Kilogram | Unit::Ounce | Unit::Pound => UnitFamily::Weight,
            Unit::Piece | Unit::Clove | Unit::Slice | Unit::Can | Unit::Package | Unit::Bottle => {
                UnitFamily::Count
            }
            Unit::Pinch | Unit::Dash | Unit::ToTaste => UnitFamily::Vague,
            Unit::Other(_) => UnitFamily::Unknown,
        }
    }

    /// Conversion ladder, if the unit is convertible at all
    pub fn system(&self) -> Option<MeasurementSystem> {
        match self {
            Unit::Teaspoon
            | Unit::Tablespoon
            | Unit::FluidOunce
            | Unit::Cup
            | Unit::Pint
            | Unit::Quart
            | Unit::Gallon => Some(MeasurementSystem::UsVolume),
            Unit::Milliliter | Unit::Liter => Some(MeasurementSystem::MetricVolume),
            Unit::Gram | Unit::Kilogram => Some(MeasurementSystem::MetricWeight),
            Unit::Ounce | Unit::Pound => Some(MeasurementSystem::ImperialWeight),
            _ => None,
        }
    }

    /// Size of one of this unit expressed in the base unit of its system
    pub fn base_factor(&self) -> Option<f64> {
        let factor = match self {
            Unit::Teaspoon => 1.0,
            Unit::Tablespoon => 3.0,
            Unit::FluidOunce => 6.0,
            Unit::Cup => 48.0,
            Unit::Pint => 96.0,
            Unit::Quart => 192.0,
            Unit::Gallon => 768.0,
            Unit::Milliliter => 1.0,
            Unit::Liter => 1000.0,
            Unit::Gram => 1.0,
            Unit::Kilogram => 1000.0,
            Unit::Ounce => 1.0,
            Unit::Pound => 16.0,
            _ => return None,
        };
        Some(factor)
    }

    /// Units measured with fractional kitchenware (spoons and cups)
    pub fn is_fraction_friendly(&self) -> bool {
        self.system() == Some(MeasurementSystem::UsVolume) || self.is_count()
    }

    pub fn is_volume(&self) -> bool {
        self.family() == UnitFamily::Volume
    }

    pub fn is_weight(&self) -> bool {
        self.family() == UnitFamily::Weight
    }

    pub fn is_count(&self) -> bool {
        self.family() == UnitFamily::Count
    }

    /// Whether a quantity in this unit changes when the recipe is scaled
    pub fn is_scalable(&self) -> bool {
        !matches!(self, Unit::ToTaste)
    }
}

impl From<String> for Unit {
    fn from(token: String) -> Self {
        Unit::from_token(&token)
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.token().to_string()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}
