//! # Scaling Configuration Module
//!
//! This module defines configuration structures for the scaling engine,
//! including serving bounds, rounding precision, unit promotion thresholds
//! and the debounce window used by interactive callers.

use log::{debug, warn};

// Constants for scaling configuration
pub const DEFAULT_MIN_SERVINGS: u32 = 1;
pub const DEFAULT_MAX_SERVINGS: u32 = 50;
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;
pub const DEFAULT_KITCHEN_FRACTIONS: [f64; 8] =
    [0.0, 0.125, 0.25, 1.0 / 3.0, 0.5, 2.0 / 3.0, 0.75, 1.0];

pub const MIN_SERVINGS_ENV: &str = "RECIPE_SCALING_MIN_SERVINGS";
pub const MAX_SERVINGS_ENV: &str = "RECIPE_SCALING_MAX_SERVINGS";
pub const DEBOUNCE_MS_ENV: &str = "RECIPE_SCALING_DEBOUNCE_MS";

/// Rounding precision per unit class
#[derive(Debug, Clone, PartialEq)]
pub struct RoundingConfig {
    /// Fractional parts a spoon or cup quantity may snap to (must contain 0 and 1)
    pub kitchen_fractions: Vec<f64>,
    /// Decimal places for weights and metric volumes
    pub decimal_places: u32,
    /// Decimal places for unit tokens outside the conversion table
    pub other_decimal_places: u32,
    /// Smallest fraction a count below one rounds to (half an onion, a quarter cabbage)
    pub min_count_fraction: f64,
}

impl Default for RoundingConfig {
    fn default() -> Self {
        Self {
            kitchen_fractions: DEFAULT_KITCHEN_FRACTIONS.to_vec(),
            decimal_places: 1,
            other_decimal_places: 2,
            min_count_fraction: 0.25,
        }
    }
}

/// Unit selection and display thresholds
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizationConfig {
    /// Smallest cup quantity shown in cups rather than tablespoons
    pub cup_threshold: f64,
    /// Maximum distance between a value and a kitchen fraction for it to render as that fraction
    pub fraction_tolerance: f64,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            cup_threshold: 0.25,
            fraction_tolerance: 0.02,
        }
    }
}

/// Configuration structure for recipe scaling
#[derive(Debug, Clone, PartialEq)]
pub struct ScalingConfig {
    /// Smallest accepted target serving count
    pub min_servings: u32,
    /// Largest accepted target serving count
    pub max_servings: u32,
    /// Quiescence window before a debounced rescale runs, in milliseconds
    pub debounce_ms: u64,
    /// Rounding policy
    pub rounding: RoundingConfig,
    /// Unit normalization policy
    pub normalization: NormalizationConfig,
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self {
            min_servings: DEFAULT_MIN_SERVINGS,
            max_servings: DEFAULT_MAX_SERVINGS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            rounding: RoundingConfig::default(),
            normalization: NormalizationConfig::default(),
        }
    }
}

impl ScalingConfig {
    /// Build a configuration from the process environment.
    ///
    /// Unset variables keep their defaults; unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recipe_scaling::scaling_config::ScalingConfig;
    ///
    /// let config = ScalingConfig::from_lookup(|key| match key {
    ///     "RECIPE_SCALING_MAX_SERVINGS" => Some("12".to_string()),
    ///     _ => None,
    /// });
    /// assert_eq!(config.max_servings, 12);
    /// assert_eq!(config.min_servings, 1);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = read_var::<u32, _>(&lookup, MIN_SERVINGS_ENV) {
            config.min_servings = value;
        }
        if let Some(value) = read_var::<u32, _>(&lookup, MAX_SERVINGS_ENV) {
            config.max_servings = value;
        }
        if let Some(value) = read_var::<u64, _>(&lookup, DEBOUNCE_MS_ENV) {
            config.debounce_ms = value;
        }

        if config.min_servings == 0 || config.min_servings > config.max_servings {
            warn!(
                "Ignoring serving bounds {}..={} from environment, using defaults",
                config.min_servings, config.max_servings
            );
            config.min_servings = DEFAULT_MIN_SERVINGS;
            config.max_servings = DEFAULT_MAX_SERVINGS;
        }

        debug!(
            "Scaling configuration: servings {}..={}, debounce {}ms",
            config.min_servings, config.max_servings, config.debounce_ms
        );
        config
    }
}

fn read_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid value '{}' for {}", raw, key);
            None
        }
    }
}
