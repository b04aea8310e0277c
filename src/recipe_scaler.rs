//! # Recipe Scaler
//!
//! Recipe-level scale operation: validates the requested serving count, computes
//! the scale factor and runs every ingredient through
//! parser → scaling engine → unit normalizer → formatter independently.
//!
//! ## Usage
//!
//! ```rust
//! use recipe_scaling::ingredient_model::Recipe;
//! use recipe_scaling::recipe_scaler::scale_recipe;
//!
//! let recipe = Recipe {
//!     title: None,
//!     servings: 4,
//!     ingredients: vec!["2 cups flour".into(), "3 eggs".into()],
//! };
//!
//! let scaled = scale_recipe(&recipe, 8).unwrap();
//! assert_eq!(scaled.scale_factor, 2.0);
//! assert_eq!(scaled.ingredients, vec!["4 cups flour", "6 eggs"]);
//! ```

use crate::ingredient_formatter::format_ingredient_with;
use crate::ingredient_model::{
    IngredientInput, ParsedIngredient, Recipe, ScaledIngredient, ScaledRecipe, ScalingWarning,
};
use crate::ingredient_parser::parse_ingredient;
use crate::scaling_config::ScalingConfig;
use crate::scaling_engine::{is_identity_factor, round_quantity, scale_quantity};
use crate::scaling_errors::ScalingError;
use crate::unit_conversion::smart_convert_units_with;
use log::{debug, info, warn};

/// Serving counts and the ratio between them for one scaling request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalingContext {
    pub original_servings: u32,
    pub target_servings: u32,
    pub scale_factor: f64,
}

impl ScalingContext {
    /// Validate both serving counts and compute `target / original`.
    ///
    /// # Errors
    ///
    /// - [`ScalingError::InvalidOriginalServings`] when the recipe serves nobody
    /// - [`ScalingError::TargetOutOfRange`] when `target` is outside
    ///   `min_servings..=max_servings`
    pub fn new(
        original_servings: u32,
        target_servings: i64,
        config: &ScalingConfig,
    ) -> Result<Self, ScalingError> {
        if original_servings == 0 {
            return Err(ScalingError::InvalidOriginalServings {
                servings: original_servings,
            });
        }

        let in_range = target_servings >= i64::from(config.min_servings)
            && target_servings <= i64::from(config.max_servings);
        let target = match u32::try_from(target_servings) {
            Ok(target) if in_range => target,
            _ => {
                return Err(ScalingError::TargetOutOfRange {
                    target: target_servings,
                    min: config.min_servings,
                    max: config.max_servings,
                })
            }
        };

        let scale_factor = f64::from(target) / f64::from(original_servings);
        if !scale_factor.is_finite() || scale_factor <= 0.0 {
            return Err(ScalingError::InvalidScaleFactor {
                factor: scale_factor,
            });
        }

        Ok(Self {
            original_servings,
            target_servings: target,
            scale_factor,
        })
    }

    /// Recompute the context for a new target, keeping the original servings
    pub fn retarget(&mut self, target_servings: i64, config: &ScalingConfig) -> Result<(), ScalingError> {
        *self = Self::new(self.original_servings, target_servings, config)?;
        Ok(())
    }
}

/// Scales recipes with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct RecipeScaler {
    config: ScalingConfig,
}

impl RecipeScaler {
    /// Create a scaler with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scaler with custom serving bounds and rounding policy
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recipe_scaling::recipe_scaler::RecipeScaler;
    /// use recipe_scaling::scaling_config::ScalingConfig;
    ///
    /// let scaler = RecipeScaler::with_config(ScalingConfig {
    ///     max_servings: 12,
    ///     ..Default::default()
    /// });
    /// assert_eq!(scaler.config().max_servings, 12);
    /// ```
    pub fn with_config(config: ScalingConfig) -> Self {
        info!(
            "Creating RecipeScaler: servings {}..={}, debounce {}ms",
            config.min_servings, config.max_servings, config.debounce_ms
        );
        Self { config }
    }

    pub fn config(&self) -> &ScalingConfig {
        &self.config
    }

    /// Scale every ingredient of `recipe` to `target_servings`.
    ///
    /// Invalid serving counts are rejected before any ingredient is touched. A
    /// malformed ingredient never aborts the batch: it is returned flagged, with
    /// its source text, and reported in `warnings`.
    pub fn scale_recipe(
        &self,
        recipe: &Recipe,
        target_servings: i64,
    ) -> Result<ScaledRecipe, ScalingError> {
        let context = ScalingContext::new(recipe.servings, target_servings, &self.config)
            .inspect_err(|e| warn!("Rejected scaling request: {}", e))?;

        info!(
            "Scaling {} ingredients from {} to {} servings (factor {:.3})",
            recipe.ingredients.len(),
            context.original_servings,
            context.target_servings,
            context.scale_factor
        );

        let items: Vec<ScaledIngredient> = recipe
            .ingredients
            .iter()
            .map(|input| self.scale_entry(input, context.scale_factor))
            .collect();

        let warnings: Vec<ScalingWarning> = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                item.error.as_ref().map(|error| ScalingWarning {
                    index,
                    original: item.original.describe(),
                    message: error.to_string(),
                })
            })
            .collect();

        if !warnings.is_empty() {
            warn!(
                "{} of {} ingredients could not be parsed",
                warnings.len(),
                items.len()
            );
        }

        Ok(ScaledRecipe {
            servings: context.target_servings,
            original_servings: context.original_servings,
            scale_factor: context.scale_factor,
            ingredients: items.iter().map(|item| item.formatted.clone()).collect(),
            items,
            warnings,
        })
    }

    /// Run one ingredient through the whole pipeline with a validated factor
    pub fn scale_entry(&self, input: &IngredientInput, scale_factor: f64) -> ScaledIngredient {
        let parsed = parse_ingredient(input);
        self.scale_parsed(parsed, scale_factor)
    }

    fn scale_parsed(&self, parsed: ParsedIngredient, scale_factor: f64) -> ScaledIngredient {
        let convertible = parsed.scalable && parsed.error.is_none();

        let (quantity, unit, conversion_error) = if !convertible || is_identity_factor(scale_factor) {
            (parsed.quantity, parsed.unit.clone(), None)
        } else {
            // Pick the unit from the exact amount, then round once in that unit
            let scaled = scale_quantity(&parsed, scale_factor);
            let conversion =
                smart_convert_units_with(scaled.quantity, &scaled.unit, scale_factor, &self.config);
            let quantity = round_quantity(conversion.value, &conversion.unit, &self.config.rounding);
            (quantity, conversion.unit, conversion.error)
        };

        let mut item = ScaledIngredient {
            quantity,
            unit,
            name: parsed.name,
            original: parsed.original,
            scalable: parsed.scalable,
            formatted: String::new(),
            has_error: parsed.error.is_some(),
            error: parsed.error,
            conversion_error,
        };
        item.formatted = format_ingredient_with(&item, true, &self.config.normalization);

        debug!("Scaled '{}' -> '{}'", item.original.describe(), item.formatted);
        item
    }
}

/// Scale `recipe` to `target_servings` with the default configuration
pub fn scale_recipe(recipe: &Recipe, target_servings: i64) -> Result<ScaledRecipe, ScalingError> {
    RecipeScaler::new().scale_recipe(recipe, target_servings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement_types::Unit;

    fn recipe(servings: u32, ingredients: &[&str]) -> Recipe {
        Recipe {
            title: None,
            servings,
            ingredients: ingredients.iter().map(|i| IngredientInput::from(*i)).collect(),
        }
    }

    #[test]
    fn test_context_factor() {
        let config = ScalingConfig::default();
        let context = ScalingContext::new(4, 10, &config).unwrap();
        assert_eq!(context.scale_factor, 2.5);
        assert_eq!(context.target_servings, 10);
    }

    #[test]
    fn test_context_rejects_bad_servings() {
        let config = ScalingConfig::default();
        assert_eq!(
            ScalingContext::new(0, 2, &config),
            Err(ScalingError::InvalidOriginalServings { servings: 0 })
        );
        for target in [0, -3, 51, i64::MAX] {
            assert_eq!(
                ScalingContext::new(4, target, &config),
                Err(ScalingError::TargetOutOfRange { target, min: 1, max: 50 })
            );
        }
    }

    #[test]
    fn test_context_retarget() {
        let config = ScalingConfig::default();
        let mut context = ScalingContext::new(4, 4, &config).unwrap();
        context.retarget(2, &config).unwrap();
        assert_eq!(context.scale_factor, 0.5);
        assert!(context.retarget(0, &config).is_err());
        assert_eq!(context.target_servings, 2);
    }

    #[test]
    fn test_scale_recipe_basic() {
        let scaled = scale_recipe(&recipe(2, &["1 cup milk", "2 tbsp sugar", "1 egg"]), 4).unwrap();
        assert_eq!(scaled.servings, 4);
        assert_eq!(scaled.original_servings, 2);
        assert_eq!(scaled.ingredients, vec!["2 cups milk", "1/4 cup sugar", "2 egg"]);
        assert!(!scaled.has_warnings());
    }

    #[test]
    fn test_scale_recipe_keeps_unscalable_entries() {
        let scaled = scale_recipe(&recipe(4, &["salt to taste", "2 cups rice"]), 8).unwrap();
        assert_eq!(scaled.ingredients, vec!["salt to taste", "4 cups rice"]);
        assert!(scaled.warnings.is_empty());
    }

    #[test]
    fn test_scale_recipe_reports_conversion_errors_without_warning() {
        let scaled = scale_recipe(&recipe(1, &["2 sprigs thyme"]), 2).unwrap();
        assert_eq!(scaled.ingredients, vec!["4 sprigs thyme"]);
        assert_eq!(scaled.items[0].unit, Unit::Other("sprigs".to_string()));
        assert!(scaled.items[0].conversion_error.is_some());
        assert!(!scaled.items[0].has_error);
        assert!(scaled.warnings.is_empty());
    }

    #[test]
    fn test_scale_entry_rounds_in_final_unit() {
        let scaler = RecipeScaler::new();
        let scaled = scaler.scale_entry(&"1 kg flour".into(), 1.0 / 3.0);
        assert_eq!((scaled.quantity, &scaled.unit), (333.3, &Unit::Gram));

        let scaled = scaler.scale_entry(&"1/4 cup oil".into(), 0.125);
        assert_eq!(scaled.formatted, "1 1/2 tsp oil");
    }

    #[test]
    fn test_scale_entry_identity_keeps_quantity() {
        let scaled = RecipeScaler::new().scale_entry(&"1.25 kg potatoes".into(), 1.0);
        assert_eq!(scaled.quantity, 1.25);
        assert_eq!(scaled.formatted, "1.25 kg potatoes");
    }

    #[test]
    fn test_custom_bounds() {
        let scaler = RecipeScaler::with_config(ScalingConfig {
            max_servings: 6,
            ..Default::default()
        });
        let recipe = recipe(2, &["1 cup flour"]);
        assert!(scaler.scale_recipe(&recipe, 6).is_ok());
        assert_eq!(
            scaler.scale_recipe(&recipe, 7),
            Err(ScalingError::TargetOutOfRange { target: 7, min: 1, max: 6 })
        );
    }
}
