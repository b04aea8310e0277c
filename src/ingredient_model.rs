//! # Ingredient and Recipe Data Model
//!
//! This module defines the data structures flowing through the scaling pipeline:
//! the raw ingredient entries a caller supplies, the structured form the parser
//! produces, and the scaled result handed back for display.
//!
//! ## Core Concepts
//!
//! - **IngredientInput**: a free-text line or a structured `{name, unit, amount}` object
//! - **ParsedIngredient**: quantity, unit and name extracted from one entry
//! - **ScaledIngredient**: a parsed ingredient after scaling, conversion and formatting
//! - **ScaledRecipe**: the display list, the applied factor and per-ingredient warnings
//!
//! ## Usage
//!
//! ```rust
//! use recipe_scaling::ingredient_model::{IngredientInput, Recipe};
//!
//! let recipe: Recipe = serde_json::from_str(r#"{
//!     "servings": 4,
//!     "ingredients": [
//!         "2 1/2 cups flour",
//!         {"name": "butter", "unit": "tbsp", "amount": "3"}
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(recipe.ingredients.len(), 2);
//! assert!(matches!(recipe.ingredients[1], IngredientInput::Structured(_)));
//! ```

use crate::measurement_types::Unit;
use crate::scaling_errors::{ConversionError, ParseError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One ingredient entry as supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IngredientInput {
    /// Free text, e.g. "2 1/2 cups flour"
    Text(String),
    /// Structured object, e.g. from a generated recipe
    Structured(StructuredIngredient),
    /// Any other JSON value; kept so one bad entry does not sink the recipe
    Invalid(serde_json::Value),
}

/// Ingredient that already carries explicit fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredIngredient {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
}

/// Amount field of a structured ingredient; generators emit both numbers and strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

/// Structured form of one ingredient entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIngredient {
    /// Numeric amount (range midpoint for ranges)
    pub quantity: f64,
    /// Normalized unit; [`Unit::Piece`] when no unit was detected
    pub unit: Unit,
    /// Remaining descriptive text
    pub name: String,
    /// The untouched source entry
    pub original: IngredientInput,
    /// Both ends of a range quantity ("1-2 tsp")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<(f64, f64)>,
    /// False for entries without a quantity ("salt to taste")
    pub scalable: bool,
    /// Set when parsing failed and the fields hold fallback values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ParseError>,
}

/// Quantity and unit after scaling, before unit selection
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledQuantity {
    pub quantity: f64,
    pub unit: Unit,
}

/// Ingredient ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledIngredient {
    pub quantity: f64,
    pub unit: Unit,
    pub name: String,
    pub original: IngredientInput,
    pub scalable: bool,
    /// Human-readable line, e.g. "1 1/4 cups flour"
    pub formatted: String,
    /// Mirrors the parse stage: true when `error` is set
    pub has_error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ParseError>,
    /// Unit normalization problem; the quantity was kept in its original unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_error: Option<ConversionError>,
}

/// Recipe as supplied by the UI layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub servings: u32,
    pub ingredients: Vec<IngredientInput>,
}

/// Degraded ingredient reported next to the scaled list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingWarning {
    /// Position of the ingredient in the recipe
    pub index: usize,
    /// Best-effort text of the source entry
    pub original: String,
    pub message: String,
}

/// Result of scaling a whole recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledRecipe {
    /// Target serving count
    pub servings: u32,
    pub original_servings: u32,
    pub scale_factor: f64,
    /// Display lines, one per input ingredient, in input order
    pub ingredients: Vec<String>,
    /// Full per-ingredient results, aligned with `ingredients`
    pub items: Vec<ScaledIngredient>,
    pub warnings: Vec<ScalingWarning>,
}

impl IngredientInput {
    /// Best-effort one-line description of the entry
    pub fn describe(&self) -> String {
        match self {
            IngredientInput::Text(text) => text.split_whitespace().collect::<Vec<_>>().join(" "),
            IngredientInput::Structured(structured) => structured.to_string(),
            IngredientInput::Invalid(value) => value.to_string(),
        }
    }
}

impl From<&str> for IngredientInput {
    fn from(text: &str) -> Self {
        IngredientInput::Text(text.to_string())
    }
}

impl From<String> for IngredientInput {
    fn from(text: String) -> Self {
        IngredientInput::Text(text)
    }
}

impl From<StructuredIngredient> for IngredientInput {
    fn from(structured: StructuredIngredient) -> Self {
        IngredientInput::Structured(structured)
    }
}

impl StructuredIngredient {
    pub fn new(name: &str, unit: Option<&str>, amount: Option<Amount>) -> Self {
        Self {
            name: name.to_string(),
            unit: unit.map(str::to_string),
            amount,
        }
    }
}

impl fmt::Display for StructuredIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        match &self.amount {
            Some(Amount::Number(n)) => parts.push(n.to_string()),
            Some(Amount::Text(t)) if !t.trim().is_empty() => parts.push(t.trim().to_string()),
            _ => {}
        }
        if let Some(unit) = self.unit.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            parts.push(unit.to_string());
        }
        if !self.name.trim().is_empty() {
            parts.push(self.name.trim().to_string());
        }
        write!(f, "{}", parts.join(" "))
    }
}

impl ParsedIngredient {
    /// Fallback entry for a failed parse: one unitless, unscalable piece named after the source
    pub fn fallback(original: IngredientInput, error: ParseError) -> Self {
        let name = original.describe();
        Self {
            quantity: 1.0,
            unit: Unit::Piece,
            name,
            original,
            range: None,
            scalable: false,
            error: Some(error),
        }
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

impl ScaledRecipe {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

impl fmt::Display for ScaledIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formatted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_deserializes_both_shapes() {
        let inputs: Vec<IngredientInput> = serde_json::from_str(
            r#"["3 eggs", {"name": "milk", "unit": "cup", "amount": 1.5}, {"name": "salt"}]"#,
        )
        .unwrap();

        assert_eq!(inputs[0], IngredientInput::Text("3 eggs".to_string()));
        assert_eq!(
            inputs[1],
            IngredientInput::Structured(StructuredIngredient::new(
                "milk",
                Some("cup"),
                Some(Amount::Number(1.5))
            ))
        );
        assert_eq!(
            inputs[2],
            IngredientInput::Structured(StructuredIngredient::new("salt", None, None))
        );
    }

    #[test]
    fn test_unreadable_entry_keeps_its_neighbours() {
        let recipe: Recipe = serde_json::from_str(
            r#"{"servings": 2, "ingredients": ["1 cup flour", {"name": 5}, 7]}"#,
        )
        .unwrap();

        assert_eq!(recipe.ingredients.len(), 3);
        assert_eq!(recipe.ingredients[0], IngredientInput::from("1 cup flour"));
        assert_eq!(
            recipe.ingredients[1],
            IngredientInput::Invalid(serde_json::json!({"name": 5}))
        );
        assert_eq!(recipe.ingredients[2].describe(), "7");
    }

    #[test]
    fn test_describe() {
        assert_eq!(IngredientInput::from("  2   cups\tflour ").describe(), "2 cups flour");
        let structured = StructuredIngredient::new("sugar", Some("tbsp"), Some(Amount::Text("1/2".into())));
        assert_eq!(IngredientInput::from(structured).describe(), "1/2 tbsp sugar");
    }

    #[test]
    fn test_fallback_entry() {
        let parsed = ParsedIngredient::fallback(IngredientInput::from("???"), ParseError::Empty);
        assert_eq!(parsed.quantity, 1.0);
        assert_eq!(parsed.unit, Unit::Piece);
        assert_eq!(parsed.name, "???");
        assert!(!parsed.scalable);
        assert!(parsed.has_error());
    }

    #[test]
    fn test_recipe_title_is_optional() {
        let recipe: Recipe =
            serde_json::from_str(r#"{"servings": 2, "ingredients": ["1 egg"]}"#).unwrap();
        assert_eq!(recipe.title, None);
        assert_eq!(recipe.servings, 2);
    }
}
