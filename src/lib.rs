//! # Recipe Scaling
//!
//! Scales a recipe's ingredient list to a new serving count: free-text or
//! structured ingredient entries are parsed into quantity, unit and name,
//! multiplied by `target / original`, rounded to kitchen-friendly values,
//! re-expressed in the most readable unit and rendered back as display lines.
//!
//! ```rust
//! use recipe_scaling::ingredient_model::Recipe;
//! use recipe_scaling::recipe_scaler::scale_recipe;
//!
//! let recipe = Recipe {
//!     title: Some("Shortbread".to_string()),
//!     servings: 4,
//!     ingredients: vec!["1 cup butter".into(), "2 tbsp sugar".into(), "a pinch of salt".into()],
//! };
//!
//! let scaled = scale_recipe(&recipe, 2).unwrap();
//! assert_eq!(scaled.ingredients, vec!["1/2 cup butter", "1 tbsp sugar", "1 pinch salt"]);
//! ```

pub mod debounce;
pub mod ingredient_formatter;
pub mod ingredient_model;
pub mod ingredient_parser;
pub mod measurement_patterns;
pub mod measurement_types;
pub mod recipe_io;
pub mod recipe_scaler;
pub mod scaling_config;
pub mod scaling_engine;
pub mod scaling_errors;
pub mod unit_conversion;
