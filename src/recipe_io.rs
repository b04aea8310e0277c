//! Recipe documents on disk.
//!
//! A recipe document is the JSON form of [`Recipe`]:
//!
//! ```json
//! {
//!   "title": "Pancakes",
//!   "servings": 4,
//!   "ingredients": ["2 1/2 cups flour", {"name": "milk", "unit": "ml", "amount": 300}]
//! }
//! ```

use crate::ingredient_model::Recipe;
use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Read and parse a recipe document
pub fn load_recipe(path: impl AsRef<Path>) -> Result<Recipe> {
    let path = path.as_ref();
    debug!("Reading recipe from {}", path.display());

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read recipe file {}", path.display()))?;
    let recipe = parse_recipe_json(&contents)
        .with_context(|| format!("Invalid recipe document {}", path.display()))?;

    info!(
        "Loaded recipe {:?} with {} ingredients for {} servings",
        recipe.title.as_deref().unwrap_or("untitled"),
        recipe.ingredients.len(),
        recipe.servings
    );
    Ok(recipe)
}

/// Parse a recipe document from a JSON string
pub fn parse_recipe_json(json: &str) -> Result<Recipe> {
    serde_json::from_str(json).context("Failed to parse recipe JSON")
}

/// Write a recipe document, pretty-printed
pub fn save_recipe(path: impl AsRef<Path>, recipe: &Recipe) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(recipe).context("Failed to serialize recipe")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write recipe file {}", path.display()))?;
    debug!("Saved recipe to {}", path.display());
    Ok(())
}
