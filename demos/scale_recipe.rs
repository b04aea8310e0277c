//! Scales a small recipe directly and through the debounced scaler.
//!
//! Run with `cargo run --example scale_recipe`.

use recipe_scaling::debounce::DebouncedScaler;
use recipe_scaling::ingredient_formatter::format_scale_factor;
use recipe_scaling::ingredient_model::{Amount, Recipe, StructuredIngredient};
use recipe_scaling::recipe_scaler::RecipeScaler;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let recipe = Recipe {
        title: Some("Pancakes".to_string()),
        servings: 4,
        ingredients: vec![
            "2 1/2 cups flour".into(),
            "2 tbsp sugar".into(),
            "1½ tsp baking powder".into(),
            "2 eggs".into(),
            StructuredIngredient::new("milk", Some("ml"), Some(Amount::Number(300.0))).into(),
            "a pinch of salt".into(),
            "butter for the pan".into(),
        ],
    };

    let scaler = RecipeScaler::new();
    for target in [2, 6, 12] {
        let scaled = scaler.scale_recipe(&recipe, target)?;
        println!("{} servings ({})", scaled.servings, format_scale_factor(scaled.scale_factor));
        for line in &scaled.ingredients {
            println!("  {line}");
        }
    }

    // A burst of stepper clicks only produces one rescale
    let (debounced, mut results) = DebouncedScaler::new(recipe, scaler);
    for target in 5..=9 {
        debounced.request(target);
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    results.changed().await?;
    if let Some(Ok(scaled)) = results.borrow().as_ref() {
        println!("Settled on {} servings", scaled.servings);
    }

    Ok(())
}
