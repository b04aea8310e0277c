#[cfg(test)]
mod tests {
    use recipe_scaling::ingredient_model::{Amount, IngredientInput, Recipe, StructuredIngredient};
    use recipe_scaling::recipe_io::{load_recipe, save_recipe};
    use recipe_scaling::recipe_scaler::scale_recipe;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_recipe_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("soup.json");
        fs::write(
            &path,
            r#"{
                "title": "Tomato soup",
                "servings": 2,
                "ingredients": [
                    "1 kg tomatoes",
                    "2 cloves garlic",
                    {"name": "stock", "unit": "ml", "amount": 750},
                    "salt to taste"
                ]
            }"#,
        )
        .unwrap();

        let recipe = load_recipe(&path).unwrap();
        assert_eq!(recipe.title.as_deref(), Some("Tomato soup"));
        assert_eq!(recipe.servings, 2);
        assert_eq!(recipe.ingredients.len(), 4);

        let scaled = scale_recipe(&recipe, 4).unwrap();
        assert_eq!(
            scaled.ingredients,
            vec!["2 kg tomatoes", "4 cloves garlic", "1.5 L stock", "salt to taste"]
        );
    }

    #[test]
    fn test_unreadable_entries_are_flagged_not_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(
            &path,
            r#"{"servings": 2, "ingredients": ["1 cup flour", {"name": 5}, 7]}"#,
        )
        .unwrap();

        let recipe = load_recipe(&path).unwrap();
        let scaled = scale_recipe(&recipe, 4).unwrap();

        assert_eq!(scaled.ingredients[0], "2 cups flour");
        assert!(!scaled.items[0].has_error);
        assert!(scaled.items[1].has_error);
        assert!(scaled.items[2].has_error);
        assert_eq!(scaled.warnings.len(), 2);
        assert_eq!(scaled.warnings[0].index, 1);
        assert_eq!(scaled.warnings[1].original, "7");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        let recipe = Recipe {
            title: Some("Cookies".to_string()),
            servings: 12,
            ingredients: vec![
                IngredientInput::from("1 cup butter"),
                StructuredIngredient::new("chocolate chips", Some("g"), Some(Amount::Number(200.0)))
                    .into(),
            ],
        };

        save_recipe(&path, &recipe).unwrap();
        assert_eq!(load_recipe(&path).unwrap(), recipe);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let error = load_recipe(&path).unwrap_err();
        assert!(error.to_string().contains("missing.json"));
    }

    #[test]
    fn test_invalid_document_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let error = load_recipe(&path).unwrap_err();
        assert!(error.to_string().contains("broken.json"));
        assert!(format!("{:#}", error).contains("Failed to parse recipe JSON"));
    }
}
