use anyhow::{Context, Result};
use clap::Parser;
use recipe_scaling::ingredient_formatter::format_scale_factor;
use recipe_scaling::ingredient_model::ScaledRecipe;
use recipe_scaling::recipe_io::load_recipe;
use recipe_scaling::recipe_scaler::RecipeScaler;
use recipe_scaling::scaling_config::ScalingConfig;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "recipe-scale",
    about = "Scale a recipe's ingredients to a new serving count",
    long_about = "Read a recipe JSON document, scale every ingredient to the requested servings and print the result"
)]
struct Cli {
    /// Recipe JSON document
    recipe: PathBuf,

    /// Target number of servings
    #[arg(long, short = 's', allow_negative_numbers = true)]
    servings: i64,

    /// Print the full scaled recipe as JSON
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging(cli.json_logs);

    let config = ScalingConfig::from_env();
    info!(
        "Starting recipe-scale with servings {}..={}",
        config.min_servings, config.max_servings
    );

    let recipe = load_recipe(&cli.recipe)?;
    let scaler = RecipeScaler::with_config(config);
    let scaled = scaler
        .scale_recipe(&recipe, cli.servings)
        .with_context(|| format!("Cannot scale {}", cli.recipe.display()))?;

    if cli.json {
        let json = serde_json::to_string_pretty(&scaled).context("Failed to serialize result")?;
        println!("{json}");
    } else {
        print_recipe(recipe.title.as_deref(), &scaled);
    }

    Ok(())
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_recipe(title: Option<&str>, scaled: &ScaledRecipe) {
    if let Some(title) = title {
        println!("{title}");
    }
    println!(
        "{} servings ({} from {})",
        scaled.servings,
        format_scale_factor(scaled.scale_factor),
        scaled.original_servings
    );
    println!();

    for line in &scaled.ingredients {
        println!("- {line}");
    }

    if scaled.has_warnings() {
        println!();
        for warning in &scaled.warnings {
            println!("⚠ {}: {}", warning.original, warning.message);
        }
    }
}
