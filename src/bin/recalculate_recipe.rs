//! Simple utility to recalculate recipe nutrition from a JSON file
//! Usage: cargo run --bin recalculate_recipe -- <recipe.json> [servings]
//!
//! The file holds either an array of `{name, nutrition}` ingredients or an
//! object `{servings, ingredients}`. A servings argument overrides the file.

use serde::Deserialize;

use nve::models::RecipeIngredient;
use nve::tools::nutrition::calculate_recipe_nutrition;

#[derive(Deserialize)]
#[serde(untagged)]
enum RecipeFile {
    Ingredients(Vec<RecipeIngredient>),
    Recipe {
        #[serde(default)]
        servings: Option<f64>,
        ingredients: Vec<RecipeIngredient>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let Some(path) = args.get(1) else {
        eprintln!("Usage: recalculate_recipe <recipe.json> [servings]");
        std::process::exit(2);
    };

    let contents = std::fs::read_to_string(path)?;
    let (file_servings, ingredients) = match serde_json::from_str::<RecipeFile>(&contents)? {
        RecipeFile::Ingredients(ingredients) => (None, ingredients),
        RecipeFile::Recipe { servings, ingredients } => (servings, ingredients),
    };

    let servings = match args.get(2) {
        Some(raw) => raw.parse::<f64>()?,
        None => file_servings.unwrap_or(1.0),
    };

    let recipe = calculate_recipe_nutrition(&ingredients, servings)?;

    eprintln!("Recipe: {}", path);
    eprintln!("  Ingredients: {} ({} without data)", recipe.ingredient_count, recipe.ingredients_without_data.len());
    for name in &recipe.ingredients_without_data {
        eprintln!("    - {}", name);
    }
    eprintln!("  Servings: {}", recipe.servings);
    eprintln!("  Total: {:.1} kcal | Per serving: {:.1} kcal", recipe.total.calories(), recipe.per_serving.calories());

    println!("{}", serde_json::to_string_pretty(&recipe)?);

    Ok(())
}
