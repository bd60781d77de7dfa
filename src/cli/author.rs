use std::path::Path;

use gastroguru::authoring::RecipeDraft;
use gastroguru::model::Author;
use gastroguru::profile::UserProfile;
use gastroguru::{Recipe, RecipeCatalog};

use super::{CliResult, CreateArgs};

/// Split "quantity|unit|name". A line without separators is just a name.
pub fn parse_ingredient(line: &str) -> Result<(String, String, String), String> {
    let parts: Vec<&str> = line.split('|').map(str::trim).collect();
    match parts.as_slice() {
        [name] => Ok((String::new(), String::new(), name.to_string())),
        [quantity, unit, name] => Ok((quantity.to_string(), unit.to_string(), name.to_string())),
        _ => Err(format!(
            "Ingredient should look like \"quantity|unit|name\": {line}"
        )),
    }
}

/// Split "description|minutes". A line without a separator has no timer.
pub fn parse_step(line: &str) -> Result<(String, Option<f64>), String> {
    match line.rsplit_once('|') {
        None => Ok((line.trim().to_string(), None)),
        Some((description, minutes)) => {
            let minutes = minutes
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("Step timer is not a number: {minutes}"))?;
            Ok((description.trim().to_string(), Some(minutes)))
        }
    }
}

/// One past the highest numeric id in use. Ids already at `u64::MAX` are
/// skipped so the result always fits.
fn next_id(recipes: &[Recipe]) -> String {
    let highest = recipes
        .iter()
        .filter_map(|r| r.id.parse::<u64>().ok())
        .filter(|id| *id < u64::MAX)
        .max()
        .unwrap_or(0);
    (highest + 1).to_string()
}

pub fn build_draft(args: &CreateArgs) -> Result<RecipeDraft, Box<dyn std::error::Error>> {
    let mut draft = RecipeDraft::new();
    draft.title = args.title.clone();
    draft.description = args.description.clone();
    draft.prep_time = args.prep;
    draft.cook_time = args.cook;
    draft.servings = args.servings.max(1);
    draft.difficulty = args.difficulty;
    draft.cuisine = args.cuisine;
    for diet in &args.diet_types {
        draft.toggle_diet_type(*diet);
    }
    for tag in &args.tags {
        draft.add_tag(tag);
    }
    for line in &args.ingredients {
        let (quantity, unit, name) = parse_ingredient(line)?;
        draft.add_ingredient(&name, &quantity, &unit)?;
    }
    for line in &args.steps {
        let (description, minutes) = parse_step(line)?;
        draft.add_step(&description, minutes)?;
    }
    draft.validate()?;
    Ok(draft)
}

pub fn create(catalog: &RecipeCatalog, args: CreateArgs) -> CliResult {
    let draft = build_draft(&args)?;

    if args.draft {
        log::info!("Kept draft {}", draft.title.trim());
        println!("Recipe saved as draft: {}", draft.title.trim());
        return Ok(());
    }

    let author = match UserProfile::load(catalog) {
        Some(profile) => Author {
            id: profile.id,
            name: profile.name,
            avatar: profile.avatar,
            bio: profile.bio,
        },
        None => return Err("Set up a profile before publishing recipes".into()),
    };

    let mut recipes = match &args.out {
        Some(path) if path.exists() => RecipeCatalog::load(path)?.recipes().to_vec(),
        Some(_) => Vec::new(),
        None => catalog.recipes().to_vec(),
    };
    let id = args.id.clone().unwrap_or_else(|| next_id(&recipes));
    let recipe = draft.publish(&id, author)?;

    match &args.out {
        Some(path) => {
            recipes.push(recipe);
            // validates id uniqueness before anything is written
            let updated = RecipeCatalog::from_recipes(recipes)?;
            write_catalog(path, &updated)?;
            println!("Recipe {id} added to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&recipe)?),
    }
    Ok(())
}

fn write_catalog(path: &Path, catalog: &RecipeCatalog) -> CliResult {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(catalog.recipes())?)?;
    log::info!("Wrote {} recipes to {}", catalog.len(), path.display());
    Ok(())
}
