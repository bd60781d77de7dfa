use rand::Rng;

use gastroguru::notify::{ConsoleNotifier, Notice, Notifier};
use gastroguru::quantity::{format_quantity, scale_servings};
use gastroguru::search::{filter_recipes, random_pick, similar_recipes, FilterState};
use gastroguru::timer::{duration_seconds, format_clock};
use gastroguru::{Config, Recipe, RecipeCatalog};

use super::{BrowseArgs, CliResult};

/// One-line summary used in every listing.
pub fn summary_line(recipe: &Recipe) -> String {
    format!(
        "{:>4}  {}  [{} · {} · {} min · ★ {:.1}]",
        recipe.id,
        recipe.title,
        recipe.cuisine,
        recipe.difficulty,
        recipe.total_time(),
        recipe.rating
    )
}

/// The "surprise me" pick over the current filter results.
pub fn surprise<R: Rng + ?Sized>(results: &[&Recipe], rng: &mut R) -> Notice {
    match random_pick(results, rng) {
        Some(recipe) => Notice::titled(
            "Found a surprise recipe!",
            format!("How about trying {}?", recipe.title),
        ),
        None => Notice::titled(
            "No recipes found",
            "Try adjusting your filters to find more recipes.",
        ),
    }
}

/// Build the filter panel state the flags describe.
pub fn filter_state(args: &BrowseArgs, config: &Config) -> FilterState {
    let mut state = FilterState::default();
    state.set_max_cook_time(args.max_cook_time.unwrap_or(config.default_max_cook_time));
    for cuisine in &args.cuisines {
        state.toggle_cuisine(*cuisine);
    }
    for diet in &args.diet_types {
        state.toggle_diet_type(*diet);
    }
    if let Some(difficulty) = args.difficulty {
        state.toggle_difficulty(difficulty);
    }
    state
}

pub fn browse(catalog: &RecipeCatalog, config: &Config, args: &BrowseArgs) -> CliResult {
    let state = filter_state(args, config);
    let criteria = state.to_criteria(&args.tags, args.search.as_deref().unwrap_or_default());
    let results = filter_recipes(catalog.recipes(), &criteria);
    log::debug!("{} of {} recipes match", results.len(), catalog.len());

    if args.surprise {
        ConsoleNotifier.notify(surprise(&results, &mut rand::thread_rng()));
        return Ok(());
    }

    if results.is_empty() {
        println!("No recipes found. Try adjusting your filters or tags to find more recipes.");
        return Ok(());
    }

    let page_size = config.page_size.max(1);
    let page = args.page.max(1);
    if state.has_active_filters() {
        println!("{} filter(s) active", state.active_count());
    }
    println!("{} recipe(s) found", results.len());
    let skipped = (page - 1).saturating_mul(page_size);
    for recipe in results.iter().skip(skipped).take(page_size) {
        println!("{}", summary_line(recipe));
    }
    if page.saturating_mul(page_size) < results.len() {
        println!("More on page {}", page + 1);
    }
    Ok(())
}

pub fn show(catalog: &RecipeCatalog, config: &Config, id: &str, multiplier: f64) -> CliResult {
    let recipe = catalog
        .get(id)
        .ok_or_else(|| format!("Recipe not found: {id}"))?;
    if multiplier <= 0.0 || !multiplier.is_finite() {
        return Err(format!("Serving multiplier must be positive, got {multiplier}").into());
    }

    println!("{}", recipe.title);
    println!("{}", recipe.description);
    println!(
        "by {} · {} · {} · prep {} min · cook {} min · serves {}",
        recipe.author.name,
        recipe.cuisine,
        recipe.difficulty,
        recipe.prep_time,
        recipe.cook_time,
        scale_servings(recipe.servings, multiplier)
    );
    if !recipe.diet_types.is_empty() {
        let diets: Vec<&str> = recipe.diet_types.iter().map(|d| d.as_str()).collect();
        println!("Diet: {}", diets.join(", "));
    }
    if !recipe.tags.is_empty() {
        println!("Tags: {}", recipe.tags.join(", "));
    }

    println!("\nIngredients");
    for ing in &recipe.ingredients {
        let quantity = format_quantity(&ing.quantity, multiplier);
        println!("  • {} {} {}", quantity, ing.unit, ing.name);
    }

    println!("\nSteps");
    for (i, step) in recipe.steps.iter().enumerate() {
        match step.timer_minutes {
            Some(minutes) => println!(
                "  {}. {} ({})",
                i + 1,
                step.description,
                format_clock(duration_seconds(minutes))
            ),
            None => println!("  {}. {}", i + 1, step.description),
        }
    }

    let similar = similar_recipes(catalog.recipes(), &recipe.id, config.similar_limit);
    if !similar.is_empty() {
        println!("\nYou might also like");
        for r in similar {
            println!("{}", summary_line(r));
        }
    }

    gastroguru::history::record_view(recipe, &gastroguru::history::LastViewed::path());
    Ok(())
}

pub fn tags(catalog: &RecipeCatalog) -> CliResult {
    for tag in catalog.all_tags() {
        println!("{tag}");
    }
    Ok(())
}

pub fn featured(catalog: &RecipeCatalog) -> CliResult {
    match catalog.featured() {
        Some(recipe) => println!("{}", summary_line(recipe)),
        None => println!("The catalog is empty."),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gastroguru::{Cuisine, Difficulty};

    #[test]
    fn flags_become_filter_state() {
        let config = Config::default();
        let args = BrowseArgs {
            cuisines: vec![Cuisine::Italian, Cuisine::Thai],
            difficulty: Some(Difficulty::Easy),
            max_cook_time: Some(30),
            ..Default::default()
        };
        let state = filter_state(&args, &config);
        assert_eq!(state.cuisines, vec![Cuisine::Italian, Cuisine::Thai]);
        assert_eq!(state.difficulty, Some(Difficulty::Easy));
        assert_eq!(state.max_cook_time, 30);
        assert_eq!(state.active_count(), 4);
    }

    #[test]
    fn default_bound_comes_from_config() {
        let mut config = Config::default();
        config.default_max_cook_time = 45;
        let state = filter_state(&BrowseArgs::default(), &config);
        assert_eq!(state.max_cook_time, 45);
    }

    #[test]
    fn summary_shows_total_time() {
        let catalog = RecipeCatalog::builtin().unwrap();
        let line = summary_line(catalog.get("1").unwrap());
        assert!(line.contains("Creamy Mushroom Risotto"));
        assert!(line.contains("45 min"));
    }

    #[test]
    fn surprise_names_a_matching_recipe() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let catalog = RecipeCatalog::builtin().unwrap();
        let thai: Vec<&Recipe> = vec![catalog.get("2").unwrap()];
        let notice = surprise(&thai, &mut StdRng::seed_from_u64(1));
        assert_eq!(notice.title.as_deref(), Some("Found a surprise recipe!"));
        assert_eq!(
            notice.description,
            "How about trying Spicy Thai Basil Chicken (Pad Krapow Gai)?"
        );
    }

    #[test]
    fn surprise_with_no_results_says_so() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let notice = surprise(&[], &mut StdRng::seed_from_u64(1));
        assert_eq!(notice.title.as_deref(), Some("No recipes found"));
    }

    #[test]
    fn huge_times_still_summarise() {
        let catalog = RecipeCatalog::builtin().unwrap();
        let mut recipe = catalog.get("1").unwrap().clone();
        recipe.prep_time = u32::MAX;
        recipe.cook_time = 1;
        assert!(summary_line(&recipe).contains(&format!("{} min", u32::MAX)));
    }
}
