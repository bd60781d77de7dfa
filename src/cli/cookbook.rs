use gastroguru::cookbook::{Cookbook, MealSlot, Weekday};
use gastroguru::RecipeCatalog;

use super::browse::summary_line;
use super::{CliResult, CookbookCommand, PlanCommand};

pub fn cookbook(catalog: &RecipeCatalog, command: CookbookCommand) -> CliResult {
    let mut book = Cookbook::load(catalog);

    match command {
        CookbookCommand::List { search } => {
            let recipes = book.search(catalog, search.as_deref().unwrap_or_default());
            if recipes.is_empty() {
                println!("No saved recipes found.");
            }
            for recipe in recipes {
                println!("{}", summary_line(recipe));
            }
            return Ok(());
        }
        CookbookCommand::Save { id } => {
            let recipe = catalog
                .get(&id)
                .ok_or_else(|| format!("Recipe not found: {id}"))?;
            if book.save_recipe(&id) {
                println!("Added to cookbook: {}", recipe.title);
            } else {
                println!("Already in your cookbook: {}", recipe.title);
            }
        }
        CookbookCommand::Remove { id } => {
            if book.remove_recipe(&id) {
                println!("Removed from cookbook: {id}");
            } else {
                println!("Not in your cookbook: {id}");
            }
        }
    }

    book.save()
}

pub fn plan(catalog: &RecipeCatalog, command: PlanCommand) -> CliResult {
    let mut book = Cookbook::load(catalog);

    match command {
        PlanCommand::Show => {
            print_plan(&book, catalog);
            return Ok(());
        }
        PlanCommand::Set { day, meal, id } => {
            let recipe = catalog
                .get(&id)
                .ok_or_else(|| format!("Recipe not found: {id}"))?;
            book.plan.assign(day, meal, &id);
            println!("{day} {meal}: {}", recipe.title);
        }
        PlanCommand::Clear { day, meal } => {
            book.plan.clear(day, meal);
            println!("{day} {meal}: nothing planned");
        }
    }

    book.save()
}

fn print_plan(book: &Cookbook, catalog: &RecipeCatalog) {
    println!("{} meal(s) planned this week", book.plan.meal_count());
    for day in Weekday::ALL {
        println!("{day}");
        for meal in MealSlot::ALL {
            let title = match book.plan.get(day, meal) {
                Some(id) => catalog.get(id).map_or(id, |r| r.title.as_str()),
                None => "-",
            };
            println!("  {:<10} {title}", meal.to_string());
        }
    }
}
