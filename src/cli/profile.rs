use gastroguru::history::LastViewed;
use gastroguru::profile::{ProfileUpdate, UserProfile};
use gastroguru::RecipeCatalog;

use super::browse::summary_line;
use super::{CliResult, ProfileCommand};

pub fn profile(catalog: &RecipeCatalog, command: ProfileCommand) -> CliResult {
    let mut profile =
        UserProfile::load(catalog).ok_or("No profile yet and no catalog author to start from")?;

    match command {
        ProfileCommand::Show => {
            print_profile(&profile, catalog);
            return Ok(());
        }
        ProfileCommand::Edit {
            name,
            avatar,
            bio,
            website,
            instagram,
            twitter,
        } => {
            let update = ProfileUpdate {
                name,
                avatar,
                bio,
                website,
                instagram,
                twitter,
            };
            if !profile.apply(update) {
                println!("Nothing to change.");
                return Ok(());
            }
            println!("Profile updated.");
        }
        ProfileCommand::Favorite { id } => {
            let recipe = catalog
                .get(&id)
                .ok_or_else(|| format!("Recipe not found: {id}"))?;
            if profile.toggle_favorite(&id) {
                println!("Added to favorites: {}", recipe.title);
            } else {
                println!("Removed from favorites: {}", recipe.title);
            }
        }
    }

    profile.save()
}

fn print_profile(profile: &UserProfile, catalog: &RecipeCatalog) {
    println!("{}", profile.name);
    if !profile.bio.is_empty() {
        println!("{}", profile.bio);
    }
    println!("Member since {}", profile.member_since.format("%B %Y"));
    if let Some(website) = &profile.website {
        println!("Web: {website}");
    }
    if let Some(instagram) = &profile.social.instagram {
        println!("Instagram: {instagram}");
    }
    if let Some(twitter) = &profile.social.twitter {
        println!("Twitter: {twitter}");
    }

    let authored = profile.authored(catalog);
    println!("\nMy recipes ({})", authored.len());
    for recipe in authored {
        println!("{}", summary_line(recipe));
    }

    let favorites = profile.favorite_recipes(catalog);
    println!("\nFavorites ({})", favorites.len());
    for recipe in favorites {
        println!("{}", summary_line(recipe));
    }
}

pub fn last_viewed() -> CliResult {
    match LastViewed::load() {
        Some(seen) => println!(
            "{}  {}  (viewed {})",
            seen.id,
            seen.title,
            seen.timestamp.format("%Y-%m-%d %H:%M")
        ),
        None => println!("No recipe viewed yet."),
    }
    Ok(())
}
