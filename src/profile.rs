use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog::RecipeCatalog;
use crate::model::{Author, Recipe};
use crate::store;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLinks {
    pub instagram: Option<String>,
    pub twitter: Option<String>,
}

/// The local user's public profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub bio: String,
    pub member_since: NaiveDate,
    pub website: Option<String>,
    #[serde(default)]
    pub social: SocialLinks,
    /// Recipe ids marked as favourites.
    #[serde(default)]
    pub favorites: Vec<String>,
}

/// Fields to change; `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
}

impl UserProfile {
    /// Profile for a catalog author, used on first run.
    pub fn for_author(author: &Author) -> Self {
        Self {
            id: author.id.clone(),
            name: author.name.clone(),
            avatar: author.avatar.clone(),
            bio: author.bio.clone(),
            member_since: chrono::Utc::now().date_naive(),
            website: None,
            social: SocialLinks::default(),
            favorites: Vec::new(),
        }
    }

    /// File: ~/.config/gastroguru/profile.json
    pub fn path() -> PathBuf {
        store::config_dir().join("profile.json")
    }

    /// Load the saved profile, or build one for the first catalog author.
    pub fn load(catalog: &RecipeCatalog) -> Option<Self> {
        Self::load_from(&Self::path())
            .or_else(|| catalog.recipes().first().map(|r| Self::for_author(&r.author)))
    }

    pub fn load_from(path: &Path) -> Option<Self> {
        store::load_or_default(path)
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        store::save_json(path, self)
    }

    /// Apply an edit. Blank strings clear optional fields; blank required
    /// fields are ignored. Returns true if anything changed.
    pub fn apply(&mut self, update: ProfileUpdate) -> bool {
        let before = self.clone();

        if let Some(name) = update.name.filter(|n| !n.trim().is_empty()) {
            self.name = name.trim().to_string();
        }
        if let Some(avatar) = update.avatar {
            self.avatar = avatar.trim().to_string();
        }
        if let Some(bio) = update.bio {
            self.bio = bio.trim().to_string();
        }
        if let Some(website) = update.website {
            self.website = non_blank(website);
        }
        if let Some(instagram) = update.instagram {
            self.social.instagram = non_blank(instagram);
        }
        if let Some(twitter) = update.twitter {
            self.social.twitter = non_blank(twitter);
        }

        *self != before
    }

    /// Recipes this user wrote.
    pub fn authored<'a>(&self, catalog: &'a RecipeCatalog) -> Vec<&'a Recipe> {
        catalog.by_author(&self.id)
    }

    pub fn favorite_recipes<'a>(&self, catalog: &'a RecipeCatalog) -> Vec<&'a Recipe> {
        self.favorites.iter().filter_map(|id| catalog.get(id)).collect()
    }

    /// Flip a favourite. Returns whether it is now a favourite.
    pub fn toggle_favorite(&mut self, recipe_id: &str) -> bool {
        if let Some(pos) = self.favorites.iter().position(|id| id == recipe_id) {
            self.favorites.remove(pos);
            false
        } else {
            self.favorites.push(recipe_id.to_string());
            true
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
