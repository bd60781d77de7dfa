use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::model::Recipe;
use crate::store;

/// The most recently opened recipe. Informational only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastViewed {
    pub id: String,
    pub title: String,
    pub image: String,
    pub timestamp: DateTime<Utc>,
}

impl LastViewed {
    pub fn of(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.clone(),
            title: recipe.title.clone(),
            image: recipe.image.clone(),
            timestamp: Utc::now(),
        }
    }

    /// File: ~/.local/share/gastroguru/last_viewed.json
    pub fn path() -> PathBuf {
        store::data_dir().join("last_viewed.json")
    }

    pub fn load() -> Option<Self> {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Option<Self> {
        store::load_or_default(path)
    }

    /// Persist to disk.
    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        store::save_json(path, self)
    }
}

/// Remember `recipe` as last viewed. Failures are logged, never returned.
pub fn record_view(recipe: &Recipe, path: &Path) {
    if let Err(e) = LastViewed::of(recipe).save_to(path) {
        log::warn!("Failed to save last viewed recipe: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RecipeCatalog;

    #[test]
    fn records_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last_viewed.json");
        assert_eq!(LastViewed::load_from(&path), None);

        let catalog = RecipeCatalog::builtin().unwrap();
        let recipe = catalog.get("3").unwrap();
        record_view(recipe, &path);

        let seen = LastViewed::load_from(&path).unwrap();
        assert_eq!(seen.id, "3");
        assert_eq!(seen.title, recipe.title);
        assert_eq!(seen.image, recipe.image);
    }

    #[test]
    fn unwritable_location_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let catalog = RecipeCatalog::builtin().unwrap();
        // parent is a regular file, so the write fails
        record_view(catalog.get("1").unwrap(), &blocker.join("last_viewed.json"));
    }
}
