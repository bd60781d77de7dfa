use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::CatalogError;
use crate::model::Recipe;

const BUILTIN_RECIPES: &str = include_str!("../data/recipes.json");

/// Read-only recipe collection. Loaded once, then only queried.
#[derive(Debug, Clone, Default)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
}

impl RecipeCatalog {
    /// The bundled seed dataset.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_RECIPES)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let data = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&data)?;
        log::info!("Loaded {} recipes from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn from_json(data: &str) -> Result<Self, CatalogError> {
        let recipes: Vec<Recipe> = serde_json::from_str(data)?;
        Self::from_recipes(recipes)
    }

    /// Build a catalog, checking id uniqueness and timer positivity.
    pub fn from_recipes(recipes: Vec<Recipe>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for recipe in &recipes {
            if !seen.insert(recipe.id.as_str()) {
                return Err(CatalogError::DuplicateId(recipe.id.clone()));
            }
            for step in &recipe.steps {
                if let Some(minutes) = step.timer_minutes {
                    if !(minutes > 0.0) {
                        return Err(CatalogError::InvalidTimer {
                            recipe_id: recipe.id.clone(),
                            step_id: step.id.clone(),
                        });
                    }
                }
            }
        }
        Ok(Self { recipes })
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn by_author(&self, author_id: &str) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|r| r.author.id == author_id)
            .collect()
    }

    /// Every distinct tag, in the order first seen.
    pub fn all_tags(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.recipes
            .iter()
            .flat_map(|r| r.tags.iter())
            .filter(|t| seen.insert(t.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Highest rated recipe; the earliest one wins a tie.
    pub fn featured(&self) -> Option<&Recipe> {
        self.recipes.iter().fold(None, |best: Option<&Recipe>, r| match best {
            Some(b) if b.rating >= r.rating => Some(b),
            _ => Some(r),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_dataset_loads() {
        let catalog = RecipeCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.get("1").unwrap().title, "Creamy Mushroom Risotto");
        assert!(catalog.get("nope").is_none());
    }

    #[test]
    fn featured_prefers_first_of_equal_ratings() {
        let catalog = RecipeCatalog::builtin().unwrap();
        // Coq au Vin (4) and Neapolitan Pizza (6) are both rated 4.9
        assert_eq!(catalog.featured().unwrap().id, "4");
    }

    #[test]
    fn tags_are_distinct_in_first_seen_order() {
        let catalog = RecipeCatalog::builtin().unwrap();
        let tags = catalog.all_tags();
        assert_eq!(&tags[..4], &["Italian", "Vegetarian", "Dinner", "Rice"]);
        assert_eq!(tags.iter().filter(|t| **t == "Italian").count(), 1);
    }

    #[test]
    fn by_author_filters_on_author_id() {
        let catalog = RecipeCatalog::builtin().unwrap();
        let mine = catalog.by_author("a1");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, "1");
    }

    #[test]
    fn rejects_duplicate_ids() {
        let catalog = RecipeCatalog::builtin().unwrap();
        let mut recipes = catalog.recipes().to_vec();
        recipes.push(recipes[0].clone());
        let err = RecipeCatalog::from_recipes(recipes).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "1"));
    }

    #[test]
    fn rejects_non_positive_timers() {
        let catalog = RecipeCatalog::builtin().unwrap();
        let mut recipes = catalog.recipes().to_vec();
        recipes[1].steps[0].timer_minutes = Some(0.0);
        let err = RecipeCatalog::from_recipes(recipes).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidTimer { recipe_id, .. } if recipe_id == "2"));
    }

    #[test]
    fn empty_catalog_is_valid() {
        let catalog = RecipeCatalog::from_json("[]").unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.featured().is_none());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = RecipeCatalog::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
