use chrono::Utc;

use crate::error::DraftError;
use crate::model::{Author, Cuisine, DietType, Difficulty, Ingredient, Recipe, Step};

pub const PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1495521821757-a1efb6729352?q=80&w=1000";

/// A recipe being written. Nothing is checked until [`RecipeDraft::publish`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDraft {
    pub title: String,
    pub description: String,
    pub image: String,
    pub prep_time: u32,
    pub cook_time: u32,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub cuisine: Cuisine,
    pub diet_types: Vec<DietType>,
    pub tags: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<Step>,
    next_line: u32,
}

impl Default for RecipeDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            image: PLACEHOLDER_IMAGE.into(),
            prep_time: 0,
            cook_time: 0,
            servings: 1,
            difficulty: Difficulty::Medium,
            cuisine: Cuisine::American,
            diet_types: Vec::new(),
            tags: Vec::new(),
            ingredients: Vec::new(),
            steps: Vec::new(),
            next_line: 1,
        }
    }
}

impl RecipeDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a trimmed tag. Blank and duplicate tags are ignored.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    pub fn toggle_diet_type(&mut self, diet: DietType) {
        if let Some(pos) = self.diet_types.iter().position(|d| *d == diet) {
            self.diet_types.remove(pos);
        } else {
            self.diet_types.push(diet);
        }
    }

    /// Append an ingredient line and return its id.
    pub fn add_ingredient(
        &mut self,
        name: &str,
        quantity: &str,
        unit: &str,
    ) -> Result<String, DraftError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DraftError::EmptyIngredientName);
        }
        let id = self.line_id("ing");
        self.ingredients.push(Ingredient {
            id: id.clone(),
            name: name.to_string(),
            quantity: quantity.trim().to_string(),
            unit: unit.trim().to_string(),
        });
        Ok(id)
    }

    pub fn remove_ingredient(&mut self, id: &str) {
        self.ingredients.retain(|i| i.id != id);
    }

    /// Append an instruction step and return its id.
    pub fn add_step(
        &mut self,
        description: &str,
        timer_minutes: Option<f64>,
    ) -> Result<String, DraftError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(DraftError::EmptyStepDescription);
        }
        if let Some(minutes) = timer_minutes {
            if !(minutes > 0.0) || !minutes.is_finite() {
                return Err(DraftError::InvalidTimer(minutes));
            }
        }
        let id = self.line_id("step");
        self.steps.push(Step {
            id: id.clone(),
            description: description.to_string(),
            timer_minutes,
            image: None,
        });
        Ok(id)
    }

    pub fn remove_step(&mut self, id: &str) {
        self.steps.retain(|s| s.id != id);
    }

    fn line_id(&mut self, prefix: &str) -> String {
        let id = format!("{prefix}-{}", self.next_line);
        self.next_line += 1;
        id
    }

    /// Checks in the order a reader would fix them: title, ingredients, steps.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::MissingTitle);
        }
        if self.ingredients.is_empty() {
            return Err(DraftError::MissingIngredients);
        }
        if self.steps.is_empty() {
            return Err(DraftError::MissingSteps);
        }
        Ok(())
    }

    /// Turn the draft into a catalog recipe. Line ids are prefixed with the
    /// recipe id so they stay unique alongside other recipes.
    pub fn publish(self, id: &str, author: Author) -> Result<Recipe, DraftError> {
        self.validate()?;
        log::info!("Publishing recipe {id}: {}", self.title.trim());

        let ingredients = self
            .ingredients
            .into_iter()
            .map(|i| Ingredient {
                id: format!("{id}-{}", i.id),
                ..i
            })
            .collect();
        let steps = self
            .steps
            .into_iter()
            .map(|s| Step {
                id: format!("{id}-{}", s.id),
                ..s
            })
            .collect();

        Ok(Recipe {
            id: id.to_string(),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            image: self.image,
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            servings: self.servings,
            difficulty: self.difficulty,
            cuisine: self.cuisine,
            diet_types: self.diet_types,
            tags: self.tags,
            ingredients,
            steps,
            video: None,
            author,
            created_at: Utc::now(),
            rating: 0.0,
        })
    }
}
