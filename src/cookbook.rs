use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::catalog::RecipeCatalog;
use crate::error::ParseEnumError;
use crate::model::Recipe;
use crate::store;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromStr for Weekday {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Weekday::ALL
            .into_iter()
            .find(|d| {
                let name = d.to_string().to_lowercase();
                name == wanted || (wanted.len() >= 3 && name.starts_with(&wanted))
            })
            .ok_or_else(|| ParseEnumError {
                kind: "weekday",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromStr for MealSlot {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MealSlot::ALL
            .into_iter()
            .find(|m| m.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError {
                kind: "meal",
                value: s.to_string(),
            })
    }
}

/// Meals planned for one day, as recipe ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub breakfast: Option<String>,
    pub lunch: Option<String>,
    pub dinner: Option<String>,
}

impl DayPlan {
    fn slot_mut(&mut self, slot: MealSlot) -> &mut Option<String> {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
        }
    }

    pub fn get(&self, slot: MealSlot) -> Option<&str> {
        match slot {
            MealSlot::Breakfast => self.breakfast.as_deref(),
            MealSlot::Lunch => self.lunch.as_deref(),
            MealSlot::Dinner => self.dinner.as_deref(),
        }
    }
}

/// A Monday-to-Sunday meal plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    days: [DayPlan; 7],
}

impl MealPlan {
    /// Default week from up to three planned recipes: the first for breakfast
    /// every third day, the second for lunch every other day, the third for
    /// dinner on the first three days.
    pub fn rotation(planned: &[&str]) -> Self {
        let mut plan = Self::default();
        for (i, day) in Weekday::ALL.into_iter().enumerate() {
            if i % 3 == 0 {
                if let Some(id) = planned.first() {
                    plan.assign(day, MealSlot::Breakfast, id);
                }
            }
            if i % 2 == 0 {
                if let Some(id) = planned.get(1) {
                    plan.assign(day, MealSlot::Lunch, id);
                }
            }
            if i < 3 {
                if let Some(id) = planned.get(2) {
                    plan.assign(day, MealSlot::Dinner, id);
                }
            }
        }
        plan
    }

    pub fn assign(&mut self, day: Weekday, slot: MealSlot, recipe_id: &str) {
        *self.days[day.index()].slot_mut(slot) = Some(recipe_id.to_string());
    }

    pub fn clear(&mut self, day: Weekday, slot: MealSlot) {
        *self.days[day.index()].slot_mut(slot) = None;
    }

    pub fn get(&self, day: Weekday, slot: MealSlot) -> Option<&str> {
        self.days[day.index()].get(slot)
    }

    /// Number of filled slots across the week.
    pub fn meal_count(&self) -> usize {
        Weekday::ALL
            .into_iter()
            .flat_map(|d| MealSlot::ALL.into_iter().map(move |s| (d, s)))
            .filter(|(d, s)| self.get(*d, *s).is_some())
            .count()
    }
}

/// Saved recipes and the weekly plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cookbook {
    pub saved: Vec<String>,
    pub plan: MealPlan,
}

impl Cookbook {
    /// First-run cookbook: the first four recipes saved, the third to fifth
    /// planned through the week.
    pub fn starter(catalog: &RecipeCatalog) -> Self {
        let ids: Vec<&str> = catalog.recipes().iter().map(|r| r.id.as_str()).collect();
        let planned: Vec<&str> = ids.iter().skip(2).take(3).copied().collect();
        Self {
            saved: ids.iter().take(4).map(|id| id.to_string()).collect(),
            plan: MealPlan::rotation(&planned),
        }
    }

    /// File: ~/.local/share/gastroguru/cookbook.json
    pub fn path() -> PathBuf {
        store::data_dir().join("cookbook.json")
    }

    /// Load the cookbook, seeding the starter one on first run.
    pub fn load(catalog: &RecipeCatalog) -> Self {
        let path = Self::path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Self::starter(catalog)
        }
    }

    pub fn load_from(path: &Path) -> Self {
        store::load_or_default(path)
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        store::save_json(path, self)
    }

    /// Returns false if it was already saved.
    pub fn save_recipe(&mut self, recipe_id: &str) -> bool {
        if self.contains(recipe_id) {
            return false;
        }
        self.saved.push(recipe_id.to_string());
        true
    }

    /// Returns false if it wasn't saved.
    pub fn remove_recipe(&mut self, recipe_id: &str) -> bool {
        let before = self.saved.len();
        self.saved.retain(|id| id != recipe_id);
        self.saved.len() != before
    }

    pub fn contains(&self, recipe_id: &str) -> bool {
        self.saved.iter().any(|id| id == recipe_id)
    }

    /// Saved recipes still present in the catalog, in saved order.
    pub fn saved_recipes<'a>(&self, catalog: &'a RecipeCatalog) -> Vec<&'a Recipe> {
        self.saved.iter().filter_map(|id| catalog.get(id)).collect()
    }

    /// Saved recipes whose title or any tag contains `query`, ignoring case.
    /// A blank query returns everything saved.
    pub fn search<'a>(&self, catalog: &'a RecipeCatalog, query: &str) -> Vec<&'a Recipe> {
        let saved = self.saved_recipes(catalog);
        if query.trim().is_empty() {
            return saved;
        }
        let query = query.to_lowercase();
        saved
            .into_iter()
            .filter(|r| {
                r.title.to_lowercase().contains(&query)
                    || r.tags.iter().any(|t| t.to_lowercase().contains(&query))
            })
            .collect()
    }
}
