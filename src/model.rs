use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ParseEnumError;

/// Declares a closed categorical attribute with its wire spellings.
macro_rules! categorical {
    ($(#[$meta:meta])* $name:ident, $kind:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| ParseEnumError {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

categorical!(
    /// Cuisine a recipe belongs to.
    Cuisine, "cuisine", {
        Italian => "Italian",
        Mexican => "Mexican",
        Chinese => "Chinese",
        Indian => "Indian",
        American => "American",
        Japanese => "Japanese",
        Thai => "Thai",
        French => "French",
        Mediterranean => "Mediterranean",
        Greek => "Greek",
    }
);

categorical!(
    /// Dietary classification. A recipe may carry several.
    DietType, "diet type", {
        Vegetarian => "Vegetarian",
        Vegan => "Vegan",
        GlutenFree => "Gluten-Free",
        DairyFree => "Dairy-Free",
        Keto => "Keto",
        Paleo => "Paleo",
        LowCarb => "Low-Carb",
        Pescatarian => "Pescatarian",
    }
);

categorical!(
    Difficulty, "difficulty", {
        Easy => "Easy",
        Medium => "Medium",
        Hard => "Hard",
    }
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub bio: String,
}

/// One ingredient line. `quantity` is kept verbatim ("1.5", "8", "1/2" or "").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub quantity: String,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub id: String,
    pub description: String,
    /// Countdown length in minutes, positive when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer_minutes: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    /// Minutes.
    pub prep_time: u32,
    /// Minutes.
    pub cook_time: u32,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub cuisine: Cuisine,
    #[serde(default)]
    pub diet_types: Vec<DietType>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    pub author: Author,
    pub created_at: DateTime<Utc>,
    pub rating: f32,
}

impl Recipe {
    /// 1-based position of a step within this recipe.
    pub fn step_position(&self, step_id: &str) -> Option<usize> {
        self.steps
            .iter()
            .position(|s| s.id == step_id)
            .map(|i| i + 1)
    }

    pub fn step(&self, step_id: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == step_id)
    }

    /// Prep plus cook minutes, pinned at `u32::MAX`.
    pub fn total_time(&self) -> u32 {
        self.prep_time.saturating_add(self.cook_time)
    }
}
