use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{Cuisine, DietType, Difficulty, Recipe};

/// Upper end of the cook-time slider; a bound at this value is "no constraint".
pub const DEFAULT_MAX_COOK_TIME: u32 = 120;

/// Conjunction of independent predicates. Empty sets and `None` are no-ops.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub cuisines: BTreeSet<Cuisine>,
    pub diet_types: BTreeSet<DietType>,
    pub difficulty: Option<Difficulty>,
    pub max_cook_time: Option<u32>,
    pub tags: BTreeSet<String>,
    pub search: Option<String>,
}

impl FilterCriteria {
    /// Evaluate the predicates in order, stopping at the first failure.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if !self.cuisines.is_empty() && !self.cuisines.contains(&recipe.cuisine) {
            return false;
        }

        // Any-of, not all-of.
        if !self.diet_types.is_empty()
            && !recipe.diet_types.iter().any(|d| self.diet_types.contains(d))
        {
            return false;
        }

        if let Some(difficulty) = self.difficulty {
            if recipe.difficulty != difficulty {
                return false;
            }
        }

        if let Some(max) = self.max_cook_time {
            if recipe.cook_time > max {
                return false;
            }
        }

        if !self.tags.is_empty() && !recipe.tags.iter().any(|t| self.tags.contains(t)) {
            return false;
        }

        if let Some(query) = self.search.as_deref() {
            if !query.trim().is_empty() && !matches_text(recipe, &query.to_lowercase()) {
                return false;
            }
        }

        true
    }
}

/// Substring match on title, description or any ingredient name.
/// `needle` must already be lowercase.
fn matches_text(recipe: &Recipe, needle: &str) -> bool {
    recipe.title.to_lowercase().contains(needle)
        || recipe.description.to_lowercase().contains(needle)
        || recipe
            .ingredients
            .iter()
            .any(|ing| ing.name.to_lowercase().contains(needle))
}

/// Matching subsequence of `recipes`, original order preserved.
pub fn filter_recipes<'a, I>(recipes: I, criteria: &FilterCriteria) -> Vec<&'a Recipe>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    recipes
        .into_iter()
        .filter(|r| criteria.matches(r))
        .collect()
}

/// One of the filtered results at random, or `None` when nothing matched.
pub fn random_pick<'a, R>(results: &[&'a Recipe], rng: &mut R) -> Option<&'a Recipe>
where
    R: Rng + ?Sized,
{
    results.choose(rng).copied()
}

/// Filter panel state as the browse screen holds it.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub cuisines: Vec<Cuisine>,
    pub diet_types: Vec<DietType>,
    pub difficulty: Option<Difficulty>,
    pub max_cook_time: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            cuisines: Vec::new(),
            diet_types: Vec::new(),
            difficulty: None,
            max_cook_time: DEFAULT_MAX_COOK_TIME,
        }
    }
}

impl FilterState {
    pub fn toggle_cuisine(&mut self, cuisine: Cuisine) {
        toggle(&mut self.cuisines, cuisine);
    }

    pub fn toggle_diet_type(&mut self, diet: DietType) {
        toggle(&mut self.diet_types, diet);
    }

    /// Picking the already selected difficulty clears it.
    pub fn toggle_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = if self.difficulty == Some(difficulty) {
            None
        } else {
            Some(difficulty)
        };
    }

    pub fn set_max_cook_time(&mut self, minutes: u32) {
        self.max_cook_time = minutes;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn has_active_filters(&self) -> bool {
        self.active_count() > 0
    }

    /// Number shown on the filter badge.
    pub fn active_count(&self) -> usize {
        self.cuisines.len()
            + self.diet_types.len()
            + usize::from(self.difficulty.is_some())
            + usize::from(self.max_cook_time < DEFAULT_MAX_COOK_TIME)
    }

    /// Combine with the tag chips and search box into engine criteria.
    pub fn to_criteria(&self, tags: &[String], search: &str) -> FilterCriteria {
        FilterCriteria {
            cuisines: self.cuisines.iter().copied().collect(),
            diet_types: self.diet_types.iter().copied().collect(),
            difficulty: self.difficulty,
            max_cook_time: Some(self.max_cook_time),
            tags: tags.iter().cloned().collect(),
            search: Some(search.to_string()),
        }
    }
}

fn toggle<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if let Some(pos) = items.iter().position(|i| *i == item) {
        items.remove(pos);
    } else {
        items.push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RecipeCatalog;

    fn catalog() -> RecipeCatalog {
        RecipeCatalog::builtin().unwrap()
    }

    fn ids(recipes: &[&Recipe]) -> Vec<String> {
        recipes.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn empty_criteria_is_identity() {
        let catalog = catalog();
        let result = filter_recipes(catalog.recipes(), &FilterCriteria::default());
        assert_eq!(ids(&result), vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn cook_time_bound_is_inclusive_and_keeps_order() {
        let catalog = catalog();
        let three: Vec<&Recipe> = ["1", "2", "4"]
            .iter()
            .map(|id| catalog.get(id).unwrap())
            .collect();
        // cook times 30, 15, 90
        let criteria = FilterCriteria {
            max_cook_time: Some(30),
            ..Default::default()
        };
        let result = filter_recipes(three.iter().copied(), &criteria);
        assert_eq!(ids(&result), vec!["1", "2"]);
    }

    #[test]
    fn cook_time_partitions_the_collection() {
        let catalog = catalog();
        for max in [0, 10, 15, 25, 90, 200] {
            let criteria = FilterCriteria {
                max_cook_time: Some(max),
                ..Default::default()
            };
            let kept = filter_recipes(catalog.recipes(), &criteria);
            assert!(kept.iter().all(|r| r.cook_time <= max));
            let excluded = catalog
                .recipes()
                .iter()
                .filter(|r| !kept.iter().any(|k| k.id == r.id));
            assert!(excluded.into_iter().all(|r| r.cook_time > max));
        }
    }

    #[test]
    fn diet_constraint_is_any_of() {
        let catalog = catalog();
        let criteria = FilterCriteria {
            diet_types: [DietType::Vegan, DietType::Keto].into_iter().collect(),
            ..Default::default()
        };
        // Only the curry is vegan; nothing is keto.
        assert_eq!(ids(&filter_recipes(catalog.recipes(), &criteria)), vec!["5"]);

        let criteria = FilterCriteria {
            diet_types: [DietType::Vegetarian, DietType::GlutenFree].into_iter().collect(),
            ..Default::default()
        };
        assert_eq!(
            ids(&filter_recipes(catalog.recipes(), &criteria)),
            vec!["1", "3", "5", "6"]
        );
    }

    #[test]
    fn tag_constraint_is_any_of() {
        let catalog = catalog();
        let criteria = FilterCriteria {
            tags: ["Pizza".to_string(), "Curry".to_string()].into_iter().collect(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_recipes(catalog.recipes(), &criteria)), vec!["5", "6"]);
    }

    #[test]
    fn cuisine_and_difficulty_are_exact() {
        let catalog = catalog();
        let criteria = FilterCriteria {
            cuisines: [Cuisine::Italian].into_iter().collect(),
            difficulty: Some(Difficulty::Hard),
            ..Default::default()
        };
        assert_eq!(ids(&filter_recipes(catalog.recipes(), &criteria)), vec!["6"]);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let catalog = catalog();
        let by_title = FilterCriteria {
            search: Some("RISOTTO".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_recipes(catalog.recipes(), &by_title)), vec!["1"]);

        let by_ingredient = FilterCriteria {
            search: Some("arborio".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_recipes(catalog.recipes(), &by_ingredient)), vec!["1"]);

        let by_description = FilterCriteria {
            search: Some("street food".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_recipes(catalog.recipes(), &by_description)), vec!["2"]);
    }

    #[test]
    fn whitespace_search_is_ignored() {
        let catalog = catalog();
        let criteria = FilterCriteria {
            search: Some("   \t".into()),
            ..Default::default()
        };
        assert_eq!(filter_recipes(catalog.recipes(), &criteria).len(), 6);
    }

    #[test]
    fn empty_collection_yields_empty_result() {
        let criteria = FilterCriteria {
            search: Some("anything".into()),
            ..Default::default()
        };
        let empty: Vec<Recipe> = Vec::new();
        assert!(filter_recipes(&empty, &criteria).is_empty());
    }

    #[test]
    fn filter_state_badge_counts_active_filters() {
        let mut state = FilterState::default();
        assert!(!state.has_active_filters());

        state.toggle_cuisine(Cuisine::Thai);
        state.toggle_diet_type(DietType::Vegan);
        state.toggle_difficulty(Difficulty::Easy);
        state.set_max_cook_time(45);
        assert_eq!(state.active_count(), 4);

        state.toggle_cuisine(Cuisine::Thai);
        state.toggle_difficulty(Difficulty::Easy);
        assert_eq!(state.active_count(), 2);
        assert_eq!(state.difficulty, None);

        state.clear();
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn default_state_matches_everything_under_the_ceiling() {
        let catalog = catalog();
        let criteria = FilterState::default().to_criteria(&[], "");
        assert_eq!(filter_recipes(catalog.recipes(), &criteria).len(), 6);
    }

    #[test]
    fn random_pick_stays_within_the_results() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let catalog = catalog();
        let criteria = FilterCriteria {
            cuisines: [Cuisine::Italian].into_iter().collect(),
            ..Default::default()
        };
        let italian = filter_recipes(catalog.recipes(), &criteria);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let pick = random_pick(&italian, &mut rng).unwrap();
            assert_eq!(pick.cuisine, Cuisine::Italian);
        }
    }

    #[test]
    fn random_pick_of_nothing_is_none() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut rng = StdRng::seed_from_u64(7);
        assert!(random_pick(&[], &mut rng).is_none());
    }
}
