use crate::model::Recipe;

/// Recipes most like `reference_id`, best first.
///
/// Score is the number of the candidate's tags shared with the reference, plus
/// one when the cuisine matches. Equal scores keep collection order. An
/// unknown reference yields nothing.
pub fn similar_recipes<'a>(
    recipes: &'a [Recipe],
    reference_id: &str,
    limit: usize,
) -> Vec<&'a Recipe> {
    let Some(reference) = recipes.iter().find(|r| r.id == reference_id) else {
        return Vec::new();
    };

    let mut scored: Vec<(usize, &Recipe)> = recipes
        .iter()
        .filter(|r| r.id != reference_id)
        .map(|r| (similarity(reference, r), r))
        .collect();

    // sort_by is stable, which is what gives the collection-order tie-break
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().take(limit).map(|(_, r)| r).collect()
}

/// Shared-tag count plus one for a cuisine match.
pub fn similarity(reference: &Recipe, candidate: &Recipe) -> usize {
    let shared = candidate
        .tags
        .iter()
        .filter(|t| reference.tags.contains(t))
        .count();
    shared + usize::from(candidate.cuisine == reference.cuisine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RecipeCatalog;

    #[test]
    fn scores_shared_tags_plus_cuisine() {
        let catalog = RecipeCatalog::builtin().unwrap();
        let mut a = catalog.get("1").unwrap().clone();
        let mut b = catalog.get("6").unwrap().clone();
        a.tags = vec!["Italian".into(), "Vegetarian".into()];
        b.tags = vec!["Italian".into(), "Dinner".into()];
        assert_eq!(similarity(&a, &b), 2);
    }

    #[test]
    fn ranks_best_first_with_collection_order_ties() {
        let catalog = RecipeCatalog::builtin().unwrap();
        let similar = similar_recipes(catalog.recipes(), "1", 3);
        let ids: Vec<&str> = similar.iter().map(|r| r.id.as_str()).collect();
        // pizza scores 3; toast, coq au vin and curry all score 1
        assert_eq!(ids, vec!["6", "3", "4"]);
    }

    #[test]
    fn never_includes_the_reference() {
        let catalog = RecipeCatalog::builtin().unwrap();
        let similar = similar_recipes(catalog.recipes(), "2", 10);
        assert_eq!(similar.len(), 5);
        assert!(similar.iter().all(|r| r.id != "2"));
    }

    #[test]
    fn unknown_reference_or_empty_collection_is_empty() {
        let catalog = RecipeCatalog::builtin().unwrap();
        assert!(similar_recipes(catalog.recipes(), "missing", 3).is_empty());
        assert!(similar_recipes(&[], "1", 3).is_empty());
    }
}
