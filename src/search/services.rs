use tracing::debug;

use crate::recipes::repo_types::Recipe;
use crate::recipes::services::RecipeService;

/// Read-only queries over the full recipe collection.
#[derive(Clone)]
pub struct SearchService {
    recipes: RecipeService,
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

impl SearchService {
    pub fn new(recipes: RecipeService) -> Self {
        Self { recipes }
    }

    pub fn search_by_ingredient(&self, ingredient: &str) -> Vec<Recipe> {
        let needle = ingredient.to_lowercase();
        self.recipes
            .list()
            .into_iter()
            .filter(|r| r.ingredients.iter().any(|i| contains_ignore_case(i, &needle)))
            .collect()
    }

    pub fn search_by_tag(&self, tag: &str) -> Vec<Recipe> {
        self.recipes.filter_by_tag(tag)
    }

    pub fn search_by_title(&self, title: &str) -> Vec<Recipe> {
        let needle = title.to_lowercase();
        self.recipes
            .list()
            .into_iter()
            .filter(|r| contains_ignore_case(&r.title, &needle))
            .collect()
    }

    /// One page of recipes in collection order. `page` is 1-indexed; pages
    /// past the end are empty.
    pub fn paginate(&self, page: usize, page_size: usize) -> Vec<Recipe> {
        let all = self.recipes.list();
        let start = page.saturating_sub(1).saturating_mul(page_size);
        if start >= all.len() {
            return Vec::new();
        }
        let end = start.saturating_add(page_size).min(all.len());
        debug!(page, page_size, start, end, total = all.len(), "paginate");
        all[start..end].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;
    use crate::recipes::{repo::InMemoryRecipeRepo, repo_types::RecipeInput};

    fn setup() -> (SearchService, RecipeService) {
        let recipes = RecipeService::new(Arc::new(InMemoryRecipeRepo::new()));
        (SearchService::new(recipes.clone()), recipes)
    }

    fn add(recipes: &RecipeService, title: &str, ingredients: &[&str], tags: &[&str]) {
        recipes.create(RecipeInput {
            title: title.into(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        });
    }

    fn titles(recipes: &[Recipe]) -> Vec<String> {
        let mut t: Vec<String> = recipes.iter().map(|r| r.title.clone()).collect();
        t.sort();
        t
    }

    #[test]
    fn ingredient_search_is_case_insensitive_substring() {
        let (search, recipes) = setup();
        add(&recipes, "Carbonara", &["Spaghetti", "Pancetta", "Eggs"], &[]);
        add(&recipes, "Omelette", &["eggs", "butter"], &[]);
        add(&recipes, "Salad", &["Lettuce"], &[]);

        assert_eq!(titles(&search.search_by_ingredient("EGG")), vec!["Carbonara", "Omelette"]);
        assert_eq!(titles(&search.search_by_ingredient("ghett")), vec!["Carbonara"]);
        assert!(search.search_by_ingredient("tofu").is_empty());
    }

    #[test]
    fn title_search_is_case_insensitive_substring() {
        let (search, recipes) = setup();
        add(&recipes, "Beef Stew", &[], &[]);
        add(&recipes, "Pasta Carbonara", &[], &[]);
        add(&recipes, "Quick Salad", &[], &[]);

        assert_eq!(titles(&search.search_by_title("stew")), vec!["Beef Stew"]);
        assert_eq!(titles(&search.search_by_title("S")).len(), 3);
        assert!(search.search_by_title("soup").is_empty());
    }

    #[test]
    fn tag_search_is_exact() {
        let (search, recipes) = setup();
        add(&recipes, "Pho", &[], &["soup", "vietnamese"]);
        add(&recipes, "Soup of the day", &[], &["soups"]);
        assert_eq!(titles(&search.search_by_tag("soup")), vec!["Pho"]);
    }

    #[test]
    fn pagination_slices_collection_order() {
        let (search, recipes) = setup();
        for i in 1..=5 {
            add(&recipes, &format!("Recipe {i}"), &[], &[]);
        }
        let all = recipes.list();
        assert_eq!(all.len(), 5);

        assert_eq!(search.paginate(1, 2), all[0..2].to_vec());
        assert_eq!(search.paginate(2, 2), all[2..4].to_vec());
        assert_eq!(search.paginate(3, 2), all[4..5].to_vec());
        assert!(search.paginate(4, 2).is_empty());
        assert_eq!(search.paginate(1, 100).len(), 5);
    }

    #[test]
    fn pagination_is_stable_across_calls() {
        let (search, recipes) = setup();
        for i in 0..8 {
            add(&recipes, &format!("R{i}"), &[], &[]);
        }
        assert_eq!(search.paginate(2, 3), search.paginate(2, 3));
        let seen: HashSet<_> = (1..=3).flat_map(|p| search.paginate(p, 3)).map(|r| r.id).collect();
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn pagination_of_empty_collection() {
        let (search, _) = setup();
        assert!(search.paginate(1, 10).is_empty());
    }
}
