use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::AppResult;
use crate::recipes::repo::RecipeRepo;
use crate::recipes::repo_types::{Recipe, RecipeInput};

/// Sort criteria accepted by `RecipeService::sort_recipes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    PrepTime,
    CookTime,
    TotalTime,
    Title,
    Servings,
}

impl From<&str> for SortBy {
    /// Case-insensitive; anything unrecognized sorts by title.
    fn from(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "preptime" => SortBy::PrepTime,
            "cooktime" => SortBy::CookTime,
            "totaltime" => SortBy::TotalTime,
            "servings" => SortBy::Servings,
            _ => SortBy::Title,
        }
    }
}

impl SortBy {
    fn compare(self, a: &Recipe, b: &Recipe) -> Ordering {
        match self {
            SortBy::PrepTime => a.prep_time.cmp(&b.prep_time),
            SortBy::CookTime => a.cook_time.cmp(&b.cook_time),
            SortBy::TotalTime => a.total_time().cmp(&b.total_time()),
            SortBy::Title => a.title.cmp(&b.title),
            SortBy::Servings => a.servings.cmp(&b.servings),
        }
    }
}

#[derive(Clone)]
pub struct RecipeService {
    repo: Arc<dyn RecipeRepo>,
}

impl RecipeService {
    pub fn new(repo: Arc<dyn RecipeRepo>) -> Self {
        Self { repo }
    }

    pub fn list(&self) -> Vec<Recipe> {
        self.repo.find_all()
    }

    pub fn get(&self, id: Uuid) -> AppResult<Recipe> {
        self.repo.find_by_id(id)
    }

    pub fn create(&self, input: RecipeInput) -> Recipe {
        let recipe = self.repo.create(input);
        info!(recipe_id = %recipe.id, title = %recipe.title, "recipe created");
        recipe
    }

    pub fn update(&self, id: Uuid, input: RecipeInput) -> AppResult<Recipe> {
        let recipe = self.repo.update(id, input)?;
        info!(recipe_id = %id, "recipe updated");
        Ok(recipe)
    }

    /// Ratings of the recipe are left in place.
    pub fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repo.delete(id)?;
        info!(recipe_id = %id, "recipe deleted");
        Ok(())
    }

    /// Recipes carrying exactly `tag`.
    pub fn filter_by_tag(&self, tag: &str) -> Vec<Recipe> {
        self.repo
            .find_all()
            .into_iter()
            .filter(|r| r.tags.iter().any(|t| t == tag))
            .collect()
    }

    /// Sorted copy of every recipe. Ties keep collection order.
    pub fn sort_recipes(&self, by: SortBy, ascending: bool) -> Vec<Recipe> {
        let mut recipes = self.repo.find_all();
        recipes.sort_by(|a, b| {
            let ord = by.compare(a, b);
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        });
        debug!(?by, ascending, count = recipes.len(), "recipes sorted");
        recipes
    }
}
