use uuid::Uuid;

use crate::error::AppResult;
use crate::recipes::repo_types::{Recipe, RecipeInput};
use crate::store::Collection;

pub trait RecipeRepo: Send + Sync {
    fn find_all(&self) -> Vec<Recipe>;
    fn find_by_id(&self, id: Uuid) -> AppResult<Recipe>;
    fn create(&self, input: RecipeInput) -> Recipe;
    fn update(&self, id: Uuid, input: RecipeInput) -> AppResult<Recipe>;
    fn delete(&self, id: Uuid) -> AppResult<()>;
}

#[derive(Default)]
pub struct InMemoryRecipeRepo {
    recipes: Collection<Recipe>,
}

impl InMemoryRecipeRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecipeRepo for InMemoryRecipeRepo {
    fn find_all(&self) -> Vec<Recipe> {
        self.recipes.all()
    }

    fn find_by_id(&self, id: Uuid) -> AppResult<Recipe> {
        self.recipes.get(id)
    }

    fn create(&self, input: RecipeInput) -> Recipe {
        self.recipes.insert_with(|id| Recipe::new(id, input))
    }

    fn update(&self, id: Uuid, input: RecipeInput) -> AppResult<Recipe> {
        self.recipes
            .update_with(id, |original, _| Ok(original.updated(input)))
    }

    fn delete(&self, id: Uuid) -> AppResult<()> {
        self.recipes.remove(id).map(|_| ())
    }
}
