use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::ratings::repo::RatingRepo;
use crate::ratings::repo_types::{Rating, RatingInput};
use crate::recipes::services::RecipeService;

pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 5;

fn validate_score(input: &RatingInput) -> AppResult<()> {
    if !(MIN_SCORE..=MAX_SCORE).contains(&input.score) {
        return Err(AppError::Validation(format!(
            "Rating score must be between {MIN_SCORE} and {MAX_SCORE}"
        )));
    }
    Ok(())
}

fn average_score(ratings: &[Rating]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let total: i64 = ratings.iter().map(|r| i64::from(r.score)).sum();
    total as f64 / ratings.len() as f64
}

#[derive(Clone)]
pub struct RatingService {
    repo: Arc<dyn RatingRepo>,
    recipes: RecipeService,
}

impl RatingService {
    pub fn new(repo: Arc<dyn RatingRepo>, recipes: RecipeService) -> Self {
        Self { repo, recipes }
    }

    pub fn list(&self) -> Vec<Rating> {
        self.repo.find_all()
    }

    pub fn get(&self, id: Uuid) -> AppResult<Rating> {
        self.repo.find_by_id(id)
    }

    pub fn list_for_recipe(&self, recipe_id: Uuid) -> Vec<Rating> {
        self.repo.find_by_recipe(recipe_id)
    }

    pub fn list_for_user(&self, user_id: Uuid) -> Vec<Rating> {
        self.repo.find_by_user(user_id)
    }

    pub fn create_rating(
        &self,
        recipe_id: Uuid,
        user_id: Uuid,
        input: RatingInput,
    ) -> AppResult<Rating> {
        validate_score(&input)?;
        self.recipes.get(recipe_id)?;
        let rating = self.repo.create(recipe_id, user_id, input);
        info!(rating_id = %rating.id, %recipe_id, %user_id, score = rating.score, "rating created");
        Ok(rating)
    }

    pub fn update_rating(&self, id: Uuid, user_id: Uuid, input: RatingInput) -> AppResult<Rating> {
        validate_score(&input)?;
        self.owned(id, user_id)?;
        let rating = self.repo.update(id, input)?;
        info!(rating_id = %id, %user_id, score = rating.score, "rating updated");
        Ok(rating)
    }

    pub fn delete_rating(&self, id: Uuid, user_id: Uuid) -> AppResult<()> {
        self.owned(id, user_id)?;
        self.repo.delete(id)?;
        info!(rating_id = %id, %user_id, "rating deleted");
        Ok(())
    }

    /// Mean score of the recipe's ratings, 0 when it has none.
    pub fn average_rating(&self, recipe_id: Uuid) -> f64 {
        self.rating_summary(recipe_id).0
    }

    /// Average and count taken from one read of the recipe's ratings.
    pub fn rating_summary(&self, recipe_id: Uuid) -> (f64, usize) {
        let ratings = self.repo.find_by_recipe(recipe_id);
        (average_score(&ratings), ratings.len())
    }

    fn owned(&self, id: Uuid, user_id: Uuid) -> AppResult<Rating> {
        let rating = self.repo.find_by_id(id)?;
        if rating.user_id != user_id {
            warn!(rating_id = %id, owner = %rating.user_id, %user_id, "rating belongs to another user");
            return Err(AppError::Unauthorized(
                "unauthorized: rating belongs to another user".into(),
            ));
        }
        Ok(rating)
    }
}
