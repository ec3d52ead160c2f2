use uuid::Uuid;

use crate::error::AppResult;
use crate::ratings::repo_types::{Rating, RatingInput};
use crate::store::Collection;

pub trait RatingRepo: Send + Sync {
    fn find_all(&self) -> Vec<Rating>;
    fn find_by_id(&self, id: Uuid) -> AppResult<Rating>;
    fn find_by_recipe(&self, recipe_id: Uuid) -> Vec<Rating>;
    fn find_by_user(&self, user_id: Uuid) -> Vec<Rating>;
    fn create(&self, recipe_id: Uuid, user_id: Uuid, input: RatingInput) -> Rating;
    fn update(&self, id: Uuid, input: RatingInput) -> AppResult<Rating>;
    fn delete(&self, id: Uuid) -> AppResult<()>;
}

#[derive(Default)]
pub struct InMemoryRatingRepo {
    ratings: Collection<Rating>,
}

impl InMemoryRatingRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RatingRepo for InMemoryRatingRepo {
    fn find_all(&self) -> Vec<Rating> {
        self.ratings.all()
    }

    fn find_by_id(&self, id: Uuid) -> AppResult<Rating> {
        self.ratings.get(id)
    }

    fn find_by_recipe(&self, recipe_id: Uuid) -> Vec<Rating> {
        self.ratings.filter(|r| r.recipe_id == recipe_id)
    }

    fn find_by_user(&self, user_id: Uuid) -> Vec<Rating> {
        self.ratings.filter(|r| r.user_id == user_id)
    }

    fn create(&self, recipe_id: Uuid, user_id: Uuid, input: RatingInput) -> Rating {
        self.ratings
            .insert_with(|id| Rating::new(id, recipe_id, user_id, input))
    }

    fn update(&self, id: Uuid, input: RatingInput) -> AppResult<Rating> {
        self.ratings
            .update_with(id, |original, _| Ok(original.updated(input)))
    }

    fn delete(&self, id: Uuid) -> AppResult<()> {
        self.ratings.remove(id).map(|_| ())
    }
}
