use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::store::Entity;

/// A user's star rating of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: Uuid,
    pub recipe_id: Uuid,
    pub user_id: Uuid, // owner, fixed at creation
    pub score: i32,    // 1-5 stars
    pub comment: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RatingInput {
    pub score: i32,
    pub comment: String,
}

impl Rating {
    pub fn new(id: Uuid, recipe_id: Uuid, user_id: Uuid, input: RatingInput) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id,
            recipe_id,
            user_id,
            score: input.score,
            comment: input.comment,
            created_at: now,
            updated_at: now,
        }
    }

    /// New score and comment; id, recipe, owner and creation time carry over.
    pub fn updated(&self, input: RatingInput) -> Self {
        Self {
            score: input.score,
            comment: input.comment,
            updated_at: OffsetDateTime::now_utc(),
            ..self.clone()
        }
    }
}

impl Entity for Rating {
    const KIND: &'static str = "rating";

    fn id(&self) -> Uuid {
        self.id
    }
    fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }
}
