use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::store::Entity;

/// Recipe record held by the recipe collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub prep_time: i32, // minutes
    pub cook_time: i32, // minutes
    pub servings: i32,
    pub tags: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Caller-supplied recipe fields; also the body of create and update.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeInput {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub tags: Vec<String>,
}

impl Recipe {
    pub fn new(id: Uuid, input: RecipeInput) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id,
            title: input.title,
            description: input.description,
            ingredients: input.ingredients,
            instructions: input.instructions,
            prep_time: input.prep_time,
            cook_time: input.cook_time,
            servings: input.servings,
            tags: input.tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces every field except `id` and `created_at`.
    pub fn updated(&self, input: RecipeInput) -> Self {
        Self {
            updated_at: OffsetDateTime::now_utc(),
            created_at: self.created_at,
            ..Self::new(self.id, input)
        }
    }

    /// Widened so extreme prep/cook values cannot overflow.
    pub fn total_time(&self) -> i64 {
        i64::from(self.prep_time) + i64::from(self.cook_time)
    }
}

impl Entity for Recipe {
    const KIND: &'static str = "recipe";

    fn id(&self) -> Uuid {
        self.id
    }
    fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }
}
