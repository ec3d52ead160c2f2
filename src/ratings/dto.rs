use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageRatingResponse {
    pub recipe_id: Uuid,
    pub average: f64,
    pub count: usize,
}
