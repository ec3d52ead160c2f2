use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::extractors::{AdminUser, AuthUser},
    error::{AppError, AppResult},
    ratings::{
        dto::AverageRatingResponse,
        repo_types::{Rating, RatingInput},
    },
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes/:id/ratings", get(list_ratings))
        .route("/recipes/:id/ratings/average", get(average_rating))
        .route("/recipes/:id/ratings/:rating_id", get(get_rating))
}

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/me/ratings", get(my_ratings))
        .route("/admin/ratings", get(all_ratings))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes/:id/ratings", post(create_rating))
        .route(
            "/recipes/:id/ratings/:rating_id",
            put(update_rating).delete(delete_rating),
        )
}

#[instrument(skip(state))]
pub async fn list_ratings(
    State(state): State<AppState>,
    Path(recipe_id): Path<Uuid>,
) -> Json<Vec<Rating>> {
    Json(state.ratings.list_for_recipe(recipe_id))
}

#[instrument(skip(state))]
pub async fn get_rating(
    State(state): State<AppState>,
    Path((recipe_id, rating_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<Rating>> {
    Ok(Json(rating_in_recipe(&state, recipe_id, rating_id)?))
}

/// The rating at `rating_id`, provided it was left on `recipe_id`.
fn rating_in_recipe(state: &AppState, recipe_id: Uuid, rating_id: Uuid) -> AppResult<Rating> {
    let rating = state.ratings.get(rating_id)?;
    if rating.recipe_id != recipe_id {
        return Err(AppError::NotFound("rating"));
    }
    Ok(rating)
}

#[instrument(skip(state))]
pub async fn average_rating(
    State(state): State<AppState>,
    Path(recipe_id): Path<Uuid>,
) -> Json<AverageRatingResponse> {
    let (average, count) = state.ratings.rating_summary(recipe_id);
    Json(AverageRatingResponse {
        recipe_id,
        average,
        count,
    })
}

#[instrument(skip(state, payload), fields(user_id = %user.id))]
pub async fn create_rating(
    State(state): State<AppState>,
    user: AuthUser,
    Path(recipe_id): Path<Uuid>,
    Json(payload): Json<RatingInput>,
) -> AppResult<(StatusCode, Json<Rating>)> {
    let rating = state.ratings.create_rating(recipe_id, user.id, payload)?;
    Ok((StatusCode::CREATED, Json(rating)))
}

#[instrument(skip(state, payload), fields(user_id = %user.id))]
pub async fn update_rating(
    State(state): State<AppState>,
    user: AuthUser,
    Path((recipe_id, rating_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<RatingInput>,
) -> AppResult<Json<Rating>> {
    rating_in_recipe(&state, recipe_id, rating_id)?;
    Ok(Json(state.ratings.update_rating(rating_id, user.id, payload)?))
}

#[instrument(skip(state), fields(user_id = %user.id))]
pub async fn delete_rating(
    State(state): State<AppState>,
    user: AuthUser,
    Path((recipe_id, rating_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    rating_in_recipe(&state, recipe_id, rating_id)?;
    state.ratings.delete_rating(rating_id, user.id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state), fields(user_id = %user.id))]
pub async fn my_ratings(State(state): State<AppState>, user: AuthUser) -> Json<Vec<Rating>> {
    Json(state.ratings.list_for_user(user.id))
}

#[instrument(skip(state, admin), fields(admin_id = %admin.0.id))]
pub async fn all_ratings(State(state): State<AppState>, admin: AdminUser) -> Json<Vec<Rating>> {
    Json(state.ratings.list())
}
