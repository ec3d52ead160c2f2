use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::extractors::AuthUser,
    error::AppResult,
    recipes::{dto::SortQuery, repo_types::{Recipe, RecipeInput}},
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes))
        .route("/recipes/:id", get(get_recipe))
        .route("/sort/recipes", get(sort_recipes))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", post(create_recipe))
        .route("/recipes/:id", put(update_recipe).delete(delete_recipe))
}

#[instrument(skip(state))]
pub async fn list_recipes(State(state): State<AppState>) -> Json<Vec<Recipe>> {
    Json(state.recipes.list())
}

#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Recipe>> {
    Ok(Json(state.recipes.get(id)?))
}

#[instrument(skip(state, payload), fields(user_id = %user.id))]
pub async fn create_recipe(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<RecipeInput>,
) -> (StatusCode, Json<Recipe>) {
    (StatusCode::CREATED, Json(state.recipes.create(payload)))
}

#[instrument(skip(state, payload), fields(user_id = %user.id))]
pub async fn update_recipe(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecipeInput>,
) -> AppResult<Json<Recipe>> {
    Ok(Json(state.recipes.update(id, payload)?))
}

#[instrument(skip(state), fields(user_id = %user.id))]
pub async fn delete_recipe(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.recipes.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn sort_recipes(
    State(state): State<AppState>,
    Query(q): Query<SortQuery>,
) -> Json<Vec<Recipe>> {
    Json(state.recipes.sort_recipes(q.sort_by(), q.ascending()))
}
