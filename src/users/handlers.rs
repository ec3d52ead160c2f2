use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::extractors::AdminUser,
    error::AppResult,
    state::AppState,
    users::repo_types::{User, UserInput},
};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(list_users))
        .route(
            "/admin/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

#[instrument(skip(state, admin), fields(admin_id = %admin.0.id))]
pub async fn list_users(State(state): State<AppState>, admin: AdminUser) -> Json<Vec<User>> {
    Json(state.users.list())
}

#[instrument(skip(state, admin), fields(admin_id = %admin.0.id))]
pub async fn get_user(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<User>> {
    Ok(Json(state.users.get(id)?))
}

#[instrument(skip(state, admin, payload), fields(admin_id = %admin.0.id))]
pub async fn update_user(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UserInput>,
) -> AppResult<Json<User>> {
    let user = state.users.update_user(id, payload)?;
    info!(admin_id = %admin.0.id, user_id = %id, "user updated by admin");
    Ok(Json(user))
}

#[instrument(skip(state, admin), fields(admin_id = %admin.0.id))]
pub async fn delete_user(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.users.delete_user(id)?;
    Ok(StatusCode::NO_CONTENT)
}
