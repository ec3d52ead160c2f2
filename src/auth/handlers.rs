use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, instrument};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse},
        extractors::AuthUser,
    },
    error::{AppError, AppResult},
    state::AppState,
    users::repo_types::{User, UserInput},
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

/// Self-registration always yields the default role.
#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<UserInput>,
) -> AppResult<(StatusCode, Json<User>)> {
    payload.role = None;
    let user = state.users.create_user(payload)?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let token = state
        .auth
        .authenticate(payload.username.trim(), &payload.password)?;
    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer",
        expires_in: state.auth.token_ttl().as_secs(),
    }))
}

#[instrument(skip(state))]
pub async fn get_me(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<User>> {
    state.users.get(user.id).map(Json).map_err(|e| {
        error!(error = %e, user_id = %user.id, "user not found");
        AppError::Unauthorized("User not found".into())
    })
}
