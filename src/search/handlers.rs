use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    error::AppResult,
    recipes::repo_types::Recipe,
    search::dto::{Pagination, SearchQuery},
    state::AppState,
};

pub fn search_routes() -> Router<AppState> {
    Router::new()
        .route("/search/ingredient", get(search_by_ingredient))
        .route("/search/tag", get(search_by_tag))
        .route("/search/title", get(search_by_title))
        .route("/search/paginated", get(paginated))
}

#[instrument(skip(state))]
pub async fn search_by_ingredient(
    State(state): State<AppState>,
    Query(q): Query<SearchQuery>,
) -> AppResult<Json<Vec<Recipe>>> {
    Ok(Json(state.search.search_by_ingredient(q.term()?)))
}

#[instrument(skip(state))]
pub async fn search_by_tag(
    State(state): State<AppState>,
    Query(q): Query<SearchQuery>,
) -> AppResult<Json<Vec<Recipe>>> {
    Ok(Json(state.search.search_by_tag(q.term()?)))
}

#[instrument(skip(state))]
pub async fn search_by_title(
    State(state): State<AppState>,
    Query(q): Query<SearchQuery>,
) -> AppResult<Json<Vec<Recipe>>> {
    Ok(Json(state.search.search_by_title(q.term()?)))
}

#[instrument(skip(state))]
pub async fn paginated(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> AppResult<Json<Vec<Recipe>>> {
    Ok(Json(state.search.paginate(p.page()?, p.page_size()?)))
}
