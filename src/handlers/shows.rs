use axum::{extract::State, Json};

use crate::{
    error::ApiResult,
    services::listings::{self, ShowListing},
    state::AppState,
};

pub async fn list_shows(State(state): State<AppState>) -> ApiResult<Json<Vec<ShowListing>>> {
    Ok(Json(listings::list_shows(&state.db).await?))
}

/// Genre catalog offered by the create forms
pub async fn list_genres(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(listings::genre_catalog(&state.db).await?))
}
