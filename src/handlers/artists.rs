use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;

use super::{entity_id, venues::SearchQuery};
use crate::{
    db::enums::EntityKind,
    error::{ApiResult, AppError},
    services::listings::{self, ArtistDetail, ArtistListing, SearchResults},
    state::AppState,
};

pub async fn list_artists(State(state): State<AppState>) -> ApiResult<Json<Vec<ArtistListing>>> {
    Ok(Json(listings::list_artists(&state.db).await?))
}

pub async fn search_artists(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<SearchResults>> {
    let results =
        listings::search_entities(&state.db, EntityKind::Artist, &query.search_term, Utc::now())
            .await?;
    Ok(Json(results))
}

pub async fn get_artist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ArtistDetail>> {
    let artist = match entity_id(&id) {
        Some(id) => listings::artist_detail(&state.db, id, Utc::now()).await?,
        None => None,
    }
    .ok_or_else(|| AppError::NotFound("no artist with that id".to_string()))?;
    Ok(Json(artist))
}
