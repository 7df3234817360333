use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use super::entity_id;
use crate::{
    db::enums::EntityKind,
    error::{ApiResult, AppError},
    services::listings::{self, SearchResults, VenueArea, VenueDetail},
    state::AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search_term: String,
}

/// All venues grouped by area
pub async fn list_venues(State(state): State<AppState>) -> ApiResult<Json<Vec<VenueArea>>> {
    let areas = listings::list_venues_grouped(&state.db, Utc::now()).await?;
    Ok(Json(areas))
}

pub async fn search_venues(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<SearchResults>> {
    let results =
        listings::search_entities(&state.db, EntityKind::Venue, &query.search_term, Utc::now())
            .await?;
    Ok(Json(results))
}

pub async fn get_venue(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<VenueDetail>> {
    let venue = match entity_id(&id) {
        Some(id) => listings::venue_detail(&state.db, id, Utc::now()).await?,
        None => None,
    }
    .ok_or_else(|| AppError::NotFound("no venue with that id".to_string()))?;
    Ok(Json(venue))
}
