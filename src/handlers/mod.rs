pub mod artists;
pub mod health;
pub mod html;
pub mod shows;
pub mod venues;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Parse an id path segment. A segment that is not an `i32` cannot name any
/// venue or artist, so callers treat `None` the same as an unknown id.
pub(crate) fn entity_id(segment: &str) -> Option<i32> {
    segment.parse().ok()
}

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Venue endpoints
        .route("/venues", get(venues::list_venues))
        .route("/venues/search", get(venues::search_venues))
        .route("/venues/:id", get(venues::get_venue))

        // Artist endpoints
        .route("/artists", get(artists::list_artists))
        .route("/artists/search", get(artists::search_artists))
        .route("/artists/:id", get(artists::get_artist))

        // Shows and the genre catalog
        .route("/shows", get(shows::list_shows))
        .route("/genres", get(shows::list_genres))
}

pub fn html_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(html::index))

        // Venues
        .route("/venues", get(html::venues))
        .route("/venues/search", post(html::search_venues))
        .route(
            "/venues/create",
            get(html::create_venue_form).post(html::create_venue_submission),
        )
        .route("/venues/:id", get(html::show_venue).delete(html::delete_venue))
        .route("/venues/:id/edit", get(html::edit_venue).post(html::edit_venue))

        // Artists
        .route("/artists", get(html::artists))
        .route("/artists/search", post(html::search_artists))
        .route(
            "/artists/create",
            get(html::create_artist_form).post(html::create_artist_submission),
        )
        .route("/artists/:id", get(html::show_artist))
        .route("/artists/:id/edit", get(html::edit_artist).post(html::edit_artist))

        // Shows
        .route("/shows", get(html::shows))
        .route(
            "/shows/create",
            get(html::create_show_form).post(html::create_show_submission),
        )
}

/// Full application router without the outer middleware stack
pub fn app_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
        .merge(html_routes())
        .fallback(html::not_found)
}
