use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
};
use axum_extra::extract::Form;
use chrono::Utc;
use serde::Deserialize;

use super::entity_id;
use crate::{
    db::enums::EntityKind,
    error::{AppError, Result},
    services::{
        bookings::{self, ArtistFields, VenueFields},
        listings,
    },
    state::AppState,
    templates::{
        artist_page, artists_page, home_page, missing_entity_page, new_artist_form,
        new_show_form, new_venue_form, search_page, shows_page, venue_page, venues_page, Flash,
    },
};

#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

/// Venue form body: the venue's own fields plus any number of `genres` keys.
#[derive(Debug, Default, Deserialize)]
pub struct VenueSubmission {
    #[serde(flatten)]
    pub fields: VenueFields,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ArtistSubmission {
    #[serde(flatten)]
    pub fields: ArtistFields,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ShowSubmission {
    #[serde(default)]
    pub artist_id: String,
    #[serde(default)]
    pub venue_id: String,
    #[serde(default)]
    pub start_time: String,
}

/// Home page, re-rendered with a flash after every create submission
fn home_with_flash(status: StatusCode, flash: Flash) -> (StatusCode, Html<String>) {
    (status, Html(home_page(Some(&flash)).into_string()))
}

pub async fn index() -> Html<String> {
    Html(home_page(None).into_string())
}

pub async fn venues(State(state): State<AppState>) -> Result<Html<String>> {
    let areas = listings::list_venues_grouped(&state.db, Utc::now()).await?;
    Ok(Html(venues_page(&areas).into_string()))
}

pub async fn search_venues(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>> {
    let results =
        listings::search_entities(&state.db, EntityKind::Venue, &form.search_term, Utc::now())
            .await?;
    Ok(Html(
        search_page(EntityKind::Venue, &form.search_term, &results).into_string(),
    ))
}

pub async fn show_venue(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Html<String>)> {
    let venue = match entity_id(&id) {
        Some(id) => listings::venue_detail(&state.db, id, Utc::now()).await?,
        None => None,
    };

    match venue {
        Some(venue) => Ok((StatusCode::OK, Html(venue_page(&venue).into_string()))),
        None => Ok((
            StatusCode::NOT_FOUND,
            Html(missing_entity_page(EntityKind::Venue).into_string()),
        )),
    }
}

pub async fn create_venue_form(State(state): State<AppState>) -> Result<Html<String>> {
    let genres = listings::genre_catalog(&state.db).await?;
    Ok(Html(new_venue_form(&genres).into_string()))
}

pub async fn create_venue_submission(
    State(state): State<AppState>,
    Form(submission): Form<VenueSubmission>,
) -> (StatusCode, Html<String>) {
    let name = submission.fields.name.clone();

    match bookings::create_venue(&state.db, submission.fields, &submission.genres).await {
        Ok(venue) => home_with_flash(
            StatusCode::OK,
            Flash::success(format!("Venue {} was successfully listed!", venue.name)),
        ),
        Err(e) => home_with_flash(
            e.status_code(),
            Flash::error(format!(
                "An error occurred. Venue {} could not be listed. {}",
                name,
                e.user_message()
            )),
        ),
    }
}

pub async fn artists(State(state): State<AppState>) -> Result<Html<String>> {
    let artists = listings::list_artists(&state.db).await?;
    Ok(Html(artists_page(&artists).into_string()))
}

pub async fn search_artists(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>> {
    let results =
        listings::search_entities(&state.db, EntityKind::Artist, &form.search_term, Utc::now())
            .await?;
    Ok(Html(
        search_page(EntityKind::Artist, &form.search_term, &results).into_string(),
    ))
}

pub async fn show_artist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Html<String>)> {
    let artist = match entity_id(&id) {
        Some(id) => listings::artist_detail(&state.db, id, Utc::now()).await?,
        None => None,
    };

    match artist {
        Some(artist) => Ok((StatusCode::OK, Html(artist_page(&artist).into_string()))),
        None => Ok((
            StatusCode::NOT_FOUND,
            Html(missing_entity_page(EntityKind::Artist).into_string()),
        )),
    }
}

pub async fn create_artist_form(State(state): State<AppState>) -> Result<Html<String>> {
    let genres = listings::genre_catalog(&state.db).await?;
    Ok(Html(new_artist_form(&genres).into_string()))
}

pub async fn create_artist_submission(
    State(state): State<AppState>,
    Form(submission): Form<ArtistSubmission>,
) -> (StatusCode, Html<String>) {
    let name = submission.fields.name.clone();

    match bookings::create_artist(&state.db, submission.fields, &submission.genres).await {
        Ok(artist) => home_with_flash(
            StatusCode::OK,
            Flash::success(format!("Artist {} was successfully listed!", artist.name)),
        ),
        Err(e) => home_with_flash(
            e.status_code(),
            Flash::error(format!(
                "An error occurred. Artist {} could not be listed. {}",
                name,
                e.user_message()
            )),
        ),
    }
}

pub async fn shows(State(state): State<AppState>) -> Result<Html<String>> {
    let shows = listings::list_shows(&state.db).await?;
    Ok(Html(shows_page(&shows).into_string()))
}

pub async fn create_show_form() -> Html<String> {
    Html(new_show_form().into_string())
}

pub async fn create_show_submission(
    State(state): State<AppState>,
    Form(submission): Form<ShowSubmission>,
) -> (StatusCode, Html<String>) {
    let result = async {
        let artist_id = bookings::parse_id("artist_id", &submission.artist_id)?;
        let venue_id = bookings::parse_id("venue_id", &submission.venue_id)?;
        let start_time = bookings::parse_start_time(&submission.start_time)?;
        bookings::create_show(&state.db, artist_id, venue_id, start_time).await
    }
    .await;

    match result {
        Ok(_) => home_with_flash(
            StatusCode::OK,
            Flash::success("Show was successfully listed!"),
        ),
        Err(e) => home_with_flash(
            e.status_code(),
            Flash::error(format!(
                "An error occurred. Show could not be listed. {}",
                e.user_message()
            )),
        ),
    }
}

// Editing and deleting listings is not offered.

pub async fn edit_venue(Path(id): Path<String>) -> Result<Html<String>> {
    Err(AppError::NotImplemented(format!("Editing venue {} is not available", id)))
}

pub async fn edit_artist(Path(id): Path<String>) -> Result<Html<String>> {
    Err(AppError::NotImplemented(format!("Editing artist {} is not available", id)))
}

pub async fn delete_venue(Path(id): Path<String>) -> Result<Html<String>> {
    Err(AppError::NotImplemented(format!("Deleting venue {} is not available", id)))
}

pub async fn not_found() -> AppError {
    AppError::NotFound("The page you requested does not exist".to_string())
}
