//! Write side: listing venues and artists and booking shows.
//!
//! Each operation runs in its own transaction. Any failure after `begin`
//! rolls the transaction back before the error is returned, so a failed
//! create never leaves a partial venue, artist, show or genre link behind.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use sea_orm::{DatabaseTransaction, Set, TransactionTrait};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::{
    db::{
        entities::{artist, show, venue},
        repositories::{ArtistRepository, GenreRepository, ShowRepository, VenueRepository},
    },
    error::{AppError, Result},
};

/// Fields submitted for a new venue.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VenueFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub facebook_link: String,
    #[serde(default)]
    pub image_link: Option<String>,
}

/// Fields submitted for a new artist.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub facebook_link: String,
    #[serde(default)]
    pub image_link: Option<String>,
}

fn required(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("Field '{}' is required", field)));
    }
    Ok(value.to_string())
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl VenueFields {
    fn into_active_model(self) -> Result<venue::ActiveModel> {
        Ok(venue::ActiveModel {
            name: Set(required("name", &self.name)?),
            city: Set(required("city", &self.city)?),
            state: Set(required("state", &self.state)?),
            address: Set(required("address", &self.address)?),
            phone: Set(required("phone", &self.phone)?),
            facebook_link: Set(required("facebook_link", &self.facebook_link)?),
            image_link: Set(optional(self.image_link.as_deref())),
            ..Default::default()
        })
    }
}

impl ArtistFields {
    fn into_active_model(self) -> Result<artist::ActiveModel> {
        Ok(artist::ActiveModel {
            name: Set(required("name", &self.name)?),
            city: Set(required("city", &self.city)?),
            state: Set(required("state", &self.state)?),
            phone: Set(required("phone", &self.phone)?),
            facebook_link: Set(required("facebook_link", &self.facebook_link)?),
            image_link: Set(optional(self.image_link.as_deref())),
            ..Default::default()
        })
    }
}

/// Trim genre names, drop blanks and collapse duplicates keeping the first
/// occurrence. Attaching the same genre twice is therefore a no-op.
pub fn normalize_genre_names(names: &[String]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(names.len());
    for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        if !unique.iter().any(|u| u == name) {
            unique.push(name.to_string());
        }
    }
    unique
}

/// Resolve genre names to ids by exact name. The first unknown name fails
/// the whole lookup.
async fn resolve_genres(txn: &DatabaseTransaction, names: &[String]) -> Result<Vec<i32>> {
    let genres = GenreRepository::new(txn);
    let mut ids = Vec::with_capacity(names.len());

    for name in names {
        match genres.find_by_name(name).await? {
            Some(genre) => ids.push(genre.id),
            None => {
                return Err(AppError::Validation(format!(
                    "Genre '{}' does not exist",
                    name
                )))
            }
        }
    }

    Ok(ids)
}

/// Parse a submitted show start time.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM[:SS]` and the `YYYY-MM-DDTHH:MM[:SS]`
/// value of an HTML `datetime-local` input. Values without an offset are
/// taken as UTC. The result is normalised to UTC.
pub fn parse_start_time(input: &str) -> Result<DateTime<FixedOffset>> {
    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];

    let input = input.trim();
    if input.is_empty() {
        return Err(AppError::Validation("Field 'start_time' is required".to_string()));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Ok(parsed.with_timezone(&Utc).fixed_offset());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .map(|naive| naive.and_utc().fixed_offset())
        .ok_or_else(|| AppError::Validation(format!("Invalid start time '{}'", input)))
}

/// Parse a submitted entity id.
pub fn parse_id(field: &str, input: &str) -> Result<i32> {
    input
        .trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("Field '{}' must be a numeric id", field)))
}

/// Commit on success, roll back on failure. A failed rollback is logged and
/// the original error is returned.
pub(crate) async fn finish<T>(txn: DatabaseTransaction, outcome: Result<T>) -> Result<T> {
    match outcome {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback_err) = txn.rollback().await {
                error!("Rollback failed: {}", rollback_err);
            }
            Err(e)
        }
    }
}

fn log_failure(what: &str, err: &AppError) {
    match err {
        AppError::Validation(_) | AppError::ReferentialIntegrity(_) => {
            warn!("{} rejected: {}", what, err)
        }
        _ => error!("{} failed: {}", what, err),
    }
}

async fn insert_venue(
    txn: &DatabaseTransaction,
    venue: venue::ActiveModel,
    genre_names: &[String],
) -> Result<venue::Model> {
    let genre_ids = resolve_genres(txn, genre_names).await?;
    let venue = VenueRepository::new(txn).create(venue).await?;
    GenreRepository::new(txn)
        .attach_to_venue(venue.id, &genre_ids)
        .await?;
    Ok(venue)
}

/// List a new venue and link it to the named genres.
pub async fn create_venue<C: TransactionTrait>(
    db: &C,
    fields: VenueFields,
    genre_names: &[String],
) -> Result<venue::Model> {
    let display_name = fields.name.trim().to_string();
    let result = async {
        let active = fields.into_active_model()?;
        let genre_names = normalize_genre_names(genre_names);
        let txn = db.begin().await?;
        let outcome = insert_venue(&txn, active, &genre_names).await;
        finish(txn, outcome).await
    }
    .await;

    match &result {
        Ok(venue) => info!("Venue {} ({}) listed", venue.name, venue.id),
        Err(e) => log_failure(&format!("Venue '{}'", display_name), e),
    }
    result
}

async fn insert_artist(
    txn: &DatabaseTransaction,
    artist: artist::ActiveModel,
    genre_names: &[String],
) -> Result<artist::Model> {
    let genre_ids = resolve_genres(txn, genre_names).await?;
    let artist = ArtistRepository::new(txn).create(artist).await?;
    GenreRepository::new(txn)
        .attach_to_artist(artist.id, &genre_ids)
        .await?;
    Ok(artist)
}

/// List a new artist and link it to the named genres.
pub async fn create_artist<C: TransactionTrait>(
    db: &C,
    fields: ArtistFields,
    genre_names: &[String],
) -> Result<artist::Model> {
    let display_name = fields.name.trim().to_string();
    let result = async {
        let active = fields.into_active_model()?;
        let genre_names = normalize_genre_names(genre_names);
        let txn = db.begin().await?;
        let outcome = insert_artist(&txn, active, &genre_names).await;
        finish(txn, outcome).await
    }
    .await;

    match &result {
        Ok(artist) => info!("Artist {} ({}) listed", artist.name, artist.id),
        Err(e) => log_failure(&format!("Artist '{}'", display_name), e),
    }
    result
}

async fn insert_show(
    txn: &DatabaseTransaction,
    artist_id: i32,
    venue_id: i32,
    start_time: DateTime<FixedOffset>,
) -> Result<show::Model> {
    let artist = ArtistRepository::new(txn).find_by_id(artist_id).await?;
    let venue = VenueRepository::new(txn).find_by_id(venue_id).await?;

    if artist.is_none() || venue.is_none() {
        return Err(AppError::ReferentialIntegrity(format!(
            "referenced artist or venue not found (artist_id={}, venue_id={})",
            artist_id, venue_id
        )));
    }

    ShowRepository::new(txn)
        .create(show::ActiveModel {
            start_time: Set(start_time.with_timezone(&Utc).fixed_offset()),
            artist_id: Set(artist_id),
            venue_id: Set(venue_id),
            ..Default::default()
        })
        .await
}

/// Book an artist into a venue. Both must already exist.
pub async fn create_show<C: TransactionTrait>(
    db: &C,
    artist_id: i32,
    venue_id: i32,
    start_time: DateTime<FixedOffset>,
) -> Result<show::Model> {
    let result = async {
        let txn = db.begin().await?;
        let outcome = insert_show(&txn, artist_id, venue_id, start_time).await;
        finish(txn, outcome).await
    }
    .await;

    match &result {
        Ok(show) => info!(
            "Show {} booked: artist {} at venue {} on {}",
            show.id, show.artist_id, show.venue_id, show.start_time
        ),
        Err(e) => log_failure(
            &format!("Show (artist {}, venue {})", artist_id, venue_id),
            e,
        ),
    }
    result
}
