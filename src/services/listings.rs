//! Read side: grouped venue listing, name search and detail pages.
//!
//! Every operation takes the reference time `now` from its caller so one
//! request splits past and upcoming shows against a single instant.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::{
    db::{
        entities::venue,
        enums::EntityKind,
        repositories::{ArtistRepository, GenreRepository, ShowRepository, VenueRepository},
    },
    error::Result,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitySummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// Venues sharing one `(state, city)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<EntitySummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<EntitySummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistListing {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListing {
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<FixedOffset>,
}

/// A show as seen from the venue page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueShow {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<FixedOffset>,
}

/// A show as seen from the artist page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistShow {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueDetail {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub facebook_link: String,
    pub image_link: Option<String>,
    pub past_shows: Vec<VenueShow>,
    pub upcoming_shows: Vec<VenueShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistDetail {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub facebook_link: String,
    pub image_link: Option<String>,
    pub past_shows: Vec<ArtistShow>,
    pub upcoming_shows: Vec<ArtistShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EntityDetail {
    Venue(VenueDetail),
    Artist(ArtistDetail),
}

/// A show is upcoming when it starts at or after `now`.
pub fn is_upcoming(start_time: &DateTime<FixedOffset>, now: DateTime<Utc>) -> bool {
    *start_time >= now
}

/// Split items into `(past, upcoming)` preserving their order.
pub fn split_past_upcoming<T, F>(items: Vec<T>, now: DateTime<Utc>, start_time: F) -> (Vec<T>, Vec<T>)
where
    F: Fn(&T) -> &DateTime<FixedOffset>,
{
    items
        .into_iter()
        .partition(|item| !is_upcoming(start_time(item), now))
}

/// Count upcoming shows per owner id from `(owner_id, start_time)` pairs.
pub fn count_upcoming(
    start_times: &[(i32, DateTime<FixedOffset>)],
    now: DateTime<Utc>,
) -> HashMap<i32, usize> {
    let mut counts = HashMap::new();
    for (owner_id, start_time) in start_times {
        if is_upcoming(start_time, now) {
            *counts.entry(*owner_id).or_insert(0) += 1;
        }
    }
    counts
}

/// Group venues into areas in a single pass.
///
/// Rows are sorted on `(state, lowercase city, id)` and a new area starts
/// whenever `(state, lowercase city)` changes, so the sort key and the
/// grouping key are the same and an area is never split. The area keeps the
/// city spelling of its first venue.
pub fn group_by_area(mut venues: Vec<venue::Model>, upcoming: &HashMap<i32, usize>) -> Vec<VenueArea> {
    venues.sort_by_cached_key(|v| (v.state.clone(), v.city.to_lowercase(), v.id));

    let mut areas: Vec<VenueArea> = Vec::new();
    let mut current_key: Option<(String, String)> = None;

    for venue in venues {
        let key = (venue.state.clone(), venue.city.to_lowercase());
        if current_key.as_ref() != Some(&key) {
            areas.push(VenueArea {
                city: venue.city,
                state: venue.state,
                venues: Vec::new(),
            });
            current_key = Some(key);
        }

        if let Some(area) = areas.last_mut() {
            area.venues.push(EntitySummary {
                id: venue.id,
                num_upcoming_shows: upcoming.get(&venue.id).copied().unwrap_or(0),
                name: venue.name,
            });
        }
    }

    areas
}

pub async fn list_venues_grouped<C: ConnectionTrait>(db: &C, now: DateTime<Utc>) -> Result<Vec<VenueArea>> {
    let venues = VenueRepository::new(db).all().await?;
    let start_times = ShowRepository::new(db).venue_start_times(None).await?;
    let upcoming = count_upcoming(&start_times, now);

    Ok(group_by_area(venues, &upcoming))
}

/// Case-insensitive substring search on venue or artist names, ordered by id.
pub async fn search_entities<C: ConnectionTrait>(
    db: &C,
    kind: EntityKind,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchResults> {
    let shows = ShowRepository::new(db);

    let (matches, start_times): (Vec<(i32, String)>, _) = match kind {
        EntityKind::Venue => {
            let venues = VenueRepository::new(db).search_by_name(term).await?;
            let start_times = shows.venue_start_times(Some(term)).await?;
            (venues.into_iter().map(|v| (v.id, v.name)).collect(), start_times)
        }
        EntityKind::Artist => {
            let artists = ArtistRepository::new(db).search_by_name(term).await?;
            let start_times = shows.artist_start_times(Some(term)).await?;
            (artists.into_iter().map(|a| (a.id, a.name)).collect(), start_times)
        }
    };

    let upcoming = count_upcoming(&start_times, now);
    let data: Vec<EntitySummary> = matches
        .into_iter()
        .map(|(id, name)| EntitySummary {
            id,
            name,
            num_upcoming_shows: upcoming.get(&id).copied().unwrap_or(0),
        })
        .collect();

    Ok(SearchResults {
        count: data.len(),
        data,
    })
}

pub async fn venue_detail<C: ConnectionTrait>(
    db: &C,
    id: i32,
    now: DateTime<Utc>,
) -> Result<Option<VenueDetail>> {
    let Some(venue) = VenueRepository::new(db).find_by_id(id).await? else {
        return Ok(None);
    };

    let genres = GenreRepository::new(db).names_for_venue(id).await?;
    let shows: Vec<VenueShow> = ShowRepository::new(db)
        .for_venue(id)
        .await?
        .into_iter()
        .map(|(show, artist)| VenueShow {
            artist_id: artist.id,
            artist_name: artist.name,
            artist_image_link: artist.image_link,
            start_time: show.start_time,
        })
        .collect();
    let (past_shows, upcoming_shows) = split_past_upcoming(shows, now, |s| &s.start_time);

    Ok(Some(VenueDetail {
        id: venue.id,
        name: venue.name,
        genres,
        address: venue.address,
        city: venue.city,
        state: venue.state,
        phone: venue.phone,
        facebook_link: venue.facebook_link,
        image_link: venue.image_link,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }))
}

pub async fn artist_detail<C: ConnectionTrait>(
    db: &C,
    id: i32,
    now: DateTime<Utc>,
) -> Result<Option<ArtistDetail>> {
    let Some(artist) = ArtistRepository::new(db).find_by_id(id).await? else {
        return Ok(None);
    };

    let genres = GenreRepository::new(db).names_for_artist(id).await?;
    let shows: Vec<ArtistShow> = ShowRepository::new(db)
        .for_artist(id)
        .await?
        .into_iter()
        .map(|(show, venue)| ArtistShow {
            venue_id: venue.id,
            venue_name: venue.name,
            venue_image_link: venue.image_link,
            start_time: show.start_time,
        })
        .collect();
    let (past_shows, upcoming_shows) = split_past_upcoming(shows, now, |s| &s.start_time);

    Ok(Some(ArtistDetail {
        id: artist.id,
        name: artist.name,
        genres,
        city: artist.city,
        state: artist.state,
        phone: artist.phone,
        facebook_link: artist.facebook_link,
        image_link: artist.image_link,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }))
}

/// Detail of a venue or artist; `Ok(None)` when the id does not resolve.
pub async fn entity_detail<C: ConnectionTrait>(
    db: &C,
    kind: EntityKind,
    id: i32,
    now: DateTime<Utc>,
) -> Result<Option<EntityDetail>> {
    Ok(match kind {
        EntityKind::Venue => venue_detail(db, id, now).await?.map(EntityDetail::Venue),
        EntityKind::Artist => artist_detail(db, id, now).await?.map(EntityDetail::Artist),
    })
}

pub async fn list_artists<C: ConnectionTrait>(db: &C) -> Result<Vec<ArtistListing>> {
    Ok(ArtistRepository::new(db)
        .all()
        .await?
        .into_iter()
        .map(|a| ArtistListing { id: a.id, name: a.name })
        .collect())
}

pub async fn list_shows<C: ConnectionTrait>(db: &C) -> Result<Vec<ShowListing>> {
    Ok(ShowRepository::new(db)
        .all_with_parties()
        .await?
        .into_iter()
        .map(|s| ShowListing {
            venue_id: s.venue_id,
            venue_name: s.venue_name,
            artist_id: s.artist_id,
            artist_name: s.artist_name,
            artist_image_link: s.artist_image_link,
            start_time: s.start_time,
        })
        .collect())
}

pub async fn genre_catalog<C: ConnectionTrait>(db: &C) -> Result<Vec<String>> {
    Ok(GenreRepository::new(db)
        .all()
        .await?
        .into_iter()
        .map(|g| g.name)
        .collect())
}
