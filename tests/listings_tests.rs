//! Integration tests for the read side
//!
//! Covers:
//! - Venues grouped by area with upcoming show counts
//! - Case-insensitive name search for venues and artists
//! - Venue and artist detail with past/upcoming show split
//! - Show and artist listings

use chrono::{Duration, Utc};
use sea_orm::{DatabaseConnection, EntityTrait, Set};

use fyyur::db::entities::{artist, venue};
use fyyur::db::enums::EntityKind;
use fyyur::db::repositories::GenreRepository;
use fyyur::services::listings::{self, EntityDetail};
use fyyur::test_utils::*;
use pretty_assertions::assert_eq;

/// Three venues in two areas, three artists, and shows on both sides of now
async fn seed_listings(db: &DatabaseConnection) -> (Vec<i32>, Vec<i32>) {
    let hop = create_test_venue(db, "The Musical Hop", "San Francisco", "CA").await;
    let pianos = create_test_venue(db, "The Dueling Pianos Bar", "New York", "NY").await;
    let park = create_test_venue(db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;

    let petals = create_test_artist(db, "Guns N Petals").await;
    let quevedo = create_test_artist(db, "Matt Quevedo").await;
    let sax = create_test_artist(db, "The Wild Sax Band").await;

    create_test_show(db, petals.id, hop.id, days_from_now(-30)).await;
    create_test_show(db, quevedo.id, park.id, days_from_now(-10)).await;
    create_test_show(db, sax.id, park.id, days_from_now(5)).await;
    create_test_show(db, sax.id, park.id, days_from_now(12)).await;
    create_test_show(db, sax.id, pianos.id, days_from_now(20)).await;

    (
        vec![hop.id, pianos.id, park.id],
        vec![petals.id, quevedo.id, sax.id],
    )
}

#[tokio::test]
async fn test_list_venues_grouped_empty() {
    let db = setup_test_db().await;

    let areas = listings::list_venues_grouped(&db, Utc::now()).await.unwrap();
    assert!(areas.is_empty());
}

#[tokio::test]
async fn test_list_venues_grouped_by_area() {
    let db = setup_test_db().await;
    let (venues, _) = seed_listings(&db).await;

    let areas = listings::list_venues_grouped(&db, Utc::now()).await.unwrap();

    // Ordered by state then city
    assert_eq!(areas.len(), 2);
    assert_eq!((areas[0].state.as_str(), areas[0].city.as_str()), ("CA", "San Francisco"));
    assert_eq!((areas[1].state.as_str(), areas[1].city.as_str()), ("NY", "New York"));

    let sf: Vec<i32> = areas[0].venues.iter().map(|v| v.id).collect();
    assert_eq!(sf, vec![venues[0], venues[2]]);

    // Every venue appears exactly once
    let total: usize = areas.iter().map(|a| a.venues.len()).sum();
    assert_eq!(total, 3);
}

#[tokio::test]
async fn test_list_venues_grouped_counts_upcoming_shows() {
    let db = setup_test_db().await;
    let (venues, _) = seed_listings(&db).await;

    let areas = listings::list_venues_grouped(&db, Utc::now()).await.unwrap();
    let summaries: Vec<_> = areas.iter().flat_map(|a| a.venues.iter()).collect();

    let count_for = |id: i32| {
        summaries
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.num_upcoming_shows)
            .unwrap()
    };

    assert_eq!(count_for(venues[0]), 0);
    assert_eq!(count_for(venues[1]), 1);
    assert_eq!(count_for(venues[2]), 2);
}

#[tokio::test]
async fn test_list_venues_grouped_merges_city_case() {
    let db = setup_test_db().await;
    create_test_venue(&db, "First", "San Francisco", "CA").await;
    create_test_venue(&db, "Second", "san francisco", "CA").await;

    let areas = listings::list_venues_grouped(&db, Utc::now()).await.unwrap();

    assert_eq!(areas.len(), 1);
    assert_eq!(areas[0].venues.len(), 2);
}

#[tokio::test]
async fn test_upcoming_counts_move_with_now() {
    let db = setup_test_db().await;
    let (venues, _) = seed_listings(&db).await;

    // Thirty-one days ago every show was still ahead
    let earlier = Utc::now() - Duration::days(31);
    let areas = listings::list_venues_grouped(&db, earlier).await.unwrap();
    let park = areas
        .iter()
        .flat_map(|a| a.venues.iter())
        .find(|v| v.id == venues[2])
        .unwrap();

    assert_eq!(park.num_upcoming_shows, 3);
}

#[tokio::test]
async fn test_search_venues_substring() {
    let db = setup_test_db().await;
    let (venues, _) = seed_listings(&db).await;

    let results = listings::search_entities(&db, EntityKind::Venue, "Hop", Utc::now())
        .await
        .unwrap();
    assert_eq!(results.count, 1);
    assert_eq!(results.data[0].id, venues[0]);
    assert_eq!(results.data[0].name, "The Musical Hop");

    let results = listings::search_entities(&db, EntityKind::Venue, "Music", Utc::now())
        .await
        .unwrap();
    assert_eq!(results.count, 2);
    let ids: Vec<i32> = results.data.iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![venues[0], venues[2]]);
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let db = setup_test_db().await;
    seed_listings(&db).await;

    let results = listings::search_entities(&db, EntityKind::Artist, "bAnD", Utc::now())
        .await
        .unwrap();

    assert_eq!(results.count, 1);
    assert_eq!(results.data[0].name, "The Wild Sax Band");
    assert_eq!(results.data[0].num_upcoming_shows, 3);
}

#[tokio::test]
async fn test_search_artists_substring() {
    let db = setup_test_db().await;
    seed_listings(&db).await;

    let results = listings::search_entities(&db, EntityKind::Artist, "A", Utc::now())
        .await
        .unwrap();
    assert_eq!(results.count, 3);

    let results = listings::search_entities(&db, EntityKind::Artist, "Petals", Utc::now())
        .await
        .unwrap();
    assert_eq!(results.count, 1);
    assert_eq!(results.data[0].num_upcoming_shows, 0);
}

#[tokio::test]
async fn test_search_empty_term_matches_all() {
    let db = setup_test_db().await;
    seed_listings(&db).await;

    let results = listings::search_entities(&db, EntityKind::Venue, "", Utc::now())
        .await
        .unwrap();

    assert_eq!(results.count, 3);
    assert_eq!(results.count, results.data.len());
}

#[tokio::test]
async fn test_search_no_match() {
    let db = setup_test_db().await;
    seed_listings(&db).await;

    let results = listings::search_entities(&db, EntityKind::Venue, "Opera", Utc::now())
        .await
        .unwrap();

    assert_eq!(results.count, 0);
    assert!(results.data.is_empty());
}

#[tokio::test]
async fn test_search_wildcard_is_literal() {
    let db = setup_test_db().await;
    seed_listings(&db).await;

    let results = listings::search_entities(&db, EntityKind::Venue, "%", Utc::now())
        .await
        .unwrap();

    assert_eq!(results.count, 0);
}

#[tokio::test]
async fn test_venue_detail_splits_shows() {
    let db = setup_test_db().await;
    let (venues, artists) = seed_listings(&db).await;
    let genres = GenreRepository::new(&db);
    let jazz = genres.find_by_name("Jazz").await.unwrap().unwrap();
    let folk = genres.find_by_name("Folk").await.unwrap().unwrap();
    genres.attach_to_venue(venues[2], &[jazz.id, folk.id]).await.unwrap();

    let detail = listings::venue_detail(&db, venues[2], Utc::now())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(detail.name, "Park Square Live Music & Coffee");
    assert_eq!(detail.genres, vec!["Folk".to_string(), "Jazz".to_string()]);
    assert_eq!(detail.past_shows_count, 1);
    assert_eq!(detail.upcoming_shows_count, 2);
    assert_eq!(detail.past_shows[0].artist_id, artists[1]);
    assert_eq!(detail.past_shows[0].artist_name, "Matt Quevedo");
    assert!(detail
        .upcoming_shows
        .iter()
        .all(|s| s.artist_id == artists[2] && s.start_time >= Utc::now() - Duration::minutes(1)));
}

#[tokio::test]
async fn test_artist_detail_splits_shows() {
    let db = setup_test_db().await;
    let (venues, artists) = seed_listings(&db).await;

    let detail = listings::artist_detail(&db, artists[2], Utc::now())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(detail.past_shows_count, 0);
    assert_eq!(detail.upcoming_shows_count, 3);
    assert!(detail.genres.is_empty());
    let venue_ids: Vec<i32> = detail.upcoming_shows.iter().map(|s| s.venue_id).collect();
    assert_eq!(venue_ids, vec![venues[2], venues[2], venues[1]]);
}

#[tokio::test]
async fn test_detail_counts_cover_every_show() {
    let db = setup_test_db().await;
    let (venues, _) = seed_listings(&db).await;

    for id in venues {
        let detail = listings::venue_detail(&db, id, Utc::now())
            .await
            .unwrap()
            .unwrap();
        let total = fyyur::db::repositories::ShowRepository::new(&db)
            .for_venue(id)
            .await
            .unwrap()
            .len();

        assert_eq!(detail.past_shows_count + detail.upcoming_shows_count, total);
        assert_eq!(detail.past_shows.len(), detail.past_shows_count);
        assert_eq!(detail.upcoming_shows.len(), detail.upcoming_shows_count);
    }
}

#[tokio::test]
async fn test_entity_detail_missing_id() {
    let db = setup_test_db().await;
    seed_listings(&db).await;

    let venue = listings::entity_detail(&db, EntityKind::Venue, 999, Utc::now())
        .await
        .unwrap();
    let artist = listings::entity_detail(&db, EntityKind::Artist, 999, Utc::now())
        .await
        .unwrap();

    assert!(venue.is_none());
    assert!(artist.is_none());
}

#[tokio::test]
async fn test_entity_detail_dispatches_on_kind() {
    let db = setup_test_db().await;
    let (venues, artists) = seed_listings(&db).await;

    let venue = listings::entity_detail(&db, EntityKind::Venue, venues[0], Utc::now())
        .await
        .unwrap();
    let artist = listings::entity_detail(&db, EntityKind::Artist, artists[0], Utc::now())
        .await
        .unwrap();

    assert!(matches!(venue, Some(EntityDetail::Venue(v)) if v.name == "The Musical Hop"));
    assert!(matches!(artist, Some(EntityDetail::Artist(a)) if a.name == "Guns N Petals"));
}

#[tokio::test]
async fn test_list_shows_carries_venue_ids() {
    let db = setup_test_db().await;
    let (venues, artists) = seed_listings(&db).await;

    let shows = listings::list_shows(&db).await.unwrap();

    assert_eq!(shows.len(), 5);
    // Ordered by start time
    assert_eq!(shows[0].artist_id, artists[0]);
    assert_eq!(shows[0].venue_id, venues[0]);
    assert_eq!(shows[0].venue_name, "The Musical Hop");
    assert_eq!(shows[4].venue_id, venues[1]);
    assert!(shows.windows(2).all(|w| w[0].start_time <= w[1].start_time));
}

#[tokio::test]
async fn test_list_artists_ordered_by_id() {
    let db = setup_test_db().await;
    let (_, artists) = seed_listings(&db).await;

    let listed = listings::list_artists(&db).await.unwrap();
    let ids: Vec<i32> = listed.iter().map(|a| a.id).collect();

    assert_eq!(ids, artists);
}

#[tokio::test]
async fn test_genre_catalog_lists_seeded_names() {
    let db = setup_test_db().await;

    let genres = listings::genre_catalog(&db).await.unwrap();

    assert_eq!(genres.len(), migration::GENRE_CATALOG.len());
    assert!(genres.contains(&"Hip-Hop".to_string()));
}

/// More rows than SQLite accepts as bind parameters in one statement
const LARGE_TABLE: usize = 33_000;

async fn seed_many_venues(db: &DatabaseConnection, count: usize) {
    let rows: Vec<venue::ActiveModel> = (0..count)
        .map(|i| venue::ActiveModel {
            name: Set(format!("Venue {}", i)),
            city: Set(format!("City {}", i % 50)),
            state: Set("CA".to_string()),
            address: Set("1015 Folsom Street".to_string()),
            phone: Set("123-123-1234".to_string()),
            image_link: Set(None),
            facebook_link: Set("https://www.facebook.com/venue".to_string()),
            ..Default::default()
        })
        .collect();

    for chunk in rows.chunks(1_000) {
        venue::Entity::insert_many(chunk.to_vec())
            .exec_without_returning(db)
            .await
            .unwrap();
    }
}

async fn seed_many_artists(db: &DatabaseConnection, count: usize) {
    let rows: Vec<artist::ActiveModel> = (0..count)
        .map(|i| artist::ActiveModel {
            name: Set(format!("Artist {}", i)),
            city: Set("San Francisco".to_string()),
            state: Set("CA".to_string()),
            phone: Set("326-123-5000".to_string()),
            image_link: Set(None),
            facebook_link: Set("https://www.facebook.com/artist".to_string()),
            ..Default::default()
        })
        .collect();

    for chunk in rows.chunks(1_000) {
        artist::Entity::insert_many(chunk.to_vec())
            .exec_without_returning(db)
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn test_list_venues_grouped_large_table() {
    let db = setup_test_db().await;
    seed_many_venues(&db, LARGE_TABLE).await;
    let artist = create_test_artist(&db, "Guns N Petals").await;
    create_test_show(&db, artist.id, 1, days_from_now(3)).await;

    let areas = listings::list_venues_grouped(&db, Utc::now()).await.unwrap();

    let total: usize = areas.iter().map(|a| a.venues.len()).sum();
    assert_eq!(total, LARGE_TABLE);
    assert_eq!(areas.len(), 50);
    let upcoming: usize = areas
        .iter()
        .flat_map(|a| a.venues.iter())
        .map(|v| v.num_upcoming_shows)
        .sum();
    assert_eq!(upcoming, 1);
}

#[tokio::test]
async fn test_search_empty_term_large_table() {
    let db = setup_test_db().await;
    seed_many_venues(&db, LARGE_TABLE).await;
    seed_many_artists(&db, LARGE_TABLE).await;
    create_test_show(&db, 1, 1, days_from_now(3)).await;
    create_test_show(&db, 1, 2, days_from_now(-3)).await;

    let venues = listings::search_entities(&db, EntityKind::Venue, "", Utc::now())
        .await
        .unwrap();
    assert_eq!(venues.count, LARGE_TABLE);
    assert_eq!(venues.data[0].num_upcoming_shows, 1);
    assert_eq!(venues.data[1].num_upcoming_shows, 0);

    let artists = listings::search_entities(&db, EntityKind::Artist, "", Utc::now())
        .await
        .unwrap();
    assert_eq!(artists.count, LARGE_TABLE);
    assert_eq!(artists.data[0].num_upcoming_shows, 1);
}

#[tokio::test]
async fn test_search_counts_only_matching_owners() {
    let db = setup_test_db().await;
    let (venues, _) = seed_listings(&db).await;

    // "Park" matches one venue; shows at other venues must not leak into its count
    let results = listings::search_entities(&db, EntityKind::Venue, "park", Utc::now())
        .await
        .unwrap();

    assert_eq!(results.count, 1);
    assert_eq!(results.data[0].id, venues[2]);
    assert_eq!(results.data[0].num_upcoming_shows, 2);
}
