//! Database integration tests
//!
//! Tests the schema and repositories to ensure:
//! - Foreign keys on shows are enforced and reported as integrity errors
//! - Genre associations survive duplicate inserts and cascade on delete
//! - The genre catalog is seeded by the migrations

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
};

use fyyur::db::entities::{artist_genre, genre, show, venue_genre};
use fyyur::db::repositories::{GenreRepository, ShowRepository};
use fyyur::error::AppError;
use fyyur::test_utils::*;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_genre_catalog_is_seeded() {
    let db = setup_test_db().await;

    let genres = GenreRepository::new(&db).all().await.unwrap();
    let names: Vec<&str> = genres.iter().map(|g| g.name.as_str()).collect();

    assert!(names.contains(&"Jazz"));
    assert!(names.contains(&"Rock n Roll"));
    assert!(names.contains(&"R&B"));
    // Ordered by name
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[tokio::test]
async fn test_genre_names_are_unique() {
    let db = setup_test_db().await;

    let duplicate = genre::ActiveModel {
        name: Set("Jazz".to_string()),
        ..Default::default()
    };

    assert!(duplicate.insert(&db).await.is_err());
}

#[tokio::test]
async fn test_show_requires_existing_artist() {
    let db = setup_test_db().await;
    let venue = create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;

    let result = ShowRepository::new(&db)
        .create(show::ActiveModel {
            artist_id: Set(99999),
            venue_id: Set(venue.id),
            start_time: Set(days_from_now(3)),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(AppError::ReferentialIntegrity(_))));
    assert_eq!(show::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_show_requires_existing_venue() {
    let db = setup_test_db().await;
    let artist = create_test_artist(&db, "Guns N Petals").await;

    let result = ShowRepository::new(&db)
        .create(show::ActiveModel {
            artist_id: Set(artist.id),
            venue_id: Set(424242),
            start_time: Set(days_from_now(3)),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(AppError::ReferentialIntegrity(_))));
}

#[tokio::test]
async fn test_shows_for_venue_and_artist() {
    let db = setup_test_db().await;
    let venue = create_test_venue(&db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;
    let artist = create_test_artist(&db, "The Wild Sax Band").await;
    let other = create_test_artist(&db, "Matt Quevedo").await;

    create_test_show(&db, artist.id, venue.id, days_from_now(10)).await;
    create_test_show(&db, other.id, venue.id, days_from_now(-10)).await;

    let shows = ShowRepository::new(&db);
    let at_venue = shows.for_venue(venue.id).await.unwrap();
    assert_eq!(at_venue.len(), 2);
    // Ordered by start time
    assert_eq!(at_venue[0].1.name, "Matt Quevedo");
    assert_eq!(at_venue[1].1.name, "The Wild Sax Band");

    let by_artist = shows.for_artist(artist.id).await.unwrap();
    assert_eq!(by_artist.len(), 1);
    assert_eq!(by_artist[0].1.id, venue.id);
}

#[tokio::test]
async fn test_attaching_genres_links_both_sides() {
    let db = setup_test_db().await;
    let venue = create_test_venue(&db, "The Dueling Pianos Bar", "New York", "NY").await;
    let genres = GenreRepository::new(&db);

    let jazz = genres.find_by_name("Jazz").await.unwrap().unwrap();
    let classical = genres.find_by_name("Classical").await.unwrap().unwrap();
    genres
        .attach_to_venue(venue.id, &[jazz.id, classical.id])
        .await
        .unwrap();

    let names = genres.names_for_venue(venue.id).await.unwrap();
    assert_eq!(names, vec!["Classical".to_string(), "Jazz".to_string()]);
}

#[tokio::test]
async fn test_duplicate_genre_link_is_rejected_by_store() {
    let db = setup_test_db().await;
    let artist = create_test_artist(&db, "Guns N Petals").await;
    let genres = GenreRepository::new(&db);
    let rock = genres.find_by_name("Rock n Roll").await.unwrap().unwrap();

    genres.attach_to_artist(artist.id, &[rock.id]).await.unwrap();
    let again = genres.attach_to_artist(artist.id, &[rock.id]).await;

    assert!(again.is_err());
    assert_eq!(genres.names_for_artist(artist.id).await.unwrap(), vec!["Rock n Roll"]);
}

#[tokio::test]
async fn test_deleting_genre_cascades_to_associations() {
    let db = setup_test_db().await;
    let venue = create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&db, "Guns N Petals").await;
    let genres = GenreRepository::new(&db);
    let folk = genres.find_by_name("Folk").await.unwrap().unwrap();
    let jazz = genres.find_by_name("Jazz").await.unwrap().unwrap();

    genres.attach_to_venue(venue.id, &[folk.id, jazz.id]).await.unwrap();
    genres.attach_to_artist(artist.id, &[folk.id]).await.unwrap();

    genre::Entity::delete_by_id(folk.id).exec(&db).await.unwrap();

    let venue_links = venue_genre::Entity::find()
        .filter(venue_genre::Column::VenueId.eq(venue.id))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(venue_links.len(), 1);
    assert_eq!(venue_links[0].genre_id, jazz.id);

    let artist_links = artist_genre::Entity::find()
        .filter(artist_genre::Column::ArtistId.eq(artist.id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(artist_links, 0);
}

#[tokio::test]
async fn test_search_by_name_escapes_wildcards() {
    let db = setup_test_db().await;
    create_test_venue(&db, "100% Live", "Austin", "TX").await;
    create_test_venue(&db, "1000 Live", "Austin", "TX").await;
    create_test_venue(&db, "Under_score", "Austin", "TX").await;
    create_test_venue(&db, "Underscore", "Austin", "TX").await;

    let venues = fyyur::db::repositories::VenueRepository::new(&db);

    let percent = venues.search_by_name("100%").await.unwrap();
    assert_eq!(percent.len(), 1);
    assert_eq!(percent[0].name, "100% Live");

    let underscore = venues.search_by_name("r_s").await.unwrap();
    assert_eq!(underscore.len(), 1);
    assert_eq!(underscore[0].name, "Under_score");
}
