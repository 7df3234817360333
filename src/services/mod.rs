pub mod bookings;
pub mod listings;

pub use bookings::{create_artist, create_show, create_venue, ArtistFields, VenueFields};
pub use listings::{
    entity_detail, list_artists, list_shows, list_venues_grouped, search_entities, EntityDetail,
};
