use axum::http::StatusCode;
use maud::{html, Markup};

use super::components::{
    entity_href, entity_summary_item, flash_banner, format_datetime, genre_select, genre_tags,
    profile_image, search_form, show_card, submit_button, text_input, Flash,
};
use super::layout::base_layout;
use crate::db::enums::EntityKind;
use crate::services::listings::{
    ArtistDetail, ArtistListing, SearchResults, ShowListing, VenueArea, VenueDetail,
};

pub fn home_page(flash: Option<&Flash>) -> Markup {
    base_layout(
        "Home",
        html! {
            @if let Some(flash) = flash {
                (flash_banner(flash))
            }

            div class="text-center py-12" {
                h1 class="text-3xl font-bold text-gray-900" { "Fyyur" }
                p class="text-gray-600 mt-2" { "Find venues, discover artists and book shows." }

                div class="flex justify-center space-x-4 mt-8" {
                    a href="/venues/create" class="px-4 py-2 bg-gray-900 text-white rounded-md" { "Post a venue" }
                    a href="/artists/create" class="px-4 py-2 bg-gray-900 text-white rounded-md" { "Post an artist" }
                    a href="/shows/create" class="px-4 py-2 bg-gray-900 text-white rounded-md" { "Post a show" }
                }
            }
        },
    )
}

pub fn venues_page(areas: &[VenueArea]) -> Markup {
    base_layout(
        "Venues",
        html! {
            (search_form(EntityKind::Venue, ""))

            @if areas.is_empty() {
                p class="text-gray-600 text-lg" { "No venues listed yet." }
            }

            @for area in areas {
                section class="area mb-8" {
                    h3 class="text-lg font-semibold text-gray-900 mb-2" {
                        (area.city) ", " (area.state)
                    }
                    ul class="space-y-2" {
                        @for venue in &area.venues {
                            (entity_summary_item(EntityKind::Venue, venue))
                        }
                    }
                }
            }
        },
    )
}

pub fn artists_page(artists: &[ArtistListing]) -> Markup {
    base_layout(
        "Artists",
        html! {
            (search_form(EntityKind::Artist, ""))

            @if artists.is_empty() {
                p class="text-gray-600 text-lg" { "No artists listed yet." }
            }

            ul class="space-y-2" {
                @for artist in artists {
                    li class="entity-card bg-white rounded-md shadow-sm p-3" {
                        a href=(entity_href(EntityKind::Artist, artist.id)) class="font-medium text-gray-900 hover:underline" {
                            (artist.name)
                        }
                    }
                }
            }
        },
    )
}

pub fn search_page(kind: EntityKind, term: &str, results: &SearchResults) -> Markup {
    base_layout(
        "Search",
        html! {
            (search_form(kind, term))

            h3 class="text-lg text-gray-900 mb-4" {
                "Number of search results for \"" (term) "\": " (results.count)
            }

            ul class="space-y-2" {
                @for entity in &results.data {
                    (entity_summary_item(kind, entity))
                }
            }
        },
    )
}

pub fn venue_page(venue: &VenueDetail) -> Markup {
    base_layout(
        &venue.name,
        html! {
            div class="flex space-x-8 mb-8" {
                (profile_image(venue.image_link.as_deref(), &venue.name))

                div {
                    h1 class="text-3xl font-bold text-gray-900" { (venue.name) }
                    p class="text-sm text-gray-500" { "ID: " (venue.id) }
                    (genre_tags(&venue.genres))

                    dl class="mt-4 text-gray-700 space-y-1" {
                        dd { (venue.address) }
                        dd { (venue.city) ", " (venue.state) }
                        dd { (venue.phone) }
                        dd {
                            a href=(venue.facebook_link) target="_blank" class="hover:underline" {
                                (venue.facebook_link)
                            }
                        }
                    }
                }
            }

            section class="mb-8" {
                h2 class="text-xl font-semibold mb-4" { (venue.upcoming_shows_count) " Upcoming Shows" }
                div class="grid grid-cols-2 md:grid-cols-4 gap-6" {
                    @for show in &venue.upcoming_shows {
                        (show_card(
                            &entity_href(EntityKind::Artist, show.artist_id),
                            &show.artist_name,
                            show.artist_image_link.as_deref(),
                            &show.start_time,
                        ))
                    }
                }
            }

            section {
                h2 class="text-xl font-semibold mb-4" { (venue.past_shows_count) " Past Shows" }
                div class="grid grid-cols-2 md:grid-cols-4 gap-6" {
                    @for show in &venue.past_shows {
                        (show_card(
                            &entity_href(EntityKind::Artist, show.artist_id),
                            &show.artist_name,
                            show.artist_image_link.as_deref(),
                            &show.start_time,
                        ))
                    }
                }
            }
        },
    )
}

pub fn artist_page(artist: &ArtistDetail) -> Markup {
    base_layout(
        &artist.name,
        html! {
            div class="flex space-x-8 mb-8" {
                (profile_image(artist.image_link.as_deref(), &artist.name))

                div {
                    h1 class="text-3xl font-bold text-gray-900" { (artist.name) }
                    p class="text-sm text-gray-500" { "ID: " (artist.id) }
                    (genre_tags(&artist.genres))

                    dl class="mt-4 text-gray-700 space-y-1" {
                        dd { (artist.city) ", " (artist.state) }
                        dd { (artist.phone) }
                        dd {
                            a href=(artist.facebook_link) target="_blank" class="hover:underline" {
                                (artist.facebook_link)
                            }
                        }
                    }
                }
            }

            section class="mb-8" {
                h2 class="text-xl font-semibold mb-4" { (artist.upcoming_shows_count) " Upcoming Shows" }
                div class="grid grid-cols-2 md:grid-cols-4 gap-6" {
                    @for show in &artist.upcoming_shows {
                        (show_card(
                            &entity_href(EntityKind::Venue, show.venue_id),
                            &show.venue_name,
                            show.venue_image_link.as_deref(),
                            &show.start_time,
                        ))
                    }
                }
            }

            section {
                h2 class="text-xl font-semibold mb-4" { (artist.past_shows_count) " Past Shows" }
                div class="grid grid-cols-2 md:grid-cols-4 gap-6" {
                    @for show in &artist.past_shows {
                        (show_card(
                            &entity_href(EntityKind::Venue, show.venue_id),
                            &show.venue_name,
                            show.venue_image_link.as_deref(),
                            &show.start_time,
                        ))
                    }
                }
            }
        },
    )
}

/// Rendered in place of a detail page when the id does not resolve.
pub fn missing_entity_page(kind: EntityKind) -> Markup {
    base_layout(
        "Not Found",
        html! {
            h1 class="text-2xl font-bold text-gray-900" {
                "no " (kind.as_str()) " with that id"
            }
        },
    )
}

pub fn shows_page(shows: &[ShowListing]) -> Markup {
    base_layout(
        "Shows",
        html! {
            @if shows.is_empty() {
                p class="text-gray-600 text-lg" { "No shows booked yet." }
            }

            div class="grid grid-cols-2 md:grid-cols-4 gap-6" {
                @for show in shows {
                    div class="entity-card bg-white rounded-lg shadow-md p-4" {
                        p class="text-sm text-gray-600" { (format_datetime(&show.start_time)) }
                        a href=(entity_href(EntityKind::Artist, show.artist_id)) class="block font-semibold hover:underline" {
                            (show.artist_name)
                        }
                        p class="text-sm text-gray-600" {
                            "playing at "
                            a href=(entity_href(EntityKind::Venue, show.venue_id)) class="hover:underline" {
                                (show.venue_name)
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn new_venue_form(genres: &[String]) -> Markup {
    base_layout(
        "New Venue",
        html! {
            h1 class="text-2xl font-bold mb-6" { "List a new venue" }
            form method="post" action="/venues/create" class="max-w-xl" {
                (text_input("name", "Name", true))
                (text_input("city", "City", true))
                (text_input("state", "State", true))
                (text_input("address", "Address", true))
                (text_input("phone", "Phone", true))
                (genre_select(genres))
                (text_input("facebook_link", "Facebook Link", true))
                (text_input("image_link", "Image Link", false))
                (submit_button("Create Venue"))
            }
        },
    )
}

pub fn new_artist_form(genres: &[String]) -> Markup {
    base_layout(
        "New Artist",
        html! {
            h1 class="text-2xl font-bold mb-6" { "List a new artist" }
            form method="post" action="/artists/create" class="max-w-xl" {
                (text_input("name", "Name", true))
                (text_input("city", "City", true))
                (text_input("state", "State", true))
                (text_input("phone", "Phone", true))
                (genre_select(genres))
                (text_input("facebook_link", "Facebook Link", true))
                (text_input("image_link", "Image Link", false))
                (submit_button("Create Artist"))
            }
        },
    )
}

pub fn new_show_form() -> Markup {
    base_layout(
        "New Show",
        html! {
            h1 class="text-2xl font-bold mb-6" { "List a new show" }
            form method="post" action="/shows/create" class="max-w-xl" {
                (text_input("artist_id", "Artist ID", true))
                (text_input("venue_id", "Venue ID", true))
                div class="mb-4" {
                    label for="start_time" class="block text-sm font-medium text-gray-700 mb-2" { "Start Time" }
                    input type="datetime-local" id="start_time" name="start_time" required
                        class="w-full px-3 py-2 border border-gray-300 rounded-md";
                }
                (submit_button("Create Show"))
            }
        },
    )
}

pub fn error_page(status: StatusCode, message: &str) -> Markup {
    let heading = match status {
        StatusCode::NOT_FOUND => "404 - Page Not Found",
        StatusCode::NOT_IMPLEMENTED => "501 - Not Implemented",
        s if s.is_client_error() => "Request Rejected",
        _ => "500 - Internal Server Error",
    };

    base_layout(
        heading,
        html! {
            div class="text-center py-12" {
                h1 class="text-3xl font-bold text-gray-900" { (heading) }
                p class="text-gray-600 mt-4" { (message) }
                a href="/" class="inline-block mt-8 text-primary hover:underline" { "Back to home" }
            }
        },
    )
}
