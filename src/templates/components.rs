use chrono::{DateTime, FixedOffset};
use maud::{html, Markup};

use crate::db::enums::EntityKind;
use crate::services::listings::EntitySummary;

const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x300/1a1a1a/ffffff?text=No+Image";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

/// One-shot notification shown after a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }
}

pub fn flash_banner(flash: &Flash) -> Markup {
    let color = match flash.kind {
        FlashKind::Success => "bg-green-100 text-green-800 border-green-300",
        FlashKind::Error => "bg-red-100 text-red-800 border-red-300",
    };

    html! {
        div class={(format!("flash mb-6 p-4 border rounded-md {}", color))} role="alert" {
            (flash.message)
        }
    }
}

pub fn format_datetime(value: &DateTime<FixedOffset>) -> String {
    value.format("%a %b %-d, %Y %-I:%M%p").to_string()
}

pub fn entity_href(kind: EntityKind, id: i32) -> String {
    match kind {
        EntityKind::Venue => format!("/venues/{}", id),
        EntityKind::Artist => format!("/artists/{}", id),
    }
}

pub fn entity_summary_item(kind: EntityKind, entity: &EntitySummary) -> Markup {
    html! {
        li class="entity-card bg-white rounded-md shadow-sm p-3 flex justify-between" {
            a href=(entity_href(kind, entity.id)) class="font-medium text-gray-900 hover:underline" {
                (entity.name)
            }
            span class="text-xs text-gray-500" {
                (entity.num_upcoming_shows) " upcoming shows"
            }
        }
    }
}

pub fn genre_tags(genres: &[String]) -> Markup {
    html! {
        div class="flex flex-wrap gap-2 mt-2" {
            @for genre in genres {
                span class="genre px-2 py-1 text-xs rounded-full bg-gray-200 text-gray-700" { (genre) }
            }
        }
    }
}

/// A show card linking to the other party of the booking.
pub fn show_card(
    href: &str,
    name: &str,
    image_link: Option<&str>,
    start_time: &DateTime<FixedOffset>,
) -> Markup {
    html! {
        div class="entity-card bg-white rounded-lg shadow-md overflow-hidden" {
            img src=(image_link.unwrap_or(PLACEHOLDER_IMAGE)) alt=(name)
                class="w-full h-40 object-cover" loading="lazy";
            div class="p-4" {
                a href=(href) class="font-semibold text-gray-900 hover:underline" { (name) }
                p class="text-sm text-gray-600" { (format_datetime(start_time)) }
            }
        }
    }
}

pub fn profile_image(image_link: Option<&str>, name: &str) -> Markup {
    html! {
        img src=(image_link.unwrap_or(PLACEHOLDER_IMAGE)) alt=(name)
            class="w-64 h-64 object-cover rounded-lg";
    }
}

pub fn search_form(kind: EntityKind, term: &str) -> Markup {
    let action = match kind {
        EntityKind::Venue => "/venues/search",
        EntityKind::Artist => "/artists/search",
    };

    html! {
        form method="post" action=(action) class="flex space-x-2 mb-6" {
            input type="search" name="search_term" value=(term)
                placeholder={ "Find a " (kind.as_str()) }
                class="flex-1 px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-primary";
            button type="submit" class="px-4 py-2 bg-gray-900 text-white rounded-md" { "Search" }
        }
    }
}

pub fn text_input(name: &str, label: &str, required: bool) -> Markup {
    html! {
        div class="mb-4" {
            label for=(name) class="block text-sm font-medium text-gray-700 mb-2" { (label) }
            input type="text" id=(name) name=(name) required[required]
                class="w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-primary";
        }
    }
}

pub fn genre_select(genres: &[String]) -> Markup {
    html! {
        div class="mb-4" {
            label for="genres" class="block text-sm font-medium text-gray-700 mb-2" { "Genres" }
            select id="genres" name="genres" multiple
                class="w-full px-3 py-2 border border-gray-300 rounded-md" {
                @for genre in genres {
                    option value=(genre) { (genre) }
                }
            }
        }
    }
}

pub fn submit_button(label: &str) -> Markup {
    html! {
        button type="submit" class="px-4 py-2 bg-gray-900 text-white rounded-md" { (label) }
    }
}
