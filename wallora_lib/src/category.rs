//! Category catalogue built from the service's category slugs.

use serde::{Deserialize, Serialize};
use wallora_api::types::CategorySlug;

const KNOWN_CATEGORIES: &[(&str, &str, &str)] = &[
    ("nature", "leaf.fill", "Beautiful landscapes and natural scenes"),
    ("cars", "car.fill", "Cool cars and automotive wallpapers"),
    ("anime", "sparkles", "Anime-themed wallpapers and artwork"),
    ("space", "globe.americas.fill", "Cosmic and stellar imagery"),
];

const FALLBACK_ICON: &str = "photo.fill";

/// A browsable wallpaper category.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Category {
    /// Slug used in `/wallpapers/{id}`.
    pub id: CategorySlug,
    pub name: String,
    /// Symbol name for the category tile.
    pub icon: String,
    pub description: String,
}

impl Category {
    pub fn from_slug(slug: &str) -> Self {
        let known = KNOWN_CATEGORIES.iter().find(|(id, _, _)| *id == slug);
        Self {
            id: slug.to_string(),
            name: capitalize(slug),
            icon: known
                .map(|(_, icon, _)| *icon)
                .unwrap_or(FALLBACK_ICON)
                .to_string(),
            description: match known {
                Some((_, _, description)) => description.to_string(),
                None => format!("{} wallpapers", slug),
            },
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
