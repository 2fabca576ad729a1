//! Turning raw listing records into displayable wallpapers.
//!
//! The service sends loosely-shaped records. A [`DeriveDisplayFields`]
//! strategy fills the gaps (category, title, thumbnail) so the feed logic
//! never has to know how presentation strings are chosen.

use serde::{Deserialize, Serialize};
use wallora_api::types::{RawWallpaper, WallpaperID};

/// Category label used when neither the record nor the request names one.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// A wallpaper ready to render.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Wallpaper {
    pub id: WallpaperID,
    pub category: String,
    pub title: String,
    /// Full-resolution asset.
    pub image_url: String,
    /// Preview asset. Same as `image_url` when the service sent none.
    pub thumbnail_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Strategy that maps a raw record to a [`Wallpaper`].
///
/// `scope` is the category the page was requested for, if any. Returning
/// `None` drops the record; implementations should only do that when there
/// is nothing to show.
pub trait DeriveDisplayFields: Send + Sync {
    fn derive(&self, raw: RawWallpaper, scope: Option<&str>) -> Option<Wallpaper>;
}

impl<F> DeriveDisplayFields for F
where
    F: Fn(RawWallpaper, Option<&str>) -> Option<Wallpaper> + Send + Sync,
{
    fn derive(&self, raw: RawWallpaper, scope: Option<&str>) -> Option<Wallpaper> {
        self(raw, scope)
    }
}

/// Default strategy: keeps a title the service sent, otherwise picks one
/// from a per-category catalogue keyed by a hash of the id.
#[derive(Clone, Copy, Debug, Default)]
pub struct CatalogTitles;

impl DeriveDisplayFields for CatalogTitles {
    fn derive(&self, raw: RawWallpaper, scope: Option<&str>) -> Option<Wallpaper> {
        let mut base = base_fields(raw, scope)?;
        if base.title.is_empty() {
            base.title = generate_title(&base.category, &base.id).to_string();
        }
        Some(base)
    }
}

/// Strategy that never invents a title: missing titles become "Untitled".
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainTitles;

impl DeriveDisplayFields for PlainTitles {
    fn derive(&self, raw: RawWallpaper, scope: Option<&str>) -> Option<Wallpaper> {
        let mut base = base_fields(raw, scope)?;
        if base.title.is_empty() {
            base.title = "Untitled".to_string();
        }
        Some(base)
    }
}

/// Fills everything but the title, which is left empty when absent.
///
/// A record without an image URL has nothing to render and yields `None`.
/// A missing id falls back to the image URL so it stays stable between
/// fetches.
fn base_fields(raw: RawWallpaper, scope: Option<&str>) -> Option<Wallpaper> {
    let Some(image_url) = raw.url else {
        tracing::warn!("Dropping wallpaper {:?}: no image URL", raw.id);
        return None;
    };
    let id = raw.id.unwrap_or_else(|| image_url.clone());
    let category = scope
        .map(str::to_string)
        .or(raw.category)
        .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());
    let thumbnail_url = raw.thumbnail.unwrap_or_else(|| image_url.clone());
    Some(Wallpaper {
        id,
        category,
        title: raw.title.unwrap_or_default(),
        image_url,
        thumbnail_url,
        timestamp: raw.timestamp,
    })
}

const CATEGORY_TITLES: &[(&str, &[&str])] = &[
    (
        "nature",
        &["Mountain Vista", "Forest Path", "Ocean Waves", "Sunset Sky", "Flower Field"],
    ),
    (
        "cars",
        &["Sports Car", "Classic Vehicle", "Racing Machine", "Luxury Ride", "Street Racer"],
    ),
    (
        "anime",
        &["Anime Art", "Character Design", "Manga Style", "Anime Scene", "Digital Art"],
    ),
    (
        "space",
        &["Galaxy View", "Nebula", "Star Field", "Planet Surface", "Cosmic Wonder"],
    ),
];

const FALLBACK_TITLES: &[&str] = &["Wallpaper"];

/// Picks a display title for a wallpaper. Pure in `(category, id)`.
///
/// The id is hashed over its UTF-16 code units with 32-bit wrapping
/// arithmetic (`h = h * 31 + unit`), so the same record always gets the
/// same title.
pub fn generate_title(category: &str, id: &str) -> &'static str {
    let titles = CATEGORY_TITLES
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, titles)| *titles)
        .unwrap_or(FALLBACK_TITLES);
    let hash = id.encode_utf16().fold(0i32, |acc, unit| {
        acc.wrapping_shl(5)
            .wrapping_sub(acc)
            .wrapping_add(i32::from(unit))
    });
    titles[hash.unsigned_abs() as usize % titles.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: Option<&str>, url: Option<&str>) -> RawWallpaper {
        RawWallpaper {
            id: id.map(str::to_string),
            url: url.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn title_is_deterministic() {
        assert_eq!(generate_title("nature", "1"), "Flower Field");
        assert_eq!(generate_title("nature", "ab"), "Mountain Vista");
        assert_eq!(
            generate_title("space", "a-long-wallpaper-id-0042"),
            generate_title("space", "a-long-wallpaper-id-0042")
        );
    }

    #[test]
    fn title_survives_hash_overflow() {
        let id = "z".repeat(64);
        let title = generate_title("cars", &id);
        assert!(CATEGORY_TITLES[1].1.contains(&title));
    }

    #[test]
    fn unknown_category_uses_fallback_title() {
        assert_eq!(generate_title("minimal", "abc"), "Wallpaper");
        assert_eq!(generate_title(UNKNOWN_CATEGORY, "abc"), "Wallpaper");
    }

    #[test]
    fn catalog_fills_defaults() {
        let w = CatalogTitles
            .derive(raw(Some("1"), Some("https://x/1.jpg")), None)
            .unwrap();
        assert_eq!(w.category, UNKNOWN_CATEGORY);
        assert_eq!(w.title, "Wallpaper");
        assert_eq!(w.thumbnail_url, "https://x/1.jpg");
    }

    #[test]
    fn catalog_prefers_scope_category() {
        let mut r = raw(Some("1"), Some("https://x/1.jpg"));
        r.category = Some("cars".to_string());
        let w = CatalogTitles.derive(r, Some("nature")).unwrap();
        assert_eq!(w.category, "nature");
        assert_eq!(w.title, "Flower Field");
    }

    #[test]
    fn catalog_keeps_service_title() {
        let mut r = raw(Some("1"), Some("https://x/1.jpg"));
        r.title = Some("Aurora".to_string());
        r.thumbnail = Some("https://x/1_t.jpg".to_string());
        let w = CatalogTitles.derive(r, None).unwrap();
        assert_eq!(w.title, "Aurora");
        assert_eq!(w.thumbnail_url, "https://x/1_t.jpg");
    }

    #[test]
    fn missing_id_falls_back_to_url() {
        let w = PlainTitles
            .derive(raw(None, Some("https://x/9.jpg")), None)
            .unwrap();
        assert_eq!(w.id, "https://x/9.jpg");
        assert_eq!(w.title, "Untitled");
    }

    #[test]
    fn missing_url_drops_record() {
        assert!(CatalogTitles.derive(raw(Some("1"), None), None).is_none());
    }

    #[test]
    fn closure_is_a_strategy() {
        let upper = |raw: RawWallpaper, _scope: Option<&str>| {
            PlainTitles.derive(raw, None).map(|mut w| {
                w.title = w.title.to_uppercase();
                w
            })
        };
        let w = upper
            .derive(raw(Some("1"), Some("https://x/1.jpg")), None)
            .unwrap();
        assert_eq!(w.title, "UNTITLED");
    }
}
