//! Wallpaper records as returned by the listing endpoints.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Opaque wallpaper identifier, stable across pages.
pub type WallpaperID = String;

/// One element of a wallpaper listing, exactly as the service sent it.
///
/// Every field is optional: the service is loose about its schema, and a
/// record with gaps is still worth showing. Numeric ids are accepted and
/// stringified; blank strings count as missing.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct RawWallpaper {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<WallpaperID>,

    /// Full-resolution image URL.
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,

    /// Preview image URL.
    #[serde(default, deserialize_with = "lenient_string")]
    pub thumbnail: Option<String>,

    /// Provenance string. Never parsed.
    #[serde(default, deserialize_with = "lenient_string")]
    pub timestamp: Option<String>,
}

/// One page of a wallpaper listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WallpaperPage {
    /// Elements that decoded as records, in listing order.
    pub records: Vec<RawWallpaper>,
    /// Number of elements the service sent, skipped ones included.
    pub received: usize,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
