//! HTTP client for the Wallora wallpaper service.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::{
    query::{Query, WallpaperQuery},
    types::{CategorySlug, RawWallpaper, WallpaperPage},
    Error,
};

const USER_AGENT: &str = concat!("wallora-cli/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the Wallora wallpaper service.
///
/// Each request builds a fresh `reqwest::Client` with a 30-second timeout.
/// Listing responses are decoded record by record, so one malformed element
/// never sinks the rest of the page.
pub struct Client {
    /// Base URL for the API. Defaults to `https://wallora-wallpapers.deno.dev`.
    base_api_url: String,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the production wallpaper service.
    pub fn new() -> Self {
        Self {
            base_api_url: "https://wallora-wallpapers.deno.dev".to_string(),
        }
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, segments: &[&str], query: Option<&impl Query>) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_api_url).map_err(|e| {
            tracing::error!("Invalid base URL {}: {}", self.base_api_url, e);
            Error::InvalidUrl(format!("{}: {}", self.base_api_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(format!("{} cannot be a base", self.base_api_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    async fn get<T, Q>(&self, segments: &[&str], query: Option<&Q>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(segments, query)?;
        tracing::debug!("GET {}", url);
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let resp = client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed = serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::MalformedBody(e.to_string())
        })?;

        Ok(parsed)
    }

    /// Fetches one page of wallpapers, optionally scoped to a category.
    ///
    /// The body must be a JSON array. Elements that are not objects are
    /// skipped with a warning; missing fields are left as `None`.
    pub async fn get_wallpapers(&self, query: &WallpaperQuery) -> Result<Vec<RawWallpaper>, Error> {
        Ok(self.get_wallpaper_page(query).await?.records)
    }

    /// Like [`get_wallpapers`](Self::get_wallpapers), but also reports how
    /// many elements the service sent before any were skipped.
    pub async fn get_wallpaper_page(&self, query: &WallpaperQuery) -> Result<WallpaperPage, Error> {
        let elements = self
            .get::<Vec<Value>, WallpaperQuery>(&query.path_segments(), Some(query))
            .await?;
        let received = elements.len();
        Ok(WallpaperPage {
            records: decode_records(elements),
            received,
        })
    }

    /// Fetches the list of category slugs. Non-string elements are ignored.
    pub async fn get_categories(&self) -> Result<Vec<CategorySlug>, Error> {
        let elements = self
            .get::<Vec<Value>, WallpaperQuery>(&["categories"], None)
            .await?;
        Ok(elements
            .into_iter()
            .filter_map(|value| match value {
                Value::String(slug) if !slug.trim().is_empty() => Some(slug),
                other => {
                    tracing::warn!("Skipping non-string category entry: {}", other);
                    None
                }
            })
            .collect())
    }
}

fn decode_records(elements: Vec<Value>) -> Vec<RawWallpaper> {
    elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| {
            if !element.is_object() {
                tracing::warn!("Skipping non-object wallpaper at index {}: {}", index, element);
                return None;
            }
            match serde_json::from_value::<RawWallpaper>(element) {
                Ok(raw) => Some(raw),
                Err(e) => {
                    tracing::warn!("Skipping undecodable wallpaper at index {}: {}", index, e);
                    None
                }
            }
        })
        .collect()
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
