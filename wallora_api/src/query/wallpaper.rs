use url::Url;

use super::{common::QueryCommon, Query};

/// Query for the wallpaper listing endpoints.
///
/// Without a category the query targets `/wallpapers`; with one it targets
/// `/wallpapers/{category}`. Both take the same `page`/`limit` parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WallpaperQuery {
    pub common: QueryCommon,
    pub category: Option<String>,
}

impl Query for WallpaperQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        self.common.add_to_url(url)
    }
}

impl WallpaperQuery {
    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    /// Path segments of the endpoint this query targets.
    pub fn path_segments(&self) -> Vec<&str> {
        match &self.category {
            Some(category) => vec!["wallpapers", category.as_str()],
            None => vec!["wallpapers"],
        }
    }
}
