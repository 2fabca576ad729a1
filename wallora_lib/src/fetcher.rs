//! The page-fetching seam between the feed controller and the network.

use std::sync::Arc;

use async_trait::async_trait;

use crate::display::Wallpaper;
use crate::error::WalloraError;

/// A fetch that did not produce a list of records.
///
/// This is the only failure the feed controller understands. Transport
/// errors, non-2xx statuses and unparseable bodies all collapse into it.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct NetworkError {
    pub message: String,
}

impl NetworkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<WalloraError> for NetworkError {
    fn from(e: WalloraError) -> Self {
        Self::new(e.to_string())
    }
}

/// A fetched page together with the size of the page the source sent.
///
/// `received` can exceed `records.len()` when the source skipped elements
/// it could not turn into wallpapers. Whether more pages exist is decided
/// from `received`, so skipped elements never end the feed early.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchedPage {
    pub records: Vec<Wallpaper>,
    pub received: usize,
}

impl From<Vec<Wallpaper>> for FetchedPage {
    fn from(records: Vec<Wallpaper>) -> Self {
        let received = records.len();
        Self { records, received }
    }
}

/// Source of wallpaper pages for a [`PagedFeedController`](crate::feed::PagedFeedController).
///
/// `page` is 1-indexed. An empty vector means the listing is exhausted.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<Vec<Wallpaper>, NetworkError>;

    /// What the controller calls. Sources that drop elements override this
    /// to report the size of the page they were sent.
    async fn fetch_counted_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<FetchedPage, NetworkError> {
        self.fetch_page(page, page_size).await.map(FetchedPage::from)
    }
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for Arc<T> {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<Vec<Wallpaper>, NetworkError> {
        (**self).fetch_page(page, page_size).await
    }

    async fn fetch_counted_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<FetchedPage, NetworkError> {
        (**self).fetch_counted_page(page, page_size).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_error_from_api_error_keeps_message() {
        let err: NetworkError = WalloraError::Api(wallora_api::Error::HttpStatus {
            status: 502,
            body: "bad gateway".to_string(),
        })
        .into();
        assert!(err.message.contains("502"));
        assert_eq!(err.to_string(), err.message);
    }

    #[test]
    fn fetched_page_from_records_counts_them() {
        let page = FetchedPage::from(Vec::<Wallpaper>::new());
        assert_eq!(page.received, 0);
        assert!(page.records.is_empty());
    }
}
