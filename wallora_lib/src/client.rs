//! Retrying HTTP page fetcher over the API client.

use async_trait::async_trait;
use wallora_api::{Client, Query, WallpaperQuery};

use crate::category::Category;
use crate::config::{FeedConfig, RetryConfig};
use crate::display::{CatalogTitles, DeriveDisplayFields, Wallpaper};
use crate::error::WalloraError;
use crate::fetcher::{FetchedPage, NetworkError, PageFetcher};

/// [`PageFetcher`] backed by the wallpaper service.
///
/// Transport failures, 429 and 5xx responses are retried with exponential
/// backoff; other failures are returned immediately. Raw records go
/// through the configured [`DeriveDisplayFields`] strategy.
pub struct HttpFetcher {
    inner: Client,
    category: Option<String>,
    display: Box<dyn DeriveDisplayFields>,
    retry: RetryConfig,
}

impl HttpFetcher {
    /// Creates a fetcher for `config` using the [`CatalogTitles`] strategy.
    pub fn new(config: &FeedConfig) -> Self {
        Self {
            inner: Client::with_base_url(&config.base_url),
            category: config.category.clone(),
            display: Box::new(CatalogTitles),
            retry: config.retry.clone(),
        }
    }

    pub fn with_display(mut self, display: impl DeriveDisplayFields + 'static) -> Self {
        self.display = Box::new(display);
        self
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    async fn with_retry<T, F, Fut>(&self, label: &str, mut f: F) -> Result<T, WalloraError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, WalloraError>>,
    {
        let cfg = &self.retry;
        let mut attempt = 0usize;
        loop {
            match f().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    attempt += 1;
                    if attempt > cfg.max_retries || !is_retryable(&err) {
                        return Err(err);
                    }
                    let delay = cfg.delay_for_attempt(attempt);
                    tracing::warn!(
                        "{} request failed (attempt {}/{}), retrying in {:.1}s",
                        label,
                        attempt,
                        cfg.max_retries,
                        delay.as_secs_f64()
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Fetches one page and derives display fields for each record.
    pub async fn fetch_wallpapers(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Wallpaper>, WalloraError> {
        Ok(self.fetch_wallpaper_page(page, page_size).await?.records)
    }

    /// Same as [`fetch_wallpapers`](Self::fetch_wallpapers), keeping the
    /// number of elements the service sent before unusable ones were dropped.
    pub async fn fetch_wallpaper_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<FetchedPage, WalloraError> {
        let mut query = WallpaperQuery::default()
            .with_page(i64::from(page))
            .with_limit(i64::from(page_size));
        if let Some(category) = &self.category {
            query = query.with_category(category);
        }
        let query = &query;

        let raw = self
            .with_retry("wallpapers", || async {
                Ok(self.inner.get_wallpaper_page(query).await?)
            })
            .await?;

        let scope = self.category.as_deref();
        let records: Vec<Wallpaper> = raw
            .records
            .into_iter()
            .filter_map(|record| self.display.derive(record, scope))
            .collect();
        if records.len() < raw.received {
            tracing::debug!(
                "Page {}: kept {} of {} elements",
                page,
                records.len(),
                raw.received
            );
        }
        Ok(FetchedPage {
            records,
            received: raw.received,
        })
    }

    /// Fetches the category catalogue.
    pub async fn get_categories(&self) -> Result<Vec<Category>, WalloraError> {
        let slugs = self
            .with_retry("categories", || async {
                Ok(self.inner.get_categories().await?)
            })
            .await?;
        Ok(slugs.iter().map(|slug| Category::from_slug(slug)).collect())
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<Vec<Wallpaper>, NetworkError> {
        Ok(self.fetch_wallpapers(page, page_size).await?)
    }

    async fn fetch_counted_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<FetchedPage, NetworkError> {
        Ok(self.fetch_wallpaper_page(page, page_size).await?)
    }
}

fn is_retryable(err: &WalloraError) -> bool {
    match err {
        WalloraError::Api(api_err) => match api_err {
            wallora_api::Error::RequestFailed => true,
            wallora_api::Error::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            wallora_api::Error::MalformedBody(_) | wallora_api::Error::InvalidUrl(_) => false,
        },
        WalloraError::InvalidInput(_) => false,
    }
}
