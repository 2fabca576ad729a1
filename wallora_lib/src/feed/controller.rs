//! Page-by-page feed controller.
//!
//! The controller owns the feed state and is the only thing that mutates it.
//! Each transition is split in two: `begin_*` checks the guards, moves the
//! status and hands out a [`PageRequest`]; `complete` applies the fetch
//! outcome. The async `initialize`/`load_more`/`refresh` methods run both
//! halves around the injected [`PageFetcher`]. Rendering layers that drive
//! fetches on their own executor can call the halves directly.
//!
//! Every `initialize` and `refresh` starts a new generation. A completion
//! carrying an older generation is discarded, so a slow initial load can
//! never overwrite the result of a refresh issued after it.

use crate::client::HttpFetcher;
use crate::config::FeedConfig;
use crate::display::Wallpaper;
use crate::fetcher::{FetchedPage, NetworkError, PageFetcher};

use super::state::{FeedOp, FeedSnapshot, FeedState, FeedStatus};

/// An outstanding page fetch issued by the controller.
///
/// Not `Clone`: a request is completed at most once.
#[derive(Debug)]
pub struct PageRequest {
    kind: FeedOp,
    page: u32,
    page_size: u32,
    generation: u64,
}

impl PageRequest {
    pub fn kind(&self) -> FeedOp {
        self.kind
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}

/// Maintains a growing, id-unique list of wallpapers fetched page by page.
///
/// Failures never propagate: they land in `status`/`last_error` and the
/// accumulated items are left alone.
pub struct PagedFeedController<F> {
    fetcher: F,
    page_size: u32,
    state: FeedState,
}

impl PagedFeedController<HttpFetcher> {
    /// Builds a controller reading from the service described by `config`,
    /// with catalogue titles.
    pub fn from_config(config: &FeedConfig) -> Self {
        Self::new(HttpFetcher::new(config), config.page_size)
    }
}

impl<F: PageFetcher> PagedFeedController<F> {
    /// Creates an idle controller. A zero `page_size` is treated as 1.
    pub fn new(fetcher: F, page_size: u32) -> Self {
        Self {
            fetcher,
            page_size: page_size.max(1),
            state: FeedState::default(),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn items(&self) -> &[Wallpaper] {
        &self.state.items
    }

    pub fn status(&self) -> FeedStatus {
        self.state.status
    }

    pub fn last_error(&self) -> Option<&str> {
        self.state.last_error.as_deref()
    }

    pub fn has_more(&self) -> bool {
        self.state.has_more
    }

    /// Next page `load_more` will request.
    pub fn page_number(&self) -> u32 {
        self.state.page_number
    }

    /// The operation whose failure is currently shown, if any.
    pub fn last_failed(&self) -> Option<FeedOp> {
        self.state.last_failed
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        self.state.snapshot()
    }

    /// Loads page 1 into an empty feed.
    pub async fn initialize(&mut self) {
        let request = self.begin_initialize();
        self.run(request).await;
    }

    /// Appends the next page. No-op while a fetch is outstanding or once the
    /// listing is exhausted.
    pub async fn load_more(&mut self) {
        if let Some(request) = self.begin_load_more() {
            self.run(request).await;
        }
    }

    /// Reloads page 1, replacing the feed on success. No-op while another
    /// refresh is outstanding.
    pub async fn refresh(&mut self) {
        if let Some(request) = self.begin_refresh() {
            self.run(request).await;
        }
    }

    /// Re-runs whichever operation failed last. No-op when nothing failed.
    pub async fn retry(&mut self) {
        match self.state.last_failed {
            Some(FeedOp::Initialize) => self.initialize().await,
            Some(FeedOp::LoadMore) => self.load_more().await,
            Some(FeedOp::Refresh) => self.refresh().await,
            None => {}
        }
    }

    async fn run(&mut self, request: PageRequest) {
        let result = self
            .fetcher
            .fetch_counted_page(request.page, request.page_size)
            .await;
        self.complete_page(request, result);
    }

    /// Resets the feed and issues a request for page 1.
    pub fn begin_initialize(&mut self) -> PageRequest {
        let state = &mut self.state;
        state.generation += 1;
        state.clear_items();
        state.page_number = 1;
        state.has_more = true;
        state.status = FeedStatus::LoadingInitial;
        state.last_error = None;
        tracing::debug!("Initializing feed (generation {})", state.generation);
        self.request(FeedOp::Initialize, 1)
    }

    /// Issues a request for the next page, or `None` when the guard refuses:
    /// a fetch is outstanding or there is nothing more to load.
    pub fn begin_load_more(&mut self) -> Option<PageRequest> {
        let state = &mut self.state;
        if state.status.is_loading() {
            tracing::debug!("Ignoring load more while {}", state.status);
            return None;
        }
        if !state.has_more {
            tracing::debug!("Ignoring load more: feed exhausted");
            return None;
        }
        state.status = FeedStatus::LoadingMore;
        state.last_error = None;
        let page = state.page_number;
        tracing::debug!("Loading page {}", page);
        Some(self.request(FeedOp::LoadMore, page))
    }

    /// Issues a request for page 1 that will replace the feed, or `None` if
    /// a refresh is already outstanding.
    pub fn begin_refresh(&mut self) -> Option<PageRequest> {
        let state = &mut self.state;
        if state.status == FeedStatus::Refreshing {
            tracing::debug!("Ignoring refresh: one is already in flight");
            return None;
        }
        state.generation += 1;
        state.status = FeedStatus::Refreshing;
        state.last_error = None;
        tracing::debug!("Refreshing feed (generation {})", state.generation);
        Some(self.request(FeedOp::Refresh, 1))
    }

    fn request(&self, kind: FeedOp, page: u32) -> PageRequest {
        PageRequest {
            kind,
            page,
            page_size: self.page_size,
            generation: self.state.generation,
        }
    }

    /// Applies the outcome of `request`. Returns `false` if the request was
    /// superseded by a later `initialize`/`refresh` and therefore ignored.
    pub fn complete(
        &mut self,
        request: PageRequest,
        result: Result<Vec<Wallpaper>, NetworkError>,
    ) -> bool {
        self.complete_page(request, result.map(FetchedPage::from))
    }

    /// [`complete`](Self::complete) for sources that report how many
    /// elements they were sent. Paging decisions use that count, not the
    /// number of records kept.
    pub fn complete_page(
        &mut self,
        request: PageRequest,
        result: Result<FetchedPage, NetworkError>,
    ) -> bool {
        let state = &mut self.state;
        if request.generation != state.generation {
            tracing::debug!(
                "Discarding stale {:?} result (generation {} != {})",
                request.kind,
                request.generation,
                state.generation
            );
            return false;
        }

        let FetchedPage { records, received } = match result {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("{:?} of page {} failed: {}", request.kind, request.page, e);
                state.status = FeedStatus::Error;
                state.last_error = Some(e.message);
                state.last_failed = Some(request.kind);
                return true;
            }
        };

        let fetched = received;
        let full_page = fetched >= request.page_size as usize;
        match request.kind {
            FeedOp::Initialize | FeedOp::Refresh => {
                state.clear_items();
                state.append_unseen(records);
                state.page_number = if fetched > 0 { 2 } else { 1 };
            }
            FeedOp::LoadMore => {
                if fetched > 0 {
                    let added = state.append_unseen(records);
                    state.page_number += 1;
                    tracing::debug!(
                        "Page {}: {} fetched, {} new",
                        request.page,
                        fetched,
                        added
                    );
                }
            }
        }
        state.has_more = full_page;
        state.status = FeedStatus::Idle;
        state.last_failed = None;
        true
    }
}
