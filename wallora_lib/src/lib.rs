//! Library layer for Wallora: the paginated wallpaper feed and its collaborators.
//!
//! Wraps the `wallora_api` crate with a retrying page fetcher, display-field
//! derivation, the category catalogue, configuration and input validation,
//! and the [`PagedFeedController`] that a rendering layer drives.

pub mod category;
pub mod client;
pub mod config;
pub mod display;
pub mod error;
pub mod feed;
pub mod fetcher;
pub mod validation;

pub use wallora_api;
pub use wallora_api::types;

pub use category::Category;
pub use client::HttpFetcher;
pub use config::{FeedConfig, RetryConfig};
pub use display::{CatalogTitles, DeriveDisplayFields, PlainTitles, Wallpaper};
pub use error::WalloraError;
pub use feed::{FeedOp, FeedSnapshot, FeedStatus, PageRequest, PagedFeedController};
pub use fetcher::{FetchedPage, NetworkError, PageFetcher};
