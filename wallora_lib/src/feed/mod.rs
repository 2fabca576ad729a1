//! Paginated, de-duplicated wallpaper feed.

mod controller;
mod state;

pub use controller::{PageRequest, PagedFeedController};
pub use state::{FeedOp, FeedSnapshot, FeedStatus};
