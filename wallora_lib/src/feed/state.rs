use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use wallora_api::types::WallpaperID;

use crate::display::Wallpaper;

/// What the feed is doing right now.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum FeedStatus {
    #[default]
    Idle,
    LoadingInitial,
    LoadingMore,
    Refreshing,
    Error,
}

impl FeedStatus {
    /// True while a page request is outstanding.
    pub fn is_loading(self) -> bool {
        matches!(
            self,
            FeedStatus::LoadingInitial | FeedStatus::LoadingMore | FeedStatus::Refreshing
        )
    }
}

impl fmt::Display for FeedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FeedStatus::Idle => "idle",
            FeedStatus::LoadingInitial => "loading",
            FeedStatus::LoadingMore => "loading more",
            FeedStatus::Refreshing => "refreshing",
            FeedStatus::Error => "error",
        };
        write!(f, "{}", s)
    }
}

/// The three transitions a rendering layer can trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum FeedOp {
    Initialize,
    LoadMore,
    Refresh,
}

/// Read-only view handed to the rendering layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedSnapshot {
    pub items: Vec<Wallpaper>,
    pub status: FeedStatus,
    pub last_error: Option<String>,
    pub has_more: bool,
}

impl FeedSnapshot {
    /// Nothing loaded and nothing left to load.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && !self.has_more && self.status == FeedStatus::Idle
    }
}

#[derive(Debug)]
pub(crate) struct FeedState {
    pub(crate) items: Vec<Wallpaper>,
    seen: HashSet<WallpaperID>,
    pub(crate) page_number: u32,
    pub(crate) has_more: bool,
    pub(crate) status: FeedStatus,
    pub(crate) last_error: Option<String>,
    pub(crate) generation: u64,
    pub(crate) last_failed: Option<FeedOp>,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            seen: HashSet::new(),
            page_number: 1,
            has_more: true,
            status: FeedStatus::Idle,
            last_error: None,
            generation: 0,
            last_failed: None,
        }
    }
}

impl FeedState {
    /// Drops every accumulated record.
    pub(crate) fn clear_items(&mut self) {
        self.items.clear();
        self.seen.clear();
    }

    /// Appends records whose id is not on screen yet, in order. Returns how
    /// many were added.
    pub(crate) fn append_unseen(&mut self, records: Vec<Wallpaper>) -> usize {
        let before = self.items.len();
        for record in records {
            if self.seen.insert(record.id.clone()) {
                self.items.push(record);
            } else {
                tracing::debug!("Collapsing duplicate wallpaper id {}", record.id);
            }
        }
        self.items.len() - before
    }

    pub(crate) fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            items: self.items.clone(),
            status: self.status,
            last_error: self.last_error.clone(),
            has_more: self.has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallpaper(id: &str) -> Wallpaper {
        Wallpaper {
            id: id.to_string(),
            category: "nature".to_string(),
            title: "Forest Path".to_string(),
            image_url: format!("https://x/{}.jpg", id),
            thumbnail_url: format!("https://x/{}.jpg", id),
            timestamp: None,
        }
    }

    #[test]
    fn append_keeps_first_occurrence() {
        let mut state = FeedState::default();
        let mut dup = wallpaper("a");
        dup.title = "Second".to_string();
        let added = state.append_unseen(vec![wallpaper("a"), wallpaper("b"), dup]);
        assert_eq!(added, 2);
        assert_eq!(state.items[0].title, "Forest Path");
        assert_eq!(state.items[1].id, "b");
    }

    #[test]
    fn clear_forgets_seen_ids() {
        let mut state = FeedState::default();
        state.append_unseen(vec![wallpaper("a")]);
        state.clear_items();
        assert_eq!(state.append_unseen(vec![wallpaper("a")]), 1);
    }

    #[test]
    fn loading_statuses() {
        assert!(FeedStatus::LoadingInitial.is_loading());
        assert!(FeedStatus::Refreshing.is_loading());
        assert!(!FeedStatus::Idle.is_loading());
        assert!(!FeedStatus::Error.is_loading());
    }

    #[test]
    fn status_display() {
        assert_eq!(FeedStatus::LoadingMore.to_string(), "loading more");
        assert_eq!(FeedStatus::Error.to_string(), "error");
    }
}
