mod wallpaper;
pub use self::wallpaper::{RawWallpaper, WallpaperID, WallpaperPage};

/// Category slug as returned by `/categories` (e.g. "nature").
pub type CategorySlug = String;
