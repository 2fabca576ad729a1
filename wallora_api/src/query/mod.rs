mod common;
pub use self::common::{Query, QueryCommon};

mod wallpaper;
pub use self::wallpaper::WallpaperQuery;
