pub mod model;
pub mod repository;

// 公開APIの再エクスポート
pub use model::{NewSource, Source};
pub use repository::{
    create_source, delete_source, get_source, list_active_sources, list_sources, search_sources,
    touch_crawled_at, update_source,
};
