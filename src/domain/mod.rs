//! ドメイン層
//!
//! - `article`: 記事エンティティとリポジトリ
//! - `source`: 配信元エンティティとリポジトリ
//! - `feed`: RSSチャンネルから挿入用記事への変換
//! - `service`: 検索と存在確認の入口

pub mod article;
pub mod feed;
pub mod service;
pub mod source;

pub use article::{Article, ArticleWithSource, NewArticle};
pub use feed::items_from_channel;
pub use service::SearchService;
pub use source::{NewSource, Source};
