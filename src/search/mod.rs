//! 検索クエリと存在確認のエンジン
//!
//! - `keywords`: 自由入力を上限付きのキーワード列へ解析・検証
//! - `pattern`: キーワードを部分一致用の`ILIKE`パターンへエスケープ
//! - `compose`: キーワードとフィルターを1つのAND連結の述語列に組み立て、検索を委譲
//! - `exists`: URLの一括存在確認（問い合わせは常に1回以下）
//! - `store`: ストレージ協調者のトレイトと期限付き呼び出し
//!
//! どの処理も呼び出しごとに値を組み立てるだけで、共有の可変状態は持たない。

pub mod compose;
pub mod exists;
pub mod filters;
pub mod keywords;
pub mod memory;
pub mod pattern;
pub mod store;

pub use compose::{
    compose, search, CompiledPredicate, Field, FieldValue, FilterSet, FilterValue, Predicate,
    Searchable,
};
pub use exists::exists_batch;
pub use filters::{ArticleSearchFilters, SourceSearchFilters, SourceType};
pub use keywords::{parse_keywords, Keyword, KeywordLimits};
pub use memory::MemoryStore;
pub use pattern::{escape_ilike, unescape_ilike, LikePattern};
pub use store::{with_deadline, MembershipStore, SearchStore, UniqueKey};
