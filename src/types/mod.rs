//! 型定義モジュール
//!
//! アプリケーション全体で使用される共通的な型定義を管理します。
//! - エラー型: 検索・ストレージ・設定・インフラ
//! - 設定値: 検索の上限値と期限
//! - 取り込み結果型

pub mod config;
pub mod error;
pub mod infra;
pub mod result;

// 便利な再エクスポート
pub use config::{ConfigError, ConfigResult, SearchConfig};
pub use error::{SearchError, SearchResult, StoreError, StoreResult};
pub use infra::{InfraError, InfraResult};
pub use result::IngestResult;
