//! フィード集約バックエンドの検索・存在確認エンジン
//!
//! - `search`: キーワード解析、パターンのエスケープ、述語の組み立て、一括存在確認
//! - `validation`: クエリ文字列のフィルター値の検証
//! - `domain`: 記事・配信元のエンティティとリポジトリ、検索サービス
//! - `infra`: PostgreSQL、HTTP、RSS解析
//! - `app`: 巡回ワークフロー
//! - `types`: エラー・設定・結果型

pub mod app;
pub mod domain;
pub mod infra;
pub mod search;
pub mod types;
pub mod validation;
