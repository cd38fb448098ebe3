//! インフラストラクチャ層
//!
//! - `db`: 接続プール・マイグレーション・述語のSQL変換
//! - `store`: PostgreSQLによるストレージ協調者の実装
//! - `api::http`: フィード取得用HTTPクライアント
//! - `parser`: RSS XMLとフィード内日付の解析

pub mod api;
pub mod db;
pub mod parser;
pub mod store;
