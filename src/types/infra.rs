use crate::types::ConfigError;
use thiserror::Error;

/// インフラストラクチャ層のエラー型
/// データベース接続・マイグレーション・設定など基盤的なエラーを定義
#[derive(Error, Debug)]
pub enum InfraError {
    /// データベース接続エラー
    #[error("データベース接続エラー: {source}")]
    DatabaseConnection {
        #[source]
        source: sqlx::Error,
    },

    /// マイグレーションエラー
    #[error("データベースマイグレーションエラー: {source}")]
    Migration {
        #[source]
        source: sqlx::migrate::MigrateError,
    },

    /// 設定エラー
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl InfraError {
    /// データベース接続エラーを作成
    pub fn database_connection(source: sqlx::Error) -> Self {
        Self::DatabaseConnection { source }
    }

    /// マイグレーションエラーを作成
    pub fn migration(source: sqlx::migrate::MigrateError) -> Self {
        Self::Migration { source }
    }
}

/// インフラエラーのResult型エイリアス
pub type InfraResult<T> = std::result::Result<T, InfraError>;
