use std::time::Duration;
use thiserror::Error;

/// 検索・存在確認のエラー型
///
/// 入力検証エラー（空入力、件数超過、長さ超過、不正なフィルター値）は
/// 呼び出し側が入力を直せば回復できる。HTTP層がメッセージを再解析せずに
/// 4xxへ変換できるよう、各バリアントは上限値や問題の値をフィールドとして持つ。
#[derive(Error, Debug)]
pub enum SearchError {
    /// キーワードが空（空文字列・空白のみを含む）
    #[error("キーワードが空です")]
    EmptyInput,

    /// キーワード数が上限を超えた
    #[error("キーワードが多すぎます: {count}件（上限{max}件）")]
    TooManyKeywords { count: usize, max: usize },

    /// 1つのキーワードが長すぎる（文字数はUnicodeコードポイント単位）
    #[error("キーワード'{keyword}'が最大長{max}文字を超えています")]
    KeywordTooLong { keyword: String, max: usize },

    /// 列挙型フィルターに許可されていない値が渡された
    #[error("フィールド'{field}'の値'{value}'は不正です: [{}]のいずれかを指定してください", allowed.join(", "))]
    InvalidFilterValue {
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    /// 日付がISO 8601形式でない
    #[error("日付形式が不正です: '{value}'（例: '2024-01-01' または '2024-01-01T10:00:00Z'）")]
    InvalidDate { value: String },

    /// 真偽値として解釈できない
    #[error("真偽値が不正です: '{value}'（'true', 'false', '1', '0' のいずれか）")]
    InvalidBoolean { value: String },

    /// ストレージ側の失敗（解釈せずそのまま伝播する）
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl SearchError {
    /// キーワード数超過エラーを作成
    pub fn too_many_keywords(count: usize, max: usize) -> Self {
        Self::TooManyKeywords { count, max }
    }

    /// キーワード長超過エラーを作成
    pub fn keyword_too_long<K: Into<String>>(keyword: K, max: usize) -> Self {
        Self::KeywordTooLong {
            keyword: keyword.into(),
            max,
        }
    }

    /// 不正なフィルター値エラーを作成
    pub fn invalid_filter_value<F, V>(field: F, value: V, allowed: &[&str]) -> Self
    where
        F: Into<String>,
        V: Into<String>,
    {
        Self::InvalidFilterValue {
            field: field.into(),
            value: value.into(),
            allowed: allowed.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// 不正な日付エラーを作成
    pub fn invalid_date<V: Into<String>>(value: V) -> Self {
        Self::InvalidDate {
            value: value.into(),
        }
    }

    /// 不正な真偽値エラーを作成
    pub fn invalid_boolean<V: Into<String>>(value: V) -> Self {
        Self::InvalidBoolean {
            value: value.into(),
        }
    }

    /// 入力検証エラー（呼び出し側の入力修正で回復可能）かどうか
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}

/// 検索エラーのResult型エイリアス
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// ストレージ協調者のエラー型
#[derive(Error, Debug)]
pub enum StoreError {
    /// クエリの実行に失敗
    #[error("データベースクエリエラー: {operation} - {source}")]
    Query {
        operation: String,
        #[source]
        source: sqlx::Error,
    },

    /// 期限内にクエリが完了しなかった（実行中のクエリは破棄される）
    #[error("データベースクエリがタイムアウトしました: {operation}（{after:?}）")]
    Timeout { operation: String, after: Duration },

    /// ストレージが利用できない
    #[error("ストレージが利用できません: {reason}")]
    Unavailable { reason: String },
}

impl StoreError {
    /// クエリエラーを作成
    pub fn query<O: Into<String>>(operation: O, source: sqlx::Error) -> Self {
        Self::Query {
            operation: operation.into(),
            source,
        }
    }

    /// タイムアウトエラーを作成
    pub fn timeout<O: Into<String>>(operation: O, after: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            after,
        }
    }

    /// 利用不可エラーを作成
    pub fn unavailable<R: Into<String>>(reason: R) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}

/// ストレージエラーのResult型エイリアス
pub type StoreResult<T> = std::result::Result<T, StoreError>;
