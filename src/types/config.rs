use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// 設定関連のエラー型
/// 環境変数、設定値の検証など設定に関するエラーを定義
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 環境変数が見つからない
    #[error("環境変数が見つかりません: {name}")]
    MissingEnvironmentVariable { name: String },

    /// 設定値が不正
    #[error("設定値が不正です: {reason}")]
    InvalidValue { reason: String },
}

impl ConfigError {
    /// 環境変数不足エラーを作成
    pub fn missing_env_var<N: Into<String>>(name: N) -> Self {
        Self::MissingEnvironmentVariable { name: name.into() }
    }

    /// 不正な設定値エラーを作成
    pub fn invalid_value<R: Into<String>>(reason: R) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }
}

/// 設定エラーのResult型エイリアス
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// 1回の検索で受け付けるキーワード数の既定値
pub const DEFAULT_MAX_KEYWORD_COUNT: usize = 10;
/// キーワード1つあたりの最大文字数（コードポイント）の既定値
pub const DEFAULT_MAX_KEYWORD_LENGTH: usize = 100;
/// ストレージ呼び出し1回あたりの期限の既定値
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(5);

/// 検索の設定値
///
/// 上限値は入力検証のためのもので、性能保証ではない。
/// プロセス全体の可変状態は持たず、呼び出し側が値として渡す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_keyword_count: usize,
    pub max_keyword_length: usize,
    pub timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_keyword_count: DEFAULT_MAX_KEYWORD_COUNT,
            max_keyword_length: DEFAULT_MAX_KEYWORD_LENGTH,
            timeout: DEFAULT_SEARCH_TIMEOUT,
        }
    }
}

impl SearchConfig {
    /// 環境変数から設定を読み込む（未設定の項目は既定値）
    ///
    /// - `SEARCH_MAX_KEYWORDS`
    /// - `SEARCH_MAX_KEYWORD_LENGTH`
    /// - `SEARCH_TIMEOUT_SECS`
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の取得関数から設定を組み立てる
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let max_keyword_count = read_positive(&lookup, "SEARCH_MAX_KEYWORDS")?
            .unwrap_or(defaults.max_keyword_count);
        let max_keyword_length = read_positive(&lookup, "SEARCH_MAX_KEYWORD_LENGTH")?
            .unwrap_or(defaults.max_keyword_length);
        let timeout = read_positive::<u64, _>(&lookup, "SEARCH_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        Ok(Self {
            max_keyword_count,
            max_keyword_length,
            timeout,
        })
    }
}

/// 正の整数として環境変数を読む。未設定ならNone
fn read_positive<T, F>(lookup: &F, name: &str) -> ConfigResult<Option<T>>
where
    T: FromStr + PartialOrd + Default,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };
    match raw.trim().parse::<T>() {
        Ok(value) if value > T::default() => Ok(Some(value)),
        _ => Err(ConfigError::invalid_value(format!(
            "{}は正の整数で指定してください: '{}'",
            name, raw
        ))),
    }
}

/// データベースURLを環境変数から取得
pub fn database_url() -> ConfigResult<String> {
    env::var("DATABASE_URL").map_err(|_| ConfigError::missing_env_var("DATABASE_URL"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = SearchConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, SearchConfig::default());
        assert_eq!(config.max_keyword_count, 10);
        assert_eq!(config.max_keyword_length, 100);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_overrides() {
        let config = SearchConfig::from_lookup(lookup_from(&[
            ("SEARCH_MAX_KEYWORDS", "3"),
            ("SEARCH_MAX_KEYWORD_LENGTH", "20"),
            ("SEARCH_TIMEOUT_SECS", "1"),
        ]))
        .unwrap();
        assert_eq!(config.max_keyword_count, 3);
        assert_eq!(config.max_keyword_length, 20);
        assert_eq!(config.timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_invalid_values_rejected() {
        for bad in ["0", "-1", "abc", ""] {
            let result = SearchConfig::from_lookup(lookup_from(&[("SEARCH_MAX_KEYWORDS", bad)]));
            assert!(
                matches!(result, Err(ConfigError::InvalidValue { .. })),
                "'{}'が受理されてしまいました",
                bad
            );
        }
    }
}
