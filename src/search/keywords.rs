use crate::types::config::{DEFAULT_MAX_KEYWORD_COUNT, DEFAULT_MAX_KEYWORD_LENGTH};
use crate::types::{SearchError, SearchResult};
use std::fmt;

/// 検証済みのキーワード
///
/// 空白を含まない空でない文字列。大文字小文字は入力のまま保持する。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Keyword(String);

impl Keyword {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 文字数（Unicodeコードポイント数）
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Keyword {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// キーワード解析の上限値
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordLimits {
    pub max_count: usize,
    pub max_length: usize,
}

impl Default for KeywordLimits {
    fn default() -> Self {
        Self {
            max_count: DEFAULT_MAX_KEYWORD_COUNT,
            max_length: DEFAULT_MAX_KEYWORD_LENGTH,
        }
    }
}

impl KeywordLimits {
    pub fn new(max_count: usize, max_length: usize) -> Self {
        Self {
            max_count,
            max_length,
        }
    }

    /// この上限値で入力を解析する
    pub fn parse(&self, input: &str) -> SearchResult<Vec<Keyword>> {
        parse_keywords(input, self.max_count, self.max_length)
    }
}

/// 空白区切りのキーワード文字列を解析・検証する
///
/// - スペース・タブ・改行の連続は1つの区切りとして扱い、前後の空白は捨てる
/// - キーワードは出現順に並び、重複もそのまま残る
/// - 件数の検証を長さの検証より先に行う
/// - 長さはバイト数ではなくコードポイント数で数える（"日本語"は3文字）
///
/// # Errors
/// - 空白を除いて何も残らない: [`SearchError::EmptyInput`]
/// - 件数が`max_count`を超える: [`SearchError::TooManyKeywords`]
/// - いずれかが`max_length`文字を超える: [`SearchError::KeywordTooLong`]
///
/// # Example
/// ```
/// use feedstore::search::parse_keywords;
/// let keywords = parse_keywords("  Go   React ", 10, 100).unwrap();
/// let words: Vec<&str> = keywords.iter().map(|k| k.as_str()).collect();
/// assert_eq!(words, ["Go", "React"]);
/// ```
pub fn parse_keywords(
    input: &str,
    max_count: usize,
    max_length: usize,
) -> SearchResult<Vec<Keyword>> {
    let words: Vec<&str> = input.split_whitespace().collect();
    if words.is_empty() {
        return Err(SearchError::EmptyInput);
    }

    if words.len() > max_count {
        return Err(SearchError::too_many_keywords(words.len(), max_count));
    }

    if let Some(long) = words.iter().find(|w| w.chars().count() > max_length) {
        return Err(SearchError::keyword_too_long(*long, max_length));
    }

    Ok(words.into_iter().map(|w| Keyword(w.to_string())).collect())
}
