use super::compose::{Field, FilterSet, FilterValue, Predicate};
use crate::types::{SearchError, SearchResult};
use crate::validation::{parse_bool, parse_date_iso8601, parse_id};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef};
use sqlx::Postgres;
use std::fmt;
use std::str::FromStr;

/// ソースの種類（固定の列挙）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceType {
    #[serde(rename = "RSS")]
    Rss,
    Webflow,
    #[serde(rename = "NextJS")]
    NextJs,
    Remix,
}

impl SourceType {
    /// 許可される値（大文字小文字を区別）
    pub const ALLOWED: [&'static str; 4] = ["RSS", "Webflow", "NextJS", "Remix"];

    pub fn as_str(self) -> &'static str {
        match self {
            SourceType::Rss => "RSS",
            SourceType::Webflow => "Webflow",
            SourceType::NextJs => "NextJS",
            SourceType::Remix => "Remix",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RSS" => Ok(SourceType::Rss),
            "Webflow" => Ok(SourceType::Webflow),
            "NextJS" => Ok(SourceType::NextJs),
            "Remix" => Ok(SourceType::Remix),
            _ => Err(SearchError::invalid_filter_value(
                "source_type",
                s,
                &Self::ALLOWED,
            )),
        }
    }
}

// sourcesテーブルのTEXT列と相互変換する（想定外の値はデコード時にエラー）
impl sqlx::Type<Postgres> for SourceType {
    fn type_info() -> PgTypeInfo {
        <&str as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <&str as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'q> sqlx::Encode<'q, Postgres> for SourceType {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        <&str as sqlx::Encode<'q, Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

impl<'r> sqlx::Decode<'r, Postgres> for SourceType {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let raw = <&str as sqlx::Decode<'r, Postgres>>::decode(value)?;
        Ok(raw.parse()?)
    }
}

/// ソース検索のフィルター
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSearchFilters {
    pub source_type: Option<SourceType>,
    pub active: Option<bool>,
}

impl SourceSearchFilters {
    /// クエリ文字列の値から組み立てる（空文字列は未指定）
    pub fn from_raw(source_type: &str, active: &str) -> SearchResult<Self> {
        let source_type = match source_type {
            "" => None,
            value => Some(value.parse()?),
        };
        Ok(Self {
            source_type,
            active: parse_bool(active)?,
        })
    }
}

impl FilterSet for SourceSearchFilters {
    fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();
        if let Some(source_type) = self.source_type {
            predicates.push(Predicate::Equals {
                field: Field::SourceType,
                value: FilterValue::Text(source_type.as_str().to_string()),
            });
        }
        if let Some(active) = self.active {
            predicates.push(Predicate::Equals {
                field: Field::Active,
                value: FilterValue::Bool(active),
            });
        }
        predicates
    }
}

/// 記事検索のフィルター
///
/// 日付範囲は下限のみなら「以降」、上限のみなら「以前」、両方なら両端を含む範囲。
/// 下限が上限より後の場合は何もマッチしない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleSearchFilters {
    pub source_id: Option<i64>,
    pub published_from: Option<DateTime<Utc>>,
    pub published_to: Option<DateTime<Utc>>,
}

impl ArticleSearchFilters {
    /// クエリ文字列の値から組み立てる（空文字列は未指定）
    pub fn from_raw(source_id: &str, from: &str, to: &str) -> SearchResult<Self> {
        Ok(Self {
            source_id: parse_id(source_id, "source_id")?,
            published_from: parse_date_iso8601(from)?,
            published_to: parse_date_iso8601(to)?,
        })
    }
}

impl FilterSet for ArticleSearchFilters {
    fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();
        if let Some(source_id) = self.source_id {
            predicates.push(Predicate::Equals {
                field: Field::SourceId,
                value: FilterValue::Int(source_id),
            });
        }
        if let Some(at) = self.published_from {
            predicates.push(Predicate::OnOrAfter {
                field: Field::PublishedAt,
                at,
            });
        }
        if let Some(at) = self.published_to {
            predicates.push(Predicate::OnOrBefore {
                field: Field::PublishedAt,
                at,
            });
        }
        predicates
    }
}
