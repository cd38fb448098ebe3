use crate::search::{Field, FieldValue, Searchable, SourceSearchFilters, SourceType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::cmp::Ordering;

// 配信元エンティティ（sourcesテーブルと一致）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Source {
    pub id: i64,
    pub name: String,
    pub feed_url: String,
    pub source_type: SourceType,
    pub active: bool,
    pub last_crawled_at: Option<DateTime<Utc>>,
}

// 挿入用の配信元
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSource {
    pub name: String,
    pub feed_url: String,
    pub source_type: SourceType,
    pub active: bool,
}

impl Searchable for Source {
    const KEYWORD_FIELDS: &'static [Field] = &[Field::Name, Field::FeedUrl];

    type Filters = SourceSearchFilters;

    fn field(&self, field: Field) -> Option<FieldValue<'_>> {
        match field {
            Field::Name => Some(FieldValue::Text(&self.name)),
            Field::FeedUrl => Some(FieldValue::Text(&self.feed_url)),
            Field::SourceType => Some(FieldValue::Text(self.source_type.as_str())),
            Field::Active => Some(FieldValue::Bool(self.active)),
            _ => None,
        }
    }

    /// id昇順
    fn result_order(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}
