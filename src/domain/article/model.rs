use crate::search::{ArticleSearchFilters, Field, FieldValue, Searchable, UniqueKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::cmp::Ordering;

// 記事エンティティ（articlesテーブルと一致）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Article {
    pub id: i64,
    pub source_id: i64,
    pub title: String,
    pub url: String,
    pub summary: String,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

// 記事とソース名の組
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ArticleWithSource {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub article: Article,
    pub source_name: String,
}

// 挿入用の記事（idとcreated_atはDBが採番）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewArticle {
    pub source_id: i64,
    pub title: String,
    pub url: String,
    pub summary: String,
    pub published_at: DateTime<Utc>,
}

impl Searchable for Article {
    /// キーワードはタイトルか要約のいずれかに含まれればよい
    const KEYWORD_FIELDS: &'static [Field] = &[Field::Title, Field::Summary];

    type Filters = ArticleSearchFilters;

    fn field(&self, field: Field) -> Option<FieldValue<'_>> {
        match field {
            Field::Title => Some(FieldValue::Text(&self.title)),
            Field::Summary => Some(FieldValue::Text(&self.summary)),
            Field::PublishedAt => Some(FieldValue::Time(self.published_at)),
            Field::SourceId => Some(FieldValue::Int(self.source_id)),
            _ => None,
        }
    }

    /// 公開日時の新しい順、同時刻はidの大きい順
    fn result_order(&self, other: &Self) -> Ordering {
        other
            .published_at
            .cmp(&self.published_at)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl UniqueKey for Article {
    fn unique_key(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn article(id: i64, day: u32) -> Article {
        let at = Utc.with_ymd_and_hms(2025, 7, day, 0, 0, 0).unwrap();
        Article {
            id,
            source_id: 1,
            title: format!("記事{}", id),
            url: format!("https://example.com/{}", id),
            summary: String::new(),
            published_at: at,
            created_at: at,
        }
    }

    #[test]
    fn test_result_order_newest_first() {
        let mut articles = vec![article(1, 1), article(2, 3), article(3, 2), article(4, 3)];
        articles.sort_by(|a, b| a.result_order(b));
        let ids: Vec<i64> = articles.iter().map(|a| a.id).collect();
        assert_eq!(ids, [4, 2, 3, 1]);
    }

    #[test]
    fn test_field_access() {
        let a = article(9, 5);
        assert_eq!(a.field(Field::SourceId), Some(FieldValue::Int(1)));
        assert_eq!(a.field(Field::Title), Some(FieldValue::Text("記事9")));
        assert_eq!(a.field(Field::Active), None);
        assert_eq!(a.unique_key(), "https://example.com/9");
    }
}
