use super::keywords::Keyword;
use super::pattern::{escape_ilike, LikePattern};
use super::store::{with_deadline, SearchStore};
use crate::types::SearchResult;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::time::Duration;

/// 述語が参照するフィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Summary,
    PublishedAt,
    SourceId,
    Name,
    FeedUrl,
    SourceType,
    Active,
}

impl Field {
    /// 対応するカラム名
    pub fn column(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Summary => "summary",
            Field::PublishedAt => "published_at",
            Field::SourceId => "source_id",
            Field::Name => "name",
            Field::FeedUrl => "feed_url",
            Field::SourceType => "source_type",
            Field::Active => "active",
        }
    }
}

/// エンティティが公開するフィールドの値
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Int(i64),
    Bool(bool),
    Time(DateTime<Utc>),
}

/// 等値フィルターの値
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Int(i64),
    Bool(bool),
}

impl FilterValue {
    fn matches(&self, value: FieldValue<'_>) -> bool {
        match (self, value) {
            (FilterValue::Text(expected), FieldValue::Text(actual)) => expected == actual,
            (FilterValue::Int(expected), FieldValue::Int(actual)) => *expected == actual,
            (FilterValue::Bool(expected), FieldValue::Bool(actual)) => *expected == actual,
            _ => false,
        }
    }
}

/// AND連結される述語の1要素
///
/// ストレージ協調者はこの列をそのまま1つのクエリに変換して実行する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// いずれかのフィールドがパターンに（大文字小文字を区別せず）マッチする
    Contains {
        fields: &'static [Field],
        pattern: String,
    },
    /// フィールドが値と等しい
    Equals { field: Field, value: FilterValue },
    /// フィールドの日時が`at`以降（境界を含む）
    OnOrAfter { field: Field, at: DateTime<Utc> },
    /// フィールドの日時が`at`以前（境界を含む）
    OnOrBefore { field: Field, at: DateTime<Utc> },
}

impl Predicate {
    /// インメモリ評価用に準備する（部分一致のパターンはここで1回だけコンパイルする）
    pub fn compile(&self) -> CompiledPredicate<'_> {
        let pattern = match self {
            Predicate::Contains { pattern, .. } => Some(LikePattern::compile(pattern)),
            _ => None,
        };
        CompiledPredicate {
            predicate: self,
            pattern,
        }
    }
}

/// パターンをコンパイル済みの述語
pub struct CompiledPredicate<'a> {
    predicate: &'a Predicate,
    pattern: Option<LikePattern>,
}

impl CompiledPredicate<'_> {
    /// エンティティが述語を満たすか
    pub fn matches<T: Searchable>(&self, entity: &T) -> bool {
        match (self.predicate, &self.pattern) {
            (Predicate::Contains { fields, .. }, Some(pattern)) => {
                fields.iter().any(|field| match entity.field(*field) {
                    Some(FieldValue::Text(text)) => pattern.matches(text),
                    _ => false,
                })
            }
            (Predicate::Contains { .. }, None) => false,
            (Predicate::Equals { field, value }, _) => entity
                .field(*field)
                .map_or(false, |actual| value.matches(actual)),
            (Predicate::OnOrAfter { field, at }, _) => {
                matches!(entity.field(*field), Some(FieldValue::Time(t)) if t >= *at)
            }
            (Predicate::OnOrBefore { field, at }, _) => {
                matches!(entity.field(*field), Some(FieldValue::Time(t)) if t <= *at)
            }
        }
    }
}

/// 検索フィルターの集合（未指定の項目は述語を生成しない）
pub trait FilterSet {
    fn predicates(&self) -> Vec<Predicate>;
}

/// 検索対象のエンティティ
pub trait Searchable {
    /// キーワードを照合するフィールド（いずれかに含まれればマッチ）
    const KEYWORD_FIELDS: &'static [Field];

    /// このエンティティに対応するフィルター
    type Filters: FilterSet;

    fn field(&self, field: Field) -> Option<FieldValue<'_>>;

    /// 検索結果の固定順序
    fn result_order(&self, other: &Self) -> Ordering;
}

/// キーワードとフィルターから述語列を組み立てる
///
/// キーワードごとに1つの`Contains`を生成し（順序は入力順）、その後にフィルターの述語を続ける。
/// 全て AND で結合されるため、並び順はマッチ集合に影響しない。
pub fn compose<T: Searchable>(keywords: &[Keyword], filters: &T::Filters) -> Vec<Predicate> {
    let mut predicates: Vec<Predicate> = keywords
        .iter()
        .map(|keyword| Predicate::Contains {
            fields: T::KEYWORD_FIELDS,
            pattern: escape_ilike(keyword.as_str()),
        })
        .collect();
    predicates.extend(filters.predicates());
    predicates
}

/// キーワードとフィルターで検索する
///
/// 述語を組み立てて1回だけストレージに委譲する。`timeout`を過ぎると
/// 実行中の呼び出しは破棄され`StoreError::Timeout`になる。リトライは行わない。
pub async fn search<T, S>(
    store: &S,
    keywords: &[Keyword],
    filters: &T::Filters,
    timeout: Duration,
) -> SearchResult<Vec<T>>
where
    T: Searchable,
    S: SearchStore<T> + ?Sized,
{
    let predicates = compose::<T>(keywords, filters);
    tracing::debug!(
        keywords = keywords.len(),
        predicates = predicates.len(),
        "部分一致検索を実行"
    );

    let results = with_deadline(
        "部分一致検索",
        timeout,
        store.execute_substring_search(&predicates),
    )
    .await?;

    Ok(results)
}
