use super::model::{Article, ArticleWithSource, NewArticle};
use crate::infra::db::push_predicates;
use crate::search::{compose, escape_ilike, Keyword, Predicate};
use crate::types::{StoreError, StoreResult};
use anyhow::{Context, Result};
use sqlx::{PgPool, Postgres, QueryBuilder};

const ARTICLE_COLUMNS: &str = "id, source_id, title, url, summary, published_at, created_at";

/// 記事をidで取得する
pub async fn get_article(id: i64, pool: &PgPool) -> Result<Option<Article>> {
    let article = sqlx::query_as::<_, Article>(&format!(
        "SELECT {} FROM articles WHERE id = $1",
        ARTICLE_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .context("記事の取得に失敗")?;

    Ok(article)
}

/// 記事をソース名付きで取得する
pub async fn get_article_with_source(id: i64, pool: &PgPool) -> Result<Option<ArticleWithSource>> {
    let article = sqlx::query_as::<_, ArticleWithSource>(
        r#"
        SELECT a.id, a.source_id, a.title, a.url, a.summary, a.published_at, a.created_at,
               s.name AS source_name
        FROM articles a
        INNER JOIN sources s ON a.source_id = s.id
        WHERE a.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .context("ソース名付き記事の取得に失敗")?;

    Ok(article)
}

/// 全記事を公開日時の新しい順に取得する
pub async fn list_articles(pool: &PgPool) -> Result<Vec<Article>> {
    let articles = sqlx::query_as::<_, Article>(&format!(
        "SELECT {} FROM articles ORDER BY published_at DESC, id DESC",
        ARTICLE_COLUMNS
    ))
    .fetch_all(pool)
    .await
    .context("記事一覧の取得に失敗")?;

    Ok(articles)
}

/// 全記事をソース名付きで取得する
pub async fn list_articles_with_source(pool: &PgPool) -> Result<Vec<ArticleWithSource>> {
    let articles = sqlx::query_as::<_, ArticleWithSource>(
        r#"
        SELECT a.id, a.source_id, a.title, a.url, a.summary, a.published_at, a.created_at,
               s.name AS source_name
        FROM articles a
        INNER JOIN sources s ON a.source_id = s.id
        ORDER BY a.published_at DESC, a.id DESC
        "#,
    )
    .fetch_all(pool)
    .await
    .context("ソース名付き記事一覧の取得に失敗")?;

    Ok(articles)
}

/// 記事を1件保存し、採番されたidを返す
pub async fn create_article(article: &NewArticle, pool: &PgPool) -> Result<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO articles (source_id, title, url, summary, published_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(article.source_id)
    .bind(&article.title)
    .bind(&article.url)
    .bind(&article.summary)
    .bind(article.published_at)
    .fetch_one(pool)
    .await
    .with_context(|| format!("記事の保存に失敗: {}", article.url))?;

    Ok(id)
}

/// 複数の記事を1トランザクションで保存する
///
/// 既に同じURLがあれば何もしない。実際に挿入された件数を返す。
pub async fn create_articles(articles: &[NewArticle], pool: &PgPool) -> Result<usize> {
    if articles.is_empty() {
        return Ok(0);
    }

    let mut tx = pool
        .begin()
        .await
        .context("トランザクションの開始に失敗しました")?;
    let mut inserted = 0;

    for article in articles {
        let result = sqlx::query(
            r#"
            INSERT INTO articles (source_id, title, url, summary, published_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (url) DO NOTHING
            "#,
        )
        .bind(article.source_id)
        .bind(&article.title)
        .bind(&article.url)
        .bind(&article.summary)
        .bind(article.published_at)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("記事の保存に失敗: {}", article.url))?;

        if result.rows_affected() > 0 {
            inserted += 1;
        }
    }

    tx.commit()
        .await
        .context("トランザクションのコミットに失敗しました")?;

    Ok(inserted)
}

/// 記事を更新する。対象が存在すればtrue
pub async fn update_article(article: &Article, pool: &PgPool) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE articles
        SET source_id = $1, title = $2, url = $3, summary = $4, published_at = $5
        WHERE id = $6
        "#,
    )
    .bind(article.source_id)
    .bind(&article.title)
    .bind(&article.url)
    .bind(&article.summary)
    .bind(article.published_at)
    .bind(article.id)
    .execute(pool)
    .await
    .context("記事の更新に失敗")?;

    Ok(result.rows_affected() > 0)
}

/// 記事を削除する。対象が存在すればtrue
pub async fn delete_article(id: i64, pool: &PgPool) -> Result<bool> {
    let result = sqlx::query("DELETE FROM articles WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .context("記事の削除に失敗")?;

    Ok(result.rows_affected() > 0)
}

/// URLが保存済みか（1件用。複数なら`find_existing_urls`を使う）
pub async fn exists_article_by_url(url: &str, pool: &PgPool) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM articles WHERE url = $1)",
    )
    .bind(url)
    .fetch_one(pool)
    .await
    .context("URL存在確認に失敗")?;

    Ok(exists)
}

/// 候補URLのうち保存済みのものを1回のクエリで取得する
pub async fn find_existing_urls(urls: &[String], pool: &PgPool) -> StoreResult<Vec<String>> {
    sqlx::query_scalar::<_, String>("SELECT url FROM articles WHERE url = ANY($1)")
        .bind(urls)
        .fetch_all(pool)
        .await
        .map_err(|e| StoreError::query("URL一括存在確認", e))
}

/// 述語列で記事を検索する（公開日時の新しい順）
pub async fn search_articles(predicates: &[Predicate], pool: &PgPool) -> StoreResult<Vec<Article>> {
    let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM articles", ARTICLE_COLUMNS));
    push_predicates(&mut qb, predicates);
    qb.push(" ORDER BY published_at DESC, id DESC");

    qb.build_query_as::<Article>()
        .fetch_all(pool)
        .await
        .map_err(|e| StoreError::query("記事の検索", e))
}

/// 単一キーワードでタイトル・要約を部分一致検索する
pub async fn search_articles_by_keyword(keyword: &str, pool: &PgPool) -> StoreResult<Vec<Article>> {
    let predicate = Predicate::Contains {
        fields: <Article as crate::search::Searchable>::KEYWORD_FIELDS,
        pattern: escape_ilike(keyword),
    };
    search_articles(&[predicate], pool).await
}

/// キーワード列のみで記事を検索する（フィルターなし）
pub async fn search_articles_by_keywords(
    keywords: &[Keyword],
    pool: &PgPool,
) -> StoreResult<Vec<Article>> {
    let predicates = compose::<Article>(keywords, &Default::default());
    search_articles(&predicates, pool).await
}
