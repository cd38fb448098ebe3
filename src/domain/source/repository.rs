use super::model::{NewSource, Source};
use crate::infra::db::push_predicates;
use crate::search::Predicate;
use crate::types::{StoreError, StoreResult};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

const SOURCE_COLUMNS: &str = "id, name, feed_url, source_type, active, last_crawled_at";

/// 配信元をidで取得する
pub async fn get_source(id: i64, pool: &PgPool) -> Result<Option<Source>> {
    let source = sqlx::query_as::<_, Source>(&format!(
        "SELECT {} FROM sources WHERE id = $1",
        SOURCE_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .context("配信元の取得に失敗")?;

    Ok(source)
}

/// 全配信元をid順に取得する
pub async fn list_sources(pool: &PgPool) -> Result<Vec<Source>> {
    let sources = sqlx::query_as::<_, Source>(&format!(
        "SELECT {} FROM sources ORDER BY id",
        SOURCE_COLUMNS
    ))
    .fetch_all(pool)
    .await
    .context("配信元一覧の取得に失敗")?;

    Ok(sources)
}

/// 有効な配信元のみ取得する（巡回対象）
pub async fn list_active_sources(pool: &PgPool) -> Result<Vec<Source>> {
    let sources = sqlx::query_as::<_, Source>(&format!(
        "SELECT {} FROM sources WHERE active = TRUE ORDER BY id",
        SOURCE_COLUMNS
    ))
    .fetch_all(pool)
    .await
    .context("有効な配信元の取得に失敗")?;

    Ok(sources)
}

/// 配信元を保存し、採番されたidを返す
pub async fn create_source(source: &NewSource, pool: &PgPool) -> Result<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO sources (name, feed_url, source_type, active)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(&source.name)
    .bind(&source.feed_url)
    .bind(source.source_type)
    .bind(source.active)
    .fetch_one(pool)
    .await
    .with_context(|| format!("配信元の保存に失敗: {}", source.feed_url))?;

    Ok(id)
}

/// 配信元を更新する。対象が存在すればtrue
pub async fn update_source(source: &Source, pool: &PgPool) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE sources
        SET name = $1, feed_url = $2, source_type = $3, active = $4
        WHERE id = $5
        "#,
    )
    .bind(&source.name)
    .bind(&source.feed_url)
    .bind(source.source_type)
    .bind(source.active)
    .bind(source.id)
    .execute(pool)
    .await
    .context("配信元の更新に失敗")?;

    Ok(result.rows_affected() > 0)
}

/// 配信元を削除する（記事も連鎖削除される）。対象が存在すればtrue
pub async fn delete_source(id: i64, pool: &PgPool) -> Result<bool> {
    let result = sqlx::query("DELETE FROM sources WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .context("配信元の削除に失敗")?;

    Ok(result.rows_affected() > 0)
}

/// 最終巡回日時を記録する
pub async fn touch_crawled_at(id: i64, at: DateTime<Utc>, pool: &PgPool) -> Result<bool> {
    let result = sqlx::query("UPDATE sources SET last_crawled_at = $1 WHERE id = $2")
        .bind(at)
        .bind(id)
        .execute(pool)
        .await
        .context("最終巡回日時の更新に失敗")?;

    Ok(result.rows_affected() > 0)
}

/// 述語列で配信元を検索する（id昇順）
pub async fn search_sources(predicates: &[Predicate], pool: &PgPool) -> StoreResult<Vec<Source>> {
    let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM sources", SOURCE_COLUMNS));
    push_predicates(&mut qb, predicates);
    qb.push(" ORDER BY id ASC");

    qb.build_query_as::<Source>()
        .fetch_all(pool)
        .await
        .map_err(|e| StoreError::query("配信元の検索", e))
}
