use crate::domain::article::{find_existing_urls, search_articles, Article};
use crate::domain::source::{search_sources, Source};
use crate::search::{MembershipStore, Predicate, SearchStore};
use crate::types::StoreResult;
use async_trait::async_trait;
use sqlx::PgPool;

/// PostgreSQLをストレージ協調者として使う実装
///
/// 接続プールは呼び出し側が所有し、ここでは1回の呼び出しにつき1クエリを発行するだけ。
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SearchStore<Article> for PgStore {
    async fn execute_substring_search(&self, predicates: &[Predicate]) -> StoreResult<Vec<Article>> {
        search_articles(predicates, &self.pool).await
    }
}

#[async_trait]
impl SearchStore<Source> for PgStore {
    async fn execute_substring_search(&self, predicates: &[Predicate]) -> StoreResult<Vec<Source>> {
        search_sources(predicates, &self.pool).await
    }
}

#[async_trait]
impl MembershipStore for PgStore {
    async fn execute_batch_membership_query(
        &self,
        candidates: &[String],
    ) -> StoreResult<Vec<String>> {
        find_existing_urls(candidates, &self.pool).await
    }
}
