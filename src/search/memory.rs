use super::compose::{Predicate, Searchable};
use super::store::{MembershipStore, SearchStore, UniqueKey};
use crate::types::{StoreError, StoreResult};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// プロセス内のストレージ実装
///
/// 述語を`LikePattern`で評価するため、PostgreSQLの`ILIKE`と同じリテラル規則で照合する。
/// 呼び出し回数を数え、失敗や遅延を注入できるのでテスト用の協調者として使う。
pub struct MemoryStore<T> {
    records: Vec<T>,
    failure: Option<String>,
    latency: Option<Duration>,
    search_calls: AtomicUsize,
    membership_calls: AtomicUsize,
}

impl<T> MemoryStore<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records,
            failure: None,
            latency: None,
            search_calls: AtomicUsize::new(0),
            membership_calls: AtomicUsize::new(0),
        }
    }

    /// 全ての呼び出しを指定の理由で失敗させる
    pub fn failing<R: Into<String>>(mut self, reason: R) -> Self {
        self.failure = Some(reason.into());
        self
    }

    /// 各呼び出しの前に待ち時間を入れる
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn membership_calls(&self) -> usize {
        self.membership_calls.load(Ordering::SeqCst)
    }

    async fn enter(&self, counter: &AtomicUsize) -> StoreResult<()> {
        counter.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        match &self.failure {
            Some(reason) => Err(StoreError::unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<T> SearchStore<T> for MemoryStore<T>
where
    T: Searchable + Clone + Send + Sync,
{
    async fn execute_substring_search(&self, predicates: &[Predicate]) -> StoreResult<Vec<T>> {
        self.enter(&self.search_calls).await?;

        let compiled: Vec<_> = predicates.iter().map(Predicate::compile).collect();
        let mut matched: Vec<T> = self
            .records
            .iter()
            .filter(|record| compiled.iter().all(|p| p.matches(*record)))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.result_order(b));
        Ok(matched)
    }
}

#[async_trait]
impl<T> MembershipStore for MemoryStore<T>
where
    T: UniqueKey + Send + Sync,
{
    async fn execute_batch_membership_query(
        &self,
        candidates: &[String],
    ) -> StoreResult<Vec<String>> {
        self.enter(&self.membership_calls).await?;

        let wanted: HashSet<&str> = candidates.iter().map(String::as_str).collect();
        let mut found = HashSet::new();
        Ok(self
            .records
            .iter()
            .map(UniqueKey::unique_key)
            .filter(|key| wanted.contains(key) && found.insert(*key))
            .map(str::to_string)
            .collect())
    }
}
