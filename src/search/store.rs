use super::compose::Predicate;
use crate::types::{StoreError, StoreResult};
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;

/// 部分一致検索を実行するストレージ協調者
#[async_trait]
pub trait SearchStore<T>: Send + Sync {
    /// AND連結された述語列を1回のクエリで実行し、固定順序で結果を返す
    async fn execute_substring_search(&self, predicates: &[Predicate]) -> StoreResult<Vec<T>>;
}

/// 一括の存在確認を実行するストレージ協調者
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// 候補のうち保存済みのものだけを1回のクエリで返す
    async fn execute_batch_membership_query(&self, candidates: &[String])
        -> StoreResult<Vec<String>>;
}

/// 存在確認に使う一意キーを持つエンティティ
pub trait UniqueKey {
    fn unique_key(&self) -> &str;
}

/// ストレージ呼び出しに期限を付ける
///
/// 期限を過ぎた時点で`fut`はドロップされ、実行中のクエリも中断される。
pub async fn with_deadline<T, F>(operation: &str, timeout: Duration, fut: F) -> StoreResult<T>
where
    F: Future<Output = StoreResult<T>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_elapsed) => {
            tracing::warn!(operation, timeout = ?timeout, "ストレージ呼び出しがタイムアウト");
            Err(StoreError::timeout(operation, timeout))
        }
    }
}
