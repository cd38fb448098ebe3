use super::store::{with_deadline, MembershipStore};
use crate::types::SearchResult;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// 候補キー（URL）のうち保存済みのものを一括で確認する
///
/// - 候補が空ならストレージにアクセスせず空のマップを返す
/// - それ以外は重複を除いた候補で1回だけ問い合わせる（候補ごとの往復はしない）
/// - 結果は存在するキーだけを`true`で持つ疎なマップ。存在しないキーは含まれない
/// - ストレージの失敗はそのまま返し、部分的な結果は返さない
pub async fn exists_batch<S>(
    store: &S,
    candidates: &[String],
    timeout: Duration,
) -> SearchResult<HashMap<String, bool>>
where
    S: MembershipStore + ?Sized,
{
    if candidates.is_empty() {
        return Ok(HashMap::new());
    }

    let mut seen = HashSet::with_capacity(candidates.len());
    let unique: Vec<String> = candidates
        .iter()
        .filter(|candidate| seen.insert(candidate.as_str()))
        .cloned()
        .collect();

    let found = with_deadline(
        "URL一括存在確認",
        timeout,
        store.execute_batch_membership_query(&unique),
    )
    .await?;

    // 問い合わせていないキーが返っても結果には含めない
    let existing: HashMap<String, bool> = found
        .into_iter()
        .filter(|key| seen.contains(key.as_str()))
        .map(|key| (key, true))
        .collect();

    tracing::debug!(
        candidates = candidates.len(),
        unique = unique.len(),
        existing = existing.len(),
        "URL一括存在確認"
    );

    Ok(existing)
}
