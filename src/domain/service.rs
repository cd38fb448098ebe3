use crate::domain::{Article, Source};
use crate::search::{
    exists_batch, search, ArticleSearchFilters, KeywordLimits, MembershipStore, SearchStore,
    SourceSearchFilters,
};
use crate::types::{SearchConfig, SearchResult};
use std::collections::HashMap;

/// 検索と存在確認の入口
///
/// 自由入力のキーワードを設定の上限で検証し、ストレージ協調者に1回だけ委譲する。
/// 状態は設定とストレージへの参照だけなので、複数タスクから同時に呼び出してよい。
pub struct SearchService<S> {
    store: S,
    config: SearchConfig,
}

impl<S> SearchService<S> {
    pub fn new(store: S, config: SearchConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn limits(&self) -> KeywordLimits {
        KeywordLimits::new(self.config.max_keyword_count, self.config.max_keyword_length)
    }

    /// 記事をキーワードとフィルターで検索する
    pub async fn search_articles(
        &self,
        raw: &str,
        filters: &ArticleSearchFilters,
    ) -> SearchResult<Vec<Article>>
    where
        S: SearchStore<Article>,
    {
        let keywords = self.limits().parse(raw).inspect_err(|e| {
            tracing::debug!(error = %e, "記事検索のキーワードが不正");
        })?;
        let articles = search(&self.store, &keywords, filters, self.config.timeout).await?;
        tracing::info!(hits = articles.len(), "記事検索完了");
        Ok(articles)
    }

    /// 配信元をキーワードとフィルターで検索する
    pub async fn search_sources(
        &self,
        raw: &str,
        filters: &SourceSearchFilters,
    ) -> SearchResult<Vec<Source>>
    where
        S: SearchStore<Source>,
    {
        let keywords = self.limits().parse(raw).inspect_err(|e| {
            tracing::debug!(error = %e, "配信元検索のキーワードが不正");
        })?;
        let sources = search(&self.store, &keywords, filters, self.config.timeout).await?;
        tracing::info!(hits = sources.len(), "配信元検索完了");
        Ok(sources)
    }

    /// 候補URLのうち保存済みのものを返す（存在するものだけがtrueで入る）
    pub async fn existing_urls(&self, candidates: &[String]) -> SearchResult<HashMap<String, bool>>
    where
        S: MembershipStore,
    {
        exists_batch(&self.store, candidates, self.config.timeout).await
    }
}
