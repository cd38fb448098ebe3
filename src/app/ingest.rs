use crate::{
    domain::{
        article::{create_articles, NewArticle},
        feed::items_from_channel,
        source::{list_active_sources, touch_crawled_at, Source},
    },
    infra::{api::http::HttpClient, parser::parse_channel_from_xml_str, store::PgStore},
    search::{exists_batch, MembershipStore, SourceType},
    types::{IngestResult, SearchConfig, SearchResult},
};
use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::PgPool;
use std::time::Duration;

/// 配信元のフィードを取得し、挿入用の記事に変換する
pub async fn fetch_feed_items<H: HttpClient + ?Sized>(
    http: &H,
    source: &Source,
    timeout: Duration,
) -> Result<Vec<NewArticle>> {
    let xml = http
        .fetch_text(&source.feed_url, timeout)
        .await
        .with_context(|| format!("フィードの取得に失敗: {}", source.feed_url))?;
    let channel = parse_channel_from_xml_str(&xml)
        .with_context(|| format!("フィードの解析に失敗: {}", source.feed_url))?;

    Ok(items_from_channel(&channel, source.id, Utc::now()))
}

/// 保存済みのURLを除外する
///
/// フィード全体で存在確認は1回だけ行う。戻り値は（新規の記事, 除外した件数）。
pub async fn partition_new<S: MembershipStore + ?Sized>(
    items: Vec<NewArticle>,
    store: &S,
    timeout: Duration,
) -> SearchResult<(Vec<NewArticle>, usize)> {
    let urls: Vec<String> = items.iter().map(|item| item.url.clone()).collect();
    let existing = exists_batch(store, &urls, timeout).await?;

    let total = items.len();
    let fresh: Vec<NewArticle> = items
        .into_iter()
        .filter(|item| !existing.contains_key(&item.url))
        .collect();
    let skipped = total - fresh.len();

    Ok((fresh, skipped))
}

/// 1つの配信元を巡回して新規記事を保存する
///
/// 1. フィードを取得して記事に変換
/// 2. 保存済みURLを一括確認して除外
/// 3. 新規記事を保存し、最終巡回日時を記録
pub async fn ingest_source<H: HttpClient + ?Sized>(
    http: &H,
    pool: &PgPool,
    source: &Source,
    config: &SearchConfig,
) -> Result<IngestResult> {
    let store = PgStore::new(pool.clone());
    ingest_source_with_store(http, &store, pool, source, config).await
}

/// 存在確認に使うストレージを指定して1つの配信元を巡回する
pub async fn ingest_source_with_store<H, S>(
    http: &H,
    store: &S,
    pool: &PgPool,
    source: &Source,
    config: &SearchConfig,
) -> Result<IngestResult>
where
    H: HttpClient + ?Sized,
    S: MembershipStore + ?Sized,
{
    let items = fetch_feed_items(http, source, config.timeout).await?;
    let (fresh, skipped) = partition_new(items, store, config.timeout)
        .await
        .with_context(|| format!("保存済みURLの確認に失敗: {}", source.name))?;

    // 確認と保存の間に他の巡回が挿入した分はON CONFLICTで捨てられる
    let inserted = create_articles(&fresh, pool).await?;
    let skipped = skipped + (fresh.len() - inserted);

    touch_crawled_at(source.id, Utc::now(), pool).await?;

    let result = IngestResult::new(inserted, skipped);
    tracing::info!(
        source_id = source.id,
        inserted = result.inserted,
        skipped = result.skipped,
        "配信元の巡回完了"
    );
    Ok(result)
}

/// 有効な全配信元を巡回する
///
/// 配信元ごとの失敗はログに残して次へ進む。RSS以外の配信元は対象外。
pub async fn ingest_active_sources<H: HttpClient + ?Sized>(
    http: &H,
    pool: &PgPool,
    config: &SearchConfig,
) -> Result<IngestResult> {
    let sources = list_active_sources(pool).await?;
    tracing::info!(sources = sources.len(), "巡回開始");

    let mut total = IngestResult::empty();
    for source in sources.iter().filter(|source| is_crawlable(source)) {
        match ingest_source(http, pool, source, config).await {
            Ok(result) => {
                println!("{}", result.display_with_source(&source.name));
                total = total.merge(result);
            }
            Err(e) => {
                tracing::warn!(source_id = source.id, error = ?e, "配信元の巡回に失敗");
            }
        }
    }

    tracing::info!(inserted = total.inserted, skipped = total.skipped, "巡回完了");
    Ok(total)
}

fn is_crawlable(source: &Source) -> bool {
    if source.source_type == SourceType::Rss {
        return true;
    }
    tracing::debug!(
        source_id = source.id,
        kind = %source.source_type,
        "RSS以外の配信元は巡回しない"
    );
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::Article;
    use crate::infra::api::http::MockHttpClient;
    use crate::search::MemoryStore;

    const FEED: &str = r#"
        <rss version="2.0">
            <channel>
                <title>Go Blog</title>
                <link>https://go.dev/blog</link>
                <description>The Go Blog</description>
                <item>
                    <title>Go 1.24</title>
                    <link>https://go.dev/blog/go1.24</link>
                    <pubDate>Tue, 11 Feb 2025 00:00:00 +0000</pubDate>
                </item>
                <item>
                    <title>Range functions</title>
                    <link>https://go.dev/blog/range-functions</link>
                </item>
            </channel>
        </rss>
        "#;

    fn source(source_type: SourceType) -> Source {
        Source {
            id: 1,
            name: "Go Blog".to_string(),
            feed_url: "https://go.dev/blog/feed.atom".to_string(),
            source_type,
            active: true,
            last_crawled_at: None,
        }
    }

    fn stored(url: &str) -> Article {
        let now = Utc::now();
        Article {
            id: 1,
            source_id: 1,
            title: "stored".to_string(),
            url: url.to_string(),
            summary: String::new(),
            published_at: now,
            created_at: now,
        }
    }

    // フィード取得
    mod fetching {
        use super::*;

        #[tokio::test]
        async fn test_fetch_feed_items() -> Result<(), anyhow::Error> {
            let http = MockHttpClient::new_success(FEED);
            let items =
                fetch_feed_items(&http, &source(SourceType::Rss), Duration::from_secs(5))
                    .await?;

            assert_eq!(items.len(), 2);
            assert_eq!(http.requested_urls(), vec!["https://go.dev/blog/feed.atom"]);
            println!("✅ フィード取得テスト成功: {}件", items.len());
            Ok(())
        }

        #[tokio::test]
        async fn test_fetch_error() {
            let http = MockHttpClient::new_error("接続拒否");
            let result =
                fetch_feed_items(&http, &source(SourceType::Rss), Duration::from_secs(5))
                    .await;
            assert!(result.is_err());
        }

        #[tokio::test]
        async fn test_invalid_xml() {
            let http = MockHttpClient::new_success("<html>not a feed</html>");
            let result =
                fetch_feed_items(&http, &source(SourceType::Rss), Duration::from_secs(5))
                    .await;
            assert!(result.is_err(), "RSSでない本文はエラーになるはず");
        }
    }

    // 保存済みURLの除外
    mod partitioning {
        use super::*;

        #[tokio::test]
        async fn test_partition_new() -> Result<(), anyhow::Error> {
            let http = MockHttpClient::new_success(FEED);
            let items =
                fetch_feed_items(&http, &source(SourceType::Rss), Duration::from_secs(5))
                    .await?;
            let store = MemoryStore::new(vec![stored("https://go.dev/blog/go1.24")]);

            let (fresh, skipped) = partition_new(items, &store, Duration::from_secs(5)).await?;

            assert_eq!(skipped, 1);
            assert_eq!(fresh.len(), 1);
            assert_eq!(fresh[0].url, "https://go.dev/blog/range-functions");
            assert_eq!(store.membership_calls(), 1, "フィード全体で1回だけ確認するはず");
            Ok(())
        }

        #[tokio::test]
        async fn test_partition_empty_feed() -> Result<(), anyhow::Error> {
            let store: MemoryStore<Article> = MemoryStore::new(Vec::new());
            let (fresh, skipped) = partition_new(Vec::new(), &store, Duration::from_secs(5)).await?;

            assert!(fresh.is_empty());
            assert_eq!(skipped, 0);
            assert_eq!(store.membership_calls(), 0);
            Ok(())
        }
    }

    #[test]
    fn test_is_crawlable() {
        assert!(is_crawlable(&source(SourceType::Rss)));
        for kind in [SourceType::Webflow, SourceType::NextJs, SourceType::Remix] {
            assert!(!is_crawlable(&source(kind)), "{}は巡回しないはず", kind);
        }
    }
}
