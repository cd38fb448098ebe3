use anyhow::{Context, Result};
use feedstore::{
    app::ingest_active_sources,
    domain::SearchService,
    infra::{api::http::ReqwestHttpClient, db::setup_database, store::PgStore},
    search::ArticleSearchFilters,
    types::SearchConfig,
};
use tracing_subscriber::EnvFilter;

/// 有効な配信元を巡回し、引数があればそのキーワードで記事を検索する
///
/// ```text
/// cargo run                # 巡回のみ
/// cargo run -- go react    # 巡回後に "go react" で検索
/// ```
#[tokio::main]
async fn main() -> Result<()> {
    // 環境変数を読み込み（.envファイルがあれば使用）
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SearchConfig::from_env().context("検索設定の読み込みに失敗")?;
    let pool = setup_database()
        .await
        .context("データベースの初期化に失敗")?;

    println!("=== 巡回を開始 ===");
    let http = ReqwestHttpClient::new();
    let total = ingest_active_sources(&http, &pool, &config).await?;
    println!("{}", total);

    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if query.is_empty() {
        return Ok(());
    }

    println!("\n=== 記事検索: {} ===", query);
    let service = SearchService::new(PgStore::new(pool), config);
    let articles = service
        .search_articles(&query, &ArticleSearchFilters::default())
        .await
        .context("記事検索に失敗")?;
    println!(
        "{}",
        serde_json::to_string_pretty(&articles).context("検索結果のJSON変換に失敗")?
    );

    Ok(())
}
