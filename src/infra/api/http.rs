use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Mutex;
use std::time::Duration;

/// フィード取得用HTTPクライアントの抽象化トレイト
///
/// 本番の`reqwest`実装とテスト用のモックを同じインターフェースで扱う。
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// 指定されたURLから本文をテキストで取得する
    ///
    /// 2xx以外のステータスはエラーとして扱う。
    async fn fetch_text(&self, url: &str, timeout: Duration) -> Result<String>;
}

/// `reqwest` を使用した本番用のHTTPクライアント実装
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn fetch_text(&self, url: &str, timeout: Duration) -> Result<String> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .with_context(|| format!("HTTPリクエストの送信に失敗: {}", url))?
            .error_for_status()
            .with_context(|| format!("HTTPステータスが異常: {}", url))?;

        response
            .text()
            .await
            .context("レスポンステキストの取得に失敗")
    }
}

/// テスト用のモックHTTPクライアント
///
/// 定義済みの本文かエラーを返し、要求されたURLを記録する。
pub struct MockHttpClient {
    response: std::result::Result<String, String>,
    requested: Mutex<Vec<String>>,
}

impl MockHttpClient {
    /// 常に指定の本文を返すモックを作成
    pub fn new_success(body: &str) -> Self {
        Self {
            response: Ok(body.to_string()),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// 常にエラーを返すモックを作成
    pub fn new_error(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// これまでに要求されたURL
    pub fn requested_urls(&self) -> Vec<String> {
        self.requested
            .lock()
            .map(|urls| urls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn fetch_text(&self, url: &str, _timeout: Duration) -> Result<String> {
        if let Ok(mut urls) = self.requested.lock() {
            urls.push(url.to_string());
        }
        self.response
            .clone()
            .map_err(|message| anyhow::anyhow!("モックHTTPエラー: {}", message))
    }
}
