use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use rss::Channel;

/// XML文字列からRSSチャンネルを解析する
pub fn parse_channel_from_xml_str(xml: &str) -> Result<Channel> {
    Channel::read_from(xml.as_bytes()).context("RSS XMLの解析に失敗")
}

/// フィード内の日付文字列を`DateTime<Utc>`に変換する
///
/// RSSの`pubDate`はRFC 2822が基本だが配信元によって形式が揺れるため、
/// `dateparser`で幅広く受け付けてUTCへ変換する。
///
/// # サポート形式の例
/// - "Sun, 10 Aug 2025 12:00:00 +0000"
/// - "Sun, 27 Jul 2025 07:36:19 GMT"
/// - "2025-01-15T10:00:00Z"
pub fn parse_date(date_str: &str) -> Result<DateTime<Utc>> {
    dateparser::parse(date_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| anyhow!("不正な日付形式: {}", date_str))
}
