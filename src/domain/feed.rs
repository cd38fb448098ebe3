use crate::domain::article::NewArticle;
use crate::infra::parser::parse_date;
use chrono::{DateTime, Utc};
use rss::Channel;
use std::collections::HashSet;

/// タイトルがないか空白だけの項目に付けるタイトル
pub const UNTITLED: &str = "タイトルなし";

/// RSSチャンネルの`<item>`を挿入用の記事に変換する
///
/// - `<link>`のない項目は捨てる
/// - 同じリンクが複数回出たら最初の1件だけ残す
/// - 日付がないか解析できなければ`fetched_at`を公開日時とする
/// - 要約は`<description>`（なければ空文字列）
pub fn items_from_channel(
    channel: &Channel,
    source_id: i64,
    fetched_at: DateTime<Utc>,
) -> Vec<NewArticle> {
    let mut seen = HashSet::new();

    channel
        .items()
        .iter()
        .filter_map(|item| {
            let url = item.link()?.trim();
            if url.is_empty() || !seen.insert(url.to_string()) {
                return None;
            }
            let published_at = item
                .pub_date()
                .and_then(|date| parse_date(date).ok())
                .unwrap_or(fetched_at);

            Some(NewArticle {
                source_id,
                title: item
                    .title()
                    .map(str::trim)
                    .filter(|title| !title.is_empty())
                    .unwrap_or(UNTITLED)
                    .to_string(),
                url: url.to_string(),
                summary: item.description().unwrap_or_default().trim().to_string(),
                published_at,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::parser::parse_channel_from_xml_str;
    use chrono::TimeZone;

    const FEED: &str = r#"
        <rss version="2.0">
            <channel>
                <title>Test Feed</title>
                <link>http://example.com</link>
                <description>Test Description</description>
                <item>
                    <title>Test Article 1</title>
                    <link>http://example.com/article1</link>
                    <description>first</description>
                    <pubDate>Sun, 10 Aug 2025 12:00:00 +0000</pubDate>
                </item>
                <item>
                    <link>http://example.com/article2</link>
                    <pubDate>not a date</pubDate>
                </item>
                <item>
                    <title>No link</title>
                </item>
                <item>
                    <title>Duplicate</title>
                    <link>http://example.com/article1</link>
                </item>
            </channel>
        </rss>
        "#;

    #[test]
    fn test_items_from_channel() {
        let channel = parse_channel_from_xml_str(FEED).unwrap();
        let fetched_at = Utc.with_ymd_and_hms(2025, 8, 11, 0, 0, 0).unwrap();
        let articles = items_from_channel(&channel, 7, fetched_at);

        assert_eq!(articles.len(), 2, "リンクなしと重複は除外されるはず");

        assert_eq!(articles[0].url, "http://example.com/article1");
        assert_eq!(articles[0].title, "Test Article 1");
        assert_eq!(articles[0].summary, "first");
        assert_eq!(
            articles[0].published_at,
            Utc.with_ymd_and_hms(2025, 8, 10, 12, 0, 0).unwrap()
        );

        assert_eq!(articles[1].title, UNTITLED);
        assert_eq!(articles[1].summary, "");
        assert_eq!(articles[1].published_at, fetched_at);
        assert!(articles.iter().all(|a| a.source_id == 7));
    }

    #[test]
    fn test_blank_title_gets_placeholder() {
        let xml = r#"
            <rss version="2.0">
                <channel>
                    <title>Test Feed</title>
                    <link>http://example.com</link>
                    <description>Test Description</description>
                    <item>
                        <title>   </title>
                        <link>http://example.com/blank</link>
                    </item>
                    <item>
                        <title>  前後に空白  </title>
                        <link>http://example.com/padded</link>
                    </item>
                </channel>
            </rss>
            "#;
        let channel = parse_channel_from_xml_str(xml).unwrap();
        let articles = items_from_channel(&channel, 1, Utc::now());

        assert_eq!(articles[0].title, UNTITLED, "空白だけのタイトルは未設定扱いのはず");
        assert_eq!(articles[1].title, "前後に空白");
    }
}
