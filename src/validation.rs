//! クエリパラメータの検証
//!
//! 省略可能なパラメータは空文字列を「未指定」として`None`を返す。

use crate::types::{SearchError, SearchResult};
use chrono::{DateTime, NaiveDate, Utc};

/// ISO 8601形式の日付を解析する
///
/// 対応形式:
/// - 日付のみ: `2024-01-01`（UTCの0時として扱う）
/// - RFC 3339: `2024-01-01T10:00:00Z`, `2024-12-25T15:30:00+09:00`
///
/// RSSの日付のような緩い形式は受け付けない（そちらは`infra::parser::parse_date`）。
pub fn parse_date_iso8601(input: &str) -> SearchResult<Option<DateTime<Utc>>> {
    if input.is_empty() {
        return Ok(None);
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Some(midnight.and_utc()));
        }
    }

    DateTime::parse_from_rfc3339(input)
        .map(|dt| Some(dt.with_timezone(&Utc)))
        .map_err(|_| SearchError::invalid_date(input))
}

/// 真偽値を解析する
///
/// 受け付ける値: `1 t T TRUE true True` / `0 f F FALSE false False`
pub fn parse_bool(input: &str) -> SearchResult<Option<bool>> {
    match input {
        "" => Ok(None),
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(Some(true)),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(Some(false)),
        _ => Err(SearchError::invalid_boolean(input)),
    }
}

/// 値が許可リストに含まれるか検証する（大文字小文字を区別、正規化なし）
///
/// 空の値は未指定として許可する。
pub fn validate_enum(value: &str, allowed: &[&str], field: &str) -> SearchResult<()> {
    if value.is_empty() || allowed.contains(&value) {
        return Ok(());
    }
    Err(SearchError::invalid_filter_value(field, value, allowed))
}

/// 正の整数IDを解析する
pub fn parse_id(input: &str, field: &str) -> SearchResult<Option<i64>> {
    if input.is_empty() {
        return Ok(None);
    }
    match input.parse::<i64>() {
        Ok(id) if id > 0 => Ok(Some(id)),
        _ => Err(SearchError::InvalidFilterValue {
            field: field.to_string(),
            value: input.to_string(),
            allowed: vec!["正の整数".to_string()],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    mod dates {
        use super::*;

        #[test]
        fn test_date_only() {
            let parsed = parse_date_iso8601("2024-01-01").unwrap().unwrap();
            assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        }

        #[test]
        fn test_rfc3339() {
            let utc = parse_date_iso8601("2024-01-01T10:00:00Z").unwrap().unwrap();
            assert_eq!(utc, Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());

            // +09:00はUTCへ変換される
            let jst = parse_date_iso8601("2024-12-25T15:30:00+09:00").unwrap().unwrap();
            assert_eq!(jst, Utc.with_ymd_and_hms(2024, 12, 25, 6, 30, 0).unwrap());
        }

        #[test]
        fn test_empty_is_none() {
            assert_eq!(parse_date_iso8601("").unwrap(), None);
        }

        #[test]
        fn test_invalid_formats() {
            for input in ["2024/01/01", "01-01-2024", "2024-13-01", "yesterday", "2024-01-01 10:00"] {
                match parse_date_iso8601(input) {
                    Err(SearchError::InvalidDate { value }) => assert_eq!(value, input),
                    other => panic!("{:?}が受理されました: {:?}", input, other),
                }
            }
        }
    }

    mod booleans {
        use super::*;

        #[test]
        fn test_accepted_values() {
            for input in ["1", "t", "T", "TRUE", "true", "True"] {
                assert_eq!(parse_bool(input).unwrap(), Some(true), "入力: {}", input);
            }
            for input in ["0", "f", "F", "FALSE", "false", "False"] {
                assert_eq!(parse_bool(input).unwrap(), Some(false), "入力: {}", input);
            }
            assert_eq!(parse_bool("").unwrap(), None);
        }

        #[test]
        fn test_rejected_values() {
            for input in ["yes", "no", "tRuE", "2", " true"] {
                assert!(
                    matches!(parse_bool(input), Err(SearchError::InvalidBoolean { .. })),
                    "{:?}が受理されました",
                    input
                );
            }
        }
    }

    mod enums {
        use super::*;

        const ALLOWED: [&str; 2] = ["RSS", "Webflow"];

        #[test]
        fn test_valid_and_empty() {
            assert!(validate_enum("RSS", &ALLOWED, "source_type").is_ok());
            assert!(validate_enum("", &ALLOWED, "source_type").is_ok());
        }

        #[test]
        fn test_case_sensitive() {
            match validate_enum("rss", &ALLOWED, "source_type") {
                Err(SearchError::InvalidFilterValue {
                    field,
                    value,
                    allowed,
                }) => {
                    assert_eq!(field, "source_type");
                    assert_eq!(value, "rss");
                    assert_eq!(allowed, ["RSS", "Webflow"]);
                }
                other => panic!("InvalidFilterValueが期待されましたが: {:?}", other),
            }
        }
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("", "source_id").unwrap(), None);
        assert_eq!(parse_id("42", "source_id").unwrap(), Some(42));
        for bad in ["0", "-3", "abc"] {
            assert!(matches!(
                parse_id(bad, "source_id"),
                Err(SearchError::InvalidFilterValue { .. })
            ));
        }
    }
}
