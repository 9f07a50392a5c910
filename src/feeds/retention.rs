use chrono::{Days, NaiveDate};

use crate::models::feeds::{Dated, FeedDate};

pub const DEFAULT_RETENTION_DAYS: i64 = 3;

/// 解析表格中的日期（日/月/年）
pub fn parse_feed_date(raw: &str) -> FeedDate {
    let raw = raw.trim();
    if raw.is_empty() {
        return FeedDate::Missing;
    }
    match NaiveDate::parse_from_str(raw, "%d/%m/%Y") {
        Ok(date) => FeedDate::Known(date),
        Err(_) => FeedDate::Unrecognized(raw.to_string()),
    }
}

/// 丢弃日期早于 `today - window_days` 的条目
///
/// 只有能确定日期的条目才会被丢弃，无法识别或缺失日期的条目一律保留。
pub fn retain_recent<T: Dated>(items: Vec<T>, today: NaiveDate, window_days: i64) -> Vec<T> {
    let cutoff = today
        .checked_sub_days(Days::new(window_days.max(0) as u64))
        .unwrap_or(NaiveDate::MIN);

    items
        .into_iter()
        .filter(|item| item.feed_date().known().is_none_or(|date| date >= cutoff))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::feeds::{CalendarEvent, ScheduleRow};

    fn row(date: &str) -> ScheduleRow {
        ScheduleRow {
            date: parse_feed_date(date),
            course_code: None,
            title: date.to_string(),
            details: None,
            link: None,
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_feed_date() {
        assert_eq!(parse_feed_date("05/03/2026"), FeedDate::Known(ymd(2026, 3, 5)));
        assert_eq!(parse_feed_date("5/3/2026"), FeedDate::Known(ymd(2026, 3, 5)));
        assert_eq!(parse_feed_date("  "), FeedDate::Missing);
        assert_eq!(
            parse_feed_date("Week 5"),
            FeedDate::Unrecognized("Week 5".to_string())
        );
        assert_eq!(
            parse_feed_date("2026-03-05"),
            FeedDate::Unrecognized("2026-03-05".to_string())
        );
    }

    #[test]
    fn test_retain_recent_is_fail_open() {
        let today = ymd(2026, 3, 10);
        let rows = vec![
            row("01/03/2026"), // 太早
            row("07/03/2026"), // 恰好在窗口边界
            row("06/03/2026"), // 早一天
            row("20/03/2026"),
            row("TBA"),
            row(""),
        ];

        let kept: Vec<_> = retain_recent(rows, today, DEFAULT_RETENTION_DAYS)
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(kept, vec!["07/03/2026", "20/03/2026", "TBA", ""]);
    }

    #[test]
    fn test_retain_recent_calendar_events() {
        let event = |summary: &str, date: FeedDate| CalendarEvent {
            uid: None,
            summary: summary.to_string(),
            description: None,
            location: None,
            date,
            starts_at: None,
            ends_at: None,
        };
        let events = vec![
            event("Stale", FeedDate::Known(ymd(2026, 2, 1))),
            event("Soon", FeedDate::Known(ymd(2026, 3, 12))),
            event("Fuzzy", FeedDate::Unrecognized("next week".to_string())),
            event("Open", FeedDate::Missing),
        ];

        let kept: Vec<_> = retain_recent(events, ymd(2026, 3, 10), DEFAULT_RETENTION_DAYS)
            .into_iter()
            .map(|e| e.summary)
            .collect();
        assert_eq!(kept, vec!["Soon", "Fuzzy", "Open"]);
    }
}
