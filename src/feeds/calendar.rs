//! iCalendar (ICS) 事件解析
//!
//! 只读取门户需要的 VEVENT 字段，其余组件与属性忽略。

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::feeds::{CalendarEvent, FeedDate};

pub fn parse_calendar_ics(text: &str) -> Vec<CalendarEvent> {
    let mut events = Vec::new();
    let mut current: Option<EventBuilder> = None;

    for line in unfold_lines(text) {
        let Some((name, value)) = split_property(&line) else {
            continue;
        };

        match (name.as_str(), value) {
            ("BEGIN", v) if v.eq_ignore_ascii_case("VEVENT") => {
                current = Some(EventBuilder::default());
            }
            ("END", v) if v.eq_ignore_ascii_case("VEVENT") => {
                if let Some(builder) = current.take() {
                    events.push(builder.build());
                }
            }
            (name, value) => {
                if let Some(builder) = current.as_mut() {
                    builder.set(name, value);
                }
            }
        }
    }

    events
}

#[derive(Default)]
struct EventBuilder {
    uid: Option<String>,
    summary: Option<String>,
    description: Option<String>,
    location: Option<String>,
    dtstart: Option<String>,
    dtend: Option<String>,
}

impl EventBuilder {
    fn set(&mut self, name: &str, value: &str) {
        let slot = match name {
            "UID" => &mut self.uid,
            "SUMMARY" => &mut self.summary,
            "DESCRIPTION" => &mut self.description,
            "LOCATION" => &mut self.location,
            "DTSTART" => &mut self.dtstart,
            "DTEND" => &mut self.dtend,
            _ => return,
        };
        *slot = Some(unescape_text(value));
    }

    fn build(self) -> CalendarEvent {
        let (date, starts_at) = match self.dtstart.as_deref().map(str::trim) {
            None | Some("") => (FeedDate::Missing, None),
            Some(raw) => match parse_ics_datetime(raw) {
                Some(start) => (FeedDate::Known(start.date()), Some(start)),
                None => (FeedDate::Unrecognized(raw.to_string()), None),
            },
        };

        CalendarEvent {
            uid: self.uid.filter(|s| !s.is_empty()),
            summary: self.summary.unwrap_or_default(),
            description: self.description.filter(|s| !s.is_empty()),
            location: self.location.filter(|s| !s.is_empty()),
            date,
            starts_at,
            ends_at: self.dtend.as_deref().and_then(parse_ics_datetime),
        }
    }
}

/// 展开折行：以空格或制表符开头的行属于上一行
fn unfold_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for raw in text.lines() {
        let raw = raw.trim_end_matches('\r');
        match (raw.strip_prefix([' ', '\t']), lines.last_mut()) {
            (Some(rest), Some(last)) => last.push_str(rest),
            _ => lines.push(raw.to_string()),
        }
    }
    lines
}

/// `NAME;PARAM=...:value` -> (NAME, value)
fn split_property(line: &str) -> Option<(String, &str)> {
    let (head, value) = line.split_once(':')?;
    let name = head.split(';').next().unwrap_or(head).trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_ascii_uppercase(), value))
}

fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// 支持 `YYYYMMDD`、`YYYYMMDDTHHMMSS` 以及带 `Z` 的 UTC 形式
fn parse_ics_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    let raw = raw.strip_suffix(['Z', 'z']).unwrap_or(raw);
    if raw.len() == 8 {
        NaiveDate::parse_from_str(raw, "%Y%m%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    } else {
        NaiveDateTime::parse_from_str(raw, "%Y%m%dT%H%M%S").ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
UID:evt-1@example.edu\r\n\
SUMMARY:Mid-semester exam\\, COMP1010\r\n\
DESCRIPTION:Bring your student card.\\nNo calculators\\; pens only\r\n\
\x20. Room opens 15 minutes early.\r\n\
LOCATION:Main Hall\r\n\
DTSTART;TZID=Australia/Sydney:20260312T090000\r\n\
DTEND;TZID=Australia/Sydney:20260312T110000\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
SUMMARY:Census date\r\n\
DTSTART;VALUE=DATE:20260331\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
SUMMARY:Field trip\r\n\
DTSTART:sometime soon\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
SUMMARY:Undated\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    #[test]
    fn test_parse_events() {
        let events = parse_calendar_ics(SAMPLE);
        assert_eq!(events.len(), 4);

        let exam = &events[0];
        assert_eq!(exam.uid.as_deref(), Some("evt-1@example.edu"));
        assert_eq!(exam.summary, "Mid-semester exam, COMP1010");
        assert_eq!(
            exam.description.as_deref(),
            Some("Bring your student card.\nNo calculators; pens only. Room opens 15 minutes early.")
        );
        assert_eq!(exam.location.as_deref(), Some("Main Hall"));
        assert_eq!(
            exam.date,
            FeedDate::Known(NaiveDate::from_ymd_opt(2026, 3, 12).unwrap())
        );
        assert_eq!(
            exam.ends_at,
            NaiveDate::from_ymd_opt(2026, 3, 12)
                .unwrap()
                .and_hms_opt(11, 0, 0)
        );

        assert_eq!(
            events[1].date,
            FeedDate::Known(NaiveDate::from_ymd_opt(2026, 3, 31).unwrap())
        );
        assert_eq!(
            events[2].date,
            FeedDate::Unrecognized("sometime soon".to_string())
        );
        assert_eq!(events[3].date, FeedDate::Missing);
    }

    #[test]
    fn test_utc_datetime() {
        assert_eq!(
            parse_ics_datetime("20260101T235959Z"),
            NaiveDate::from_ymd_opt(2026, 1, 1)
                .unwrap()
                .and_hms_opt(23, 59, 59)
        );
        assert!(parse_ics_datetime("2026-01-01").is_none());
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape_text(r"a\\b\,c\;d\Ne"), "a\\b,c;d\ne");
    }
}
