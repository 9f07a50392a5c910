use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 表格 / 日历条目的日期
///
/// 无法识别或缺失的日期显式表示，保留策略据此决定是否保留条目。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feed.ts")]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum FeedDate {
    Known(NaiveDate),
    Unrecognized(String),
    Missing,
}

impl FeedDate {
    pub fn known(&self) -> Option<NaiveDate> {
        match self {
            FeedDate::Known(date) => Some(*date),
            _ => None,
        }
    }
}

/// 带日期的条目
pub trait Dated {
    fn feed_date(&self) -> &FeedDate;
}

/// 课程安排表中的一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feed.ts")]
pub struct ScheduleRow {
    pub date: FeedDate,
    pub course_code: Option<String>,
    pub title: String,
    pub details: Option<String>,
    pub link: Option<String>,
}

impl Dated for ScheduleRow {
    fn feed_date(&self) -> &FeedDate {
        &self.date
    }
}

/// 日历中的一个事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feed.ts")]
pub struct CalendarEvent {
    pub uid: Option<String>,
    pub summary: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: FeedDate,
    pub starts_at: Option<NaiveDateTime>,
    pub ends_at: Option<NaiveDateTime>,
}

impl Dated for CalendarEvent {
    fn feed_date(&self) -> &FeedDate {
        &self.date
    }
}
