//! 公开表格与日历源
//!
//! 只做拉取、解析和保留窗口过滤，不落库也不缓存。

mod calendar;
mod retention;
mod schedule;

pub use calendar::parse_calendar_ics;
pub use retention::{DEFAULT_RETENTION_DAYS, parse_feed_date, retain_recent};
pub use schedule::parse_schedule_csv;

#[cfg(test)]
pub(crate) use tests as mock;

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use reqwest::header::USER_AGENT;
use tracing::{debug, instrument};

use crate::config::FeedsConfig;
use crate::errors::{PortalError, Result};
use crate::models::feeds::{CalendarEvent, ScheduleRow};

#[async_trait::async_trait]
pub trait FeedSource: Send + Sync {
    // 拉取源地址的原始文本
    async fn fetch_text(&self, url: &str, feed: &str) -> Result<String>;
}

/// 通过 HTTP 拉取公开导出
pub struct HttpFeedSource {
    client: reqwest::Client,
}

impl HttpFeedSource {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| PortalError::upstream(format!("Failed to build feed client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch_text(&self, url: &str, feed: &str) -> Result<String> {
        // 源地址返回 404 也属于上游故障，不能当作请求资源不存在
        let upstream = |e: reqwest::Error| PortalError::upstream(format!("The {feed} feed: {e}"));

        let res = self
            .client
            .get(url)
            .header(USER_AGENT, "rust-course-portal/0.0.1")
            .send()
            .await
            .map_err(upstream)?
            .error_for_status()
            .map_err(upstream)?;

        res.text().await.map_err(upstream)
    }
}

pub struct FeedReader {
    source: Arc<dyn FeedSource>,
    schedule_csv_url: String,
    calendar_ics_url: String,
    retention_days: i64,
}

impl FeedReader {
    pub fn new(config: &FeedsConfig) -> Result<Self> {
        let source = HttpFeedSource::new(config.timeout_secs)?;
        Ok(Self::with_source(Arc::new(source), config))
    }

    pub fn with_source(source: Arc<dyn FeedSource>, config: &FeedsConfig) -> Self {
        Self {
            source,
            schedule_csv_url: config.schedule_csv_url.trim().to_string(),
            calendar_ics_url: config.calendar_ics_url.trim().to_string(),
            retention_days: config.retention_days,
        }
    }

    /// 课程安排表，已按保留窗口过滤
    #[instrument(level = "debug", skip(self))]
    pub async fn schedule(&self, today: NaiveDate) -> Result<Vec<ScheduleRow>> {
        let body = self.fetch(&self.schedule_csv_url, "schedule").await?;
        let rows = parse_schedule_csv(body.as_bytes())?;
        let total = rows.len();
        let rows = retain_recent(rows, today, self.retention_days);
        debug!("Schedule feed: kept {} of {} rows", rows.len(), total);
        Ok(rows)
    }

    /// 日历事件，已按保留窗口过滤
    #[instrument(level = "debug", skip(self))]
    pub async fn calendar(&self, today: NaiveDate) -> Result<Vec<CalendarEvent>> {
        let body = self.fetch(&self.calendar_ics_url, "calendar").await?;
        let events = parse_calendar_ics(&body);
        let total = events.len();
        let events = retain_recent(events, today, self.retention_days);
        debug!("Calendar feed: kept {} of {} events", events.len(), total);
        Ok(events)
    }

    async fn fetch(&self, url: &str, feed: &str) -> Result<String> {
        if url.is_empty() {
            return Err(PortalError::upstream(format!(
                "The {feed} feed URL is not configured"
            )));
        }
        self.source.fetch_text(url, feed).await
    }
}
