//! 课程安排表（CSV 导出）解析

use std::collections::HashMap;

use super::retention::parse_feed_date;
use crate::errors::{PortalError, Result};
use crate::models::feeds::ScheduleRow;

/// 表头别名，匹配时忽略大小写与首尾空白
const DATE_HEADERS: &[&str] = &["date"];
const COURSE_HEADERS: &[&str] = &["course", "course code"];
const TITLE_HEADERS: &[&str] = &["title", "event"];
const DETAILS_HEADERS: &[&str] = &["details", "description"];
const LINK_HEADERS: &[&str] = &["link", "url"];

pub fn parse_schedule_csv(data: &[u8]) -> Result<Vec<ScheduleRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let headers = rdr.headers()?;
    let header_map: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_lowercase(), i))
        .collect();
    let column = |aliases: &[&str]| aliases.iter().find_map(|a| header_map.get(*a).copied());

    let title_idx = column(TITLE_HEADERS)
        .ok_or_else(|| PortalError::feed_parse("Schedule is missing a title column"))?;
    let date_idx = column(DATE_HEADERS);
    let course_idx = column(COURSE_HEADERS);
    let details_idx = column(DETAILS_HEADERS);
    let link_idx = column(LINK_HEADERS);

    let mut rows = Vec::new();
    for (row_num, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| {
            PortalError::feed_parse(format!("Schedule row {} is malformed: {e}", row_num + 2))
        })?;

        // 空行跳过
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let cell = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        rows.push(ScheduleRow {
            date: parse_feed_date(&cell(date_idx).unwrap_or_default()),
            course_code: cell(course_idx),
            title: cell(Some(title_idx)).unwrap_or_default(),
            details: cell(details_idx),
            link: cell(link_idx),
        });
    }

    Ok(rows)
}
