//! 学期字符串解析
//!
//! LMS 的学期名称格式不统一（"2025 Semester 2"、"S1 2026"、"Fall 2025" ...），
//! 这里只做尽力解析；能确定时优先使用配置中的显式学期。

use chrono::Datelike;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::config::TermOverride;

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]{4}").expect("valid year regex"));
// 前后都不是数字的单个数字
static SEMESTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^0-9])([0-9])(?:[^0-9]|$)").expect("valid semester regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedTerm {
    pub year: i32,
    pub semester: i32,
    pub year_defaulted: bool,
    pub semester_defaulted: bool,
}

/// 解析学期字符串，缺失部分使用当前年份 / 第 1 学期
pub fn parse_term(term: &str) -> ParsedTerm {
    parse_term_with_year(term, chrono::Utc::now().year())
}

pub fn parse_term_with_year(term: &str, current_year: i32) -> ParsedTerm {
    let year = YEAR_RE
        .find(term)
        .and_then(|m| m.as_str().parse::<i32>().ok());
    let semester = SEMESTER_RE
        .captures(term)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i32>().ok());

    let parsed = ParsedTerm {
        year: year.unwrap_or(current_year),
        semester: semester.unwrap_or(1),
        year_defaulted: year.is_none(),
        semester_defaulted: semester.is_none(),
    };

    if parsed.year_defaulted || parsed.semester_defaulted {
        debug!(
            "Term {:?} only partially recognised, using year {} semester {}",
            term, parsed.year, parsed.semester
        );
    }

    parsed
}

/// 显式配置优先，否则解析学期字符串
pub fn resolve_term(term: Option<&str>, term_override: Option<TermOverride>) -> (i32, i32) {
    match term_override {
        Some(TermOverride { year, semester }) => (year, semester),
        None => {
            let parsed = parse_term(term.unwrap_or_default());
            (parsed.year, parsed.semester)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_and_semester() {
        let parsed = parse_term_with_year("2025 Semester 2", 2000);
        assert_eq!((parsed.year, parsed.semester), (2025, 2));
        assert!(!parsed.year_defaulted && !parsed.semester_defaulted);

        let parsed = parse_term_with_year("S1 2026", 2000);
        assert_eq!((parsed.year, parsed.semester), (2026, 1));
    }

    #[test]
    fn test_year_digits_are_not_a_semester() {
        let parsed = parse_term_with_year("Fall 2025", 2000);
        assert_eq!((parsed.year, parsed.semester), (2025, 1));
        assert!(parsed.semester_defaulted);
    }

    #[test]
    fn test_nothing_recognised() {
        let parsed = parse_term_with_year("Default Term", 2031);
        assert_eq!((parsed.year, parsed.semester), (2031, 1));
        assert!(parsed.year_defaulted && parsed.semester_defaulted);

        let parsed = parse_term_with_year("", 2031);
        assert_eq!((parsed.year, parsed.semester), (2031, 1));
    }

    #[test]
    fn test_semester_before_year() {
        let parsed = parse_term_with_year("Sem 2/2024", 2000);
        assert_eq!((parsed.year, parsed.semester), (2024, 2));
    }

    #[test]
    fn test_override_wins() {
        let term = TermOverride {
            year: 2030,
            semester: 3,
        };
        assert_eq!(resolve_term(Some("2025 Semester 2"), Some(term)), (2030, 3));
        assert_eq!(resolve_term(Some("2025 Semester 2"), None), (2025, 2));
    }
}
