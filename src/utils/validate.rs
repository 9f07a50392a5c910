use once_cell::sync::Lazy;
use regex::Regex;

static COURSE_CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 _-]{1,31}$").expect("Invalid course code regex")
});

static LMS_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{1,18}$").expect("Invalid LMS id regex"));

const MAX_TITLE_LEN: usize = 200;

pub fn validate_course_code(code: &str) -> Result<String, String> {
    let code = code.trim();
    // 课程代码：2-32 个字符，字母数字开头，只含字母、数字、空格、下划线或连字符
    if !COURSE_CODE_RE.is_match(code) {
        return Err(
            "Course code must be 2-32 characters of letters, digits, spaces, underscores or hyphens"
                .to_string(),
        );
    }
    Ok(code.to_string())
}

pub fn validate_title(title: &str) -> Result<String, String> {
    let title = title.trim();
    if title.is_empty() {
        return Err("Title must not be empty".to_string());
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(format!("Title must be at most {MAX_TITLE_LEN} characters"));
    }
    Ok(title.to_string())
}

pub fn validate_year(year: i32) -> Result<(), String> {
    if !(1900..=2999).contains(&year) {
        return Err("Year must be between 1900 and 2999".to_string());
    }
    Ok(())
}

pub fn validate_semester(semester: i32) -> Result<(), String> {
    if !(1..=4).contains(&semester) {
        return Err("Semester must be between 1 and 4".to_string());
    }
    Ok(())
}

pub fn validate_url(url: &str) -> Result<String, String> {
    let url = url.trim();
    if !(url.starts_with("https://") || url.starts_with("http://")) || url.len() < 10 {
        return Err("URL must be an absolute http(s) URL".to_string());
    }
    Ok(url.to_string())
}

/// 自定义存储中的记录 ID（UUID）
pub fn is_store_id(id: &str) -> bool {
    uuid::Uuid::parse_str(id).is_ok()
}

/// 规范化为存储使用的小写连字符形式；无连字符、花括号和 `urn:uuid:` 形式一并接受
pub fn normalize_store_id(id: &str) -> Option<String> {
    uuid::Uuid::parse_str(id)
        .ok()
        .map(|uuid| uuid.hyphenated().to_string())
}

/// LMS 中的记录 ID（数字字符串）
pub fn is_lms_id(id: &str) -> bool {
    LMS_ID_RE.is_match(id)
}

/// 松散外键：既可以指向自定义记录，也可以指向 LMS 记录
pub fn validate_reference_id(id: &str, field: &str) -> Result<String, String> {
    let id = id.trim();
    if is_lms_id(id) {
        Ok(id.to_string())
    } else if let Some(id) = normalize_store_id(id) {
        Ok(id)
    } else {
        Err(format!("{field} must be a UUID or a numeric LMS id"))
    }
}

/// 检查邮箱是否属于允许的机构域名（大小写不敏感）
pub fn email_matches_domain(email: &str, domain_suffix: &str) -> bool {
    let email = email.trim().to_ascii_lowercase();
    let suffix = domain_suffix.trim().to_ascii_lowercase();
    !suffix.is_empty() && email.len() > suffix.len() && email.ends_with(&suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_id_forms_normalize_to_hyphenated() {
        let canonical = "6f1c2a8e-3d4b-4c5d-9e6f-0a1b2c3d4e5f";
        for raw in [
            canonical,
            "6F1C2A8E-3D4B-4C5D-9E6F-0A1B2C3D4E5F",
            "6f1c2a8e3d4b4c5d9e6f0a1b2c3d4e5f",
            "{6f1c2a8e-3d4b-4c5d-9e6f-0a1b2c3d4e5f}",
            "urn:uuid:6f1c2a8e-3d4b-4c5d-9e6f-0a1b2c3d4e5f",
        ] {
            assert_eq!(normalize_store_id(raw).as_deref(), Some(canonical), "{raw}");
        }
        assert_eq!(normalize_store_id("12345"), None);
        assert_eq!(
            validate_reference_id(" 6F1C2A8E3D4B4C5D9E6F0A1B2C3D4E5F ", "topic_id").unwrap(),
            canonical
        );
        assert_eq!(validate_reference_id("678", "topic_id").unwrap(), "678");
    }

    #[test]
    fn test_course_code() {
        assert_eq!(validate_course_code(" COMP1010 ").unwrap(), "COMP1010");
        assert!(validate_course_code("MATH-201 A").is_ok());
        assert!(validate_course_code("").is_err());
        assert!(validate_course_code("X").is_err());
        assert!(validate_course_code("<script>").is_err());
    }

    #[test]
    fn test_title() {
        assert_eq!(validate_title("  Intro  ").unwrap(), "Intro");
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"a".repeat(201)).is_err());
    }

    #[test]
    fn test_reference_ids() {
        assert!(validate_reference_id("12345", "course_id").is_ok());
        assert!(validate_reference_id("6f1c2a8e-3d4b-4c5d-9e6f-0a1b2c3d4e5f", "course_id").is_ok());
        assert!(validate_reference_id("abc", "course_id").is_err());
        assert!(validate_reference_id("", "course_id").is_err());
    }

    #[test]
    fn test_email_domain() {
        assert!(email_matches_domain("Student@University.edu", "@university.edu"));
        assert!(!email_matches_domain("student@gmail.com", "@university.edu"));
        assert!(!email_matches_domain("@university.edu", "@university.edu"));
        assert!(!email_matches_domain("student@university.edu", ""));
    }

    #[test]
    fn test_year_and_semester() {
        assert!(validate_year(2025).is_ok());
        assert!(validate_year(25).is_err());
        assert!(validate_semester(2).is_ok());
        assert!(validate_semester(0).is_err());
    }
}
