//! 从 LMS 页面正文中提取内嵌文件链接

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::lms::EmbeddedFile;

static ANCHOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<a\b([^>]*)>(.*?)</a\s*>").expect("valid anchor regex"));
static CLASS_ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)(?:^|\s)class\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid class regex")
});
static HREF_ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)(?:^|\s)href\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid href regex")
});
static TITLE_ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)(?:^|\s)title\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid title regex")
});
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag regex"));
static SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid space regex"));

/// 提取带有指定 class 的 `<a>` 链接，按出现顺序返回
///
/// 文件名优先取 `title` 属性，否则取去掉标签后的链接文本。没有 `href` 的链接会被忽略。
pub fn extract_embedded_files(body: &str, link_class: &str) -> Vec<EmbeddedFile> {
    ANCHOR_RE
        .captures_iter(body)
        .filter_map(|caps| {
            let attrs = caps.get(1).map_or("", |m| m.as_str());
            let text = caps.get(2).map_or("", |m| m.as_str());

            let classes = attribute(&CLASS_ATTR_RE, attrs)?;
            if !classes.split_whitespace().any(|c| c == link_class) {
                return None;
            }

            let url = decode_entities(attribute(&HREF_ATTR_RE, attrs)?.trim());
            if url.is_empty() {
                return None;
            }

            let name = attribute(&TITLE_ATTR_RE, attrs)
                .map(|t| decode_entities(t.trim()))
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| anchor_text(text));
            let name = if name.is_empty() { url.clone() } else { name };

            Some(EmbeddedFile { name, url })
        })
        .collect()
}

fn attribute<'a>(re: &Regex, attrs: &'a str) -> Option<&'a str> {
    let caps = re.captures(attrs)?;
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
}

fn anchor_text(inner: &str) -> String {
    let stripped = TAG_RE.replace_all(inner, "");
    let collapsed = SPACE_RE.replace_all(stripped.trim(), " ");
    decode_entities(&collapsed)
}

// &amp; 最后处理，避免 "&amp;lt;" 被解码两次
fn decode_entities(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
