//! LMS 接口的原始数据结构与聚合结果
//!
//! 字段只保留门户用得到的部分，其余字段在反序列化时忽略。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LmsTerm {
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LmsCourse {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub course_code: String,
    #[serde(default)]
    pub term: Option<LmsTerm>,
    #[serde(default)]
    pub image_download_url: Option<String>,
    #[serde(default)]
    pub syllabus_body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LmsModule {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub unlock_at: Option<String>,
}

/// 模块条目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LmsItemKind {
    File,
    Page,
    Discussion,
    Assignment,
    Quiz,
    SubHeader,
    ExternalUrl,
    ExternalTool,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LmsContentDetails {
    #[serde(default)]
    pub due_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LmsModuleItem {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: LmsItemKind,
    #[serde(default)]
    pub html_url: Option<String>,
    // File 条目的 url 是间接的 API 地址，需要二次请求解析
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub page_url: Option<String>,
    #[serde(default)]
    pub external_url: Option<String>,
    #[serde(default)]
    pub content_details: Option<LmsContentDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LmsPage {
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LmsFile {
    pub id: i64,
    pub display_name: String,
    // 直接下载地址
    pub url: String,
}

/// 页面正文中内嵌的文件链接
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedFile {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedItem {
    pub item: LmsModuleItem,
    // File 条目解析后的下载地址；解析失败时保持 None，使用原始地址
    pub resolved_url: Option<String>,
    // Page 条目中提取出的文件
    pub embedded_files: Vec<EmbeddedFile>,
}

impl ResolvedItem {
    pub fn new(item: LmsModuleItem) -> Self {
        Self {
            item,
            resolved_url: None,
            embedded_files: Vec::new(),
        }
    }

    /// 文件的最终地址：优先使用解析结果，否则退回原始地址
    pub fn file_url(&self) -> Option<&str> {
        self.resolved_url
            .as_deref()
            .or(self.item.url.as_deref())
            .or(self.item.html_url.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedModule {
    pub module: LmsModule,
    pub items: Vec<ResolvedItem>,
}

/// 扇出请求中单个输入的失败记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub key: String,
    pub message: String,
}

/// 一门 LMS 课程的完整聚合结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LmsCourseBundle {
    pub course: LmsCourse,
    pub modules: Vec<ResolvedModule>,
    pub syllabus_url: Option<String>,
    // 降级处理过的二次请求
    pub failures: Vec<BatchFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_item_kind_is_tolerated() {
        let item: LmsModuleItem = serde_json::from_value(serde_json::json!({
            "id": 7,
            "title": "Survey",
            "type": "SomethingNew",
            "indent": 0
        }))
        .unwrap();
        assert_eq!(item.kind, LmsItemKind::Other);
        assert!(item.url.is_none());
    }

    #[test]
    fn test_file_url_prefers_resolved() {
        let item: LmsModuleItem = serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "Slides",
            "type": "File",
            "url": "https://lms.example.edu/api/v1/courses/1/files/9"
        }))
        .unwrap();
        let mut resolved = ResolvedItem::new(item);
        assert_eq!(
            resolved.file_url(),
            Some("https://lms.example.edu/api/v1/courses/1/files/9")
        );
        resolved.resolved_url = Some("https://files.example.edu/9/download".to_string());
        assert_eq!(resolved.file_url(), Some("https://files.example.edu/9/download"));
    }
}
