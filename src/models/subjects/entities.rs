//! 统一课程视图
//!
//! 每次请求时由 LMS 数据或自定义课程数据现场构建，不落库。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

/// 课程来源，两种来源的 ID 不在同一空间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
#[serde(rename_all = "lowercase")]
pub enum SubjectSource {
    Lms,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct Subject {
    // LMS 课程为数字 ID 字符串，自定义课程为 UUID
    pub id: String,
    pub source: SubjectSource,
    pub course_code: String,
    pub title: String,
    pub year: i32,
    pub semester: i32,
    pub image_url: Option<String>,
    pub syllabus_url: Option<String>,
    pub topics: Vec<Topic>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct Topic {
    pub id: String,
    pub title: String,
    pub schedule: Option<String>,
    pub category: Option<TopicCategory>,
    pub resources: Vec<Resource>,
    pub assignments: Vec<Assignment>,
}

/// 主题类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub enum TopicCategory {
    Lec,
    Async,
    #[serde(rename = "GA")]
    Ga,
    #[serde(rename = "LAB")]
    Lab,
    #[serde(rename = "FC")]
    Fc,
    #[serde(rename = "TBL")]
    Tbl,
    Online,
    Test,
}

impl TopicCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopicCategory::Lec => "Lec",
            TopicCategory::Async => "Async",
            TopicCategory::Ga => "GA",
            TopicCategory::Lab => "LAB",
            TopicCategory::Fc => "FC",
            TopicCategory::Tbl => "TBL",
            TopicCategory::Online => "Online",
            TopicCategory::Test => "Test",
        }
    }
}

impl fmt::Display for TopicCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TopicCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Lec" => Ok(TopicCategory::Lec),
            "Async" => Ok(TopicCategory::Async),
            "GA" => Ok(TopicCategory::Ga),
            "LAB" => Ok(TopicCategory::Lab),
            "FC" => Ok(TopicCategory::Fc),
            "TBL" => Ok(TopicCategory::Tbl),
            "Online" => Ok(TopicCategory::Online),
            "Test" => Ok(TopicCategory::Test),
            _ => Err(format!("Invalid topic category: {s}")),
        }
    }
}

/// 资源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub enum ResourceKind {
    #[serde(rename = "PDF")]
    Pdf,
    Slides,
    Video,
    Link,
    Handout,
    Lecture,
    Exercise,
    #[serde(rename = "GA Problems")]
    GaProblems,
    Summary,
    Other,
}

impl ResourceKind {
    /// 根据文件扩展名推断资源类型
    pub fn from_file_name(name: &str) -> Self {
        let ext = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => ResourceKind::Pdf,
            "ppt" | "pptx" | "key" => ResourceKind::Slides,
            "mp4" | "mov" | "webm" | "mkv" => ResourceKind::Video,
            _ => ResourceKind::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct Resource {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub title: String,
    // 页面型资料没有链接，只有内联内容
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub html_content: Option<String>,
}

/// 作业状态，读取时根据当前时间计算，不落库
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub enum AssignmentStatus {
    Overdue,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct Assignment {
    pub id: String,
    pub title: String,
    pub due_date: Option<String>,
    pub status: AssignmentStatus,
    pub description: String,
    pub file_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_kind_from_file_name() {
        assert_eq!(ResourceKind::from_file_name("week1.PDF"), ResourceKind::Pdf);
        assert_eq!(
            ResourceKind::from_file_name("lecture 2.pptx"),
            ResourceKind::Slides
        );
        assert_eq!(ResourceKind::from_file_name("demo.mp4"), ResourceKind::Video);
        assert_eq!(ResourceKind::from_file_name("notes.docx"), ResourceKind::Other);
        assert_eq!(ResourceKind::from_file_name("README"), ResourceKind::Other);
    }

    #[test]
    fn test_topic_category_round_trip() {
        for name in ["Lec", "Async", "GA", "LAB", "FC", "TBL", "Online", "Test"] {
            let category: TopicCategory = name.parse().unwrap();
            assert_eq!(category.as_str(), name);
        }
        assert!("Lecture".parse::<TopicCategory>().is_err());
    }

    #[test]
    fn test_resource_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&ResourceKind::GaProblems).unwrap(),
            "\"GA Problems\""
        );
        assert_eq!(serde_json::to_string(&ResourceKind::Pdf).unwrap(), "\"PDF\"");
    }
}
