use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

/// 资料类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub enum MaterialType {
    File,
    Link,
    Page,
}

impl MaterialType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialType::File => "File",
            MaterialType::Link => "Link",
            MaterialType::Page => "Page",
        }
    }
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaterialType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "File" => Ok(MaterialType::File),
            "Link" => Ok(MaterialType::Link),
            "Page" => Ok(MaterialType::Page),
            _ => Err(format!("Invalid material type: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct MaterialItem {
    pub title: String,
    #[serde(rename = "type")]
    pub item_type: MaterialType,
    pub url: Option<String>,
    pub html_content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct CustomMaterial {
    pub id: String,
    // 所属课程与主题，均为松散的字符串引用
    pub course_id: String,
    pub topic_id: String,
    pub item: MaterialItem,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
