use serde::Deserialize;
use ts_rs::TS;

use super::entities::{MaterialItem, MaterialType};
use crate::utils::validate::{validate_reference_id, validate_title, validate_url};

// 创建资料请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct CreateMaterialRequest {
    pub course_id: String,
    pub topic_id: String,
    pub item: MaterialItem,
}

impl CreateMaterialRequest {
    pub fn validate(mut self) -> Result<Self, String> {
        self.course_id = validate_reference_id(&self.course_id, "course_id")?;
        self.topic_id = validate_reference_id(&self.topic_id, "topic_id")?;
        self.item = validate_item(self.item)?;
        Ok(self)
    }
}

// 更新资料请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct UpdateMaterialRequest {
    pub topic_id: Option<String>,
    pub item: Option<MaterialItem>,
}

impl UpdateMaterialRequest {
    pub fn validate(mut self) -> Result<Self, String> {
        if let Some(topic_id) = &self.topic_id {
            self.topic_id = Some(validate_reference_id(topic_id, "topic_id")?);
        }
        if let Some(item) = self.item {
            self.item = Some(validate_item(item)?);
        }
        Ok(self)
    }
}

/// 文件与链接必须带 URL，页面必须带 HTML 内容
fn validate_item(mut item: MaterialItem) -> Result<MaterialItem, String> {
    item.title = validate_title(&item.title)?;
    match item.item_type {
        MaterialType::File | MaterialType::Link => {
            let url = item
                .url
                .as_deref()
                .ok_or_else(|| format!("{} material requires a url", item.item_type))?;
            item.url = Some(validate_url(url)?);
        }
        MaterialType::Page => {
            let has_content = item
                .html_content
                .as_deref()
                .is_some_and(|c| !c.trim().is_empty());
            if !has_content {
                return Err("Page material requires html_content".to_string());
            }
        }
    }
    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(item_type: MaterialType, url: Option<&str>, html: Option<&str>) -> CreateMaterialRequest {
        CreateMaterialRequest {
            course_id: "12345".to_string(),
            topic_id: "678".to_string(),
            item: MaterialItem {
                title: " Week 1 notes ".to_string(),
                item_type,
                url: url.map(str::to_string),
                html_content: html.map(str::to_string),
            },
        }
    }

    #[test]
    fn test_link_requires_url() {
        assert!(request(MaterialType::Link, None, None).validate().is_err());
        let ok = request(MaterialType::Link, Some("https://example.edu/a"), None)
            .validate()
            .unwrap();
        assert_eq!(ok.item.title, "Week 1 notes");
    }

    #[test]
    fn test_page_requires_content() {
        assert!(request(MaterialType::Page, None, Some("   ")).validate().is_err());
        assert!(
            request(MaterialType::Page, None, Some("<p>hello</p>"))
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_rejects_malformed_ids() {
        let mut req = request(MaterialType::Link, Some("https://example.edu/a"), None);
        req.topic_id = "not an id".to_string();
        assert!(req.validate().is_err());
    }
}
