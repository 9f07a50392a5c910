use serde::Deserialize;
use ts_rs::TS;

use crate::models::subjects::TopicCategory;
use crate::utils::validate::{validate_reference_id, validate_title};

// 创建主题请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/topic.ts")]
pub struct CreateTopicRequest {
    pub course_id: String,
    pub title: String,
    pub schedule: Option<String>,
    pub category: Option<TopicCategory>,
    pub position: Option<i32>,
}

impl CreateTopicRequest {
    pub fn validate(mut self) -> Result<Self, String> {
        self.course_id = validate_reference_id(&self.course_id, "course_id")?;
        self.title = validate_title(&self.title)?;
        self.schedule = self
            .schedule
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Ok(self)
    }
}
