use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::subjects::TopicCategory;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/topic.ts")]
pub struct CustomTopic {
    pub id: String,
    // 所属课程：自定义课程 UUID 或 LMS 课程 ID，不做引用约束
    pub course_id: String,
    pub title: String,
    pub schedule: Option<String>,
    pub category: Option<TopicCategory>,
    // 在课程内的排序位置
    pub position: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
