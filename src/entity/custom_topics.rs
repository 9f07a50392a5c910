//! 自定义主题实体

use sea_orm::entity::prelude::*;
use tracing::warn;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "custom_topics")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub schedule: Option<String>,
    pub category: Option<String>,
    pub position: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_topic(self) -> crate::models::topics::entities::CustomTopic {
        use crate::models::subjects::TopicCategory;
        use crate::models::topics::entities::CustomTopic;

        // 无法识别的类别按无类别处理
        let category = self.category.as_deref().and_then(|c| {
            c.parse::<TopicCategory>()
                .inspect_err(|e| warn!("Topic {} has {}", self.id, e))
                .ok()
        });

        CustomTopic {
            category,
            id: self.id,
            course_id: self.course_id,
            title: self.title,
            schedule: self.schedule,
            position: self.position,
            created_at: super::from_timestamp(self.created_at),
            updated_at: super::from_timestamp(self.updated_at),
        }
    }
}
