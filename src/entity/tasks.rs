//! 任务实体（作业 / 考试）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub task_type: String,
    pub course_code: String,
    pub title: String,
    // 毫秒时间戳
    pub deadline: i64,
    // JSON 序列化的资源列表
    #[sea_orm(column_type = "Text")]
    pub resources: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_task(self) -> crate::errors::Result<crate::models::tasks::entities::Task> {
        use crate::errors::PortalError;
        use crate::models::tasks::entities::{Task, TaskResource, TaskType};
        use chrono::{DateTime, Utc};

        let task_type = self
            .task_type
            .parse::<TaskType>()
            .map_err(PortalError::serialization)?;
        let resources: Vec<TaskResource> = serde_json::from_str(&self.resources)?;
        let deadline = DateTime::<Utc>::from_timestamp_millis(self.deadline).ok_or_else(|| {
            PortalError::date_parse(format!("Task {} has an invalid deadline", self.id))
        })?;

        Ok(Task {
            id: self.id,
            task_type,
            course_code: self.course_code,
            title: self.title,
            deadline,
            resources,
            created_at: super::from_timestamp(self.created_at),
            updated_at: super::from_timestamp(self.updated_at),
        })
    }
}
