//! 自定义主题存储操作

use super::{SeaOrmStorage, map_write_err};
use crate::entity::custom_materials::{Column as MaterialColumn, Entity as Materials};
use crate::entity::custom_topics::{ActiveModel, Column, Entity as Topics};
use crate::errors::{PortalError, Result};
use crate::models::topics::{entities::CustomTopic, requests::CreateTopicRequest};
use crate::storage::CascadeSummary;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建主题，未指定位置时追加到末尾
    pub async fn create_topic_impl(&self, req: CreateTopicRequest) -> Result<CustomTopic> {
        let position = match req.position {
            Some(position) => position,
            None => Topics::find()
                .filter(Column::CourseId.eq(&req.course_id))
                .count(&self.db)
                .await
                .map_err(|e| PortalError::database_operation(format!("查询主题数量失败: {e}")))?
                as i32,
        };

        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            course_id: Set(req.course_id),
            title: Set(req.title),
            schedule: Set(req.schedule),
            category: Set(req.category.map(|c| c.as_str().to_string())),
            position: Set(position),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_write_err(e, "创建主题失败"))?;

        Ok(result.into_topic())
    }

    /// 通过 ID 获取主题
    pub async fn get_topic_by_id_impl(&self, topic_id: &str) -> Result<Option<CustomTopic>> {
        let result = Topics::find_by_id(topic_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询主题失败: {e}")))?;

        Ok(result.map(|m| m.into_topic()))
    }

    /// 按课程列出主题
    pub async fn list_topics_by_course_impl(&self, course_id: &str) -> Result<Vec<CustomTopic>> {
        let topics = Topics::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::Position)
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询主题列表失败: {e}")))?;

        Ok(topics.into_iter().map(|m| m.into_topic()).collect())
    }

    /// 删除主题：资料 -> 主题，同一事务
    pub async fn delete_topic_impl(&self, topic_id: &str) -> Result<Option<CascadeSummary>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PortalError::database_operation(format!("开启事务失败: {e}")))?;

        let materials = Materials::delete_many()
            .filter(MaterialColumn::TopicId.eq(topic_id))
            .exec(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("删除主题资料失败: {e}")))?;

        let topics = Topics::delete_by_id(topic_id.to_string())
            .exec(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("删除主题失败: {e}")))?;

        // 主题不存在时回滚，保持资料不变
        if topics.rows_affected == 0 {
            txn.rollback()
                .await
                .map_err(|e| PortalError::database_operation(format!("回滚事务失败: {e}")))?;
            return Ok(None);
        }

        txn.commit()
            .await
            .map_err(|e| PortalError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(CascadeSummary {
            materials: materials.rows_affected,
            topics: topics.rows_affected,
        }))
    }
}
