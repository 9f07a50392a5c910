//! 自定义资料存储操作

use super::{SeaOrmStorage, map_write_err};
use crate::entity::custom_materials::{ActiveModel, Column, Entity as Materials};
use crate::errors::{PortalError, Result};
use crate::models::materials::{
    entities::CustomMaterial,
    requests::{CreateMaterialRequest, UpdateMaterialRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建资料
    pub async fn create_material_impl(&self, req: CreateMaterialRequest) -> Result<CustomMaterial> {
        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            course_id: Set(req.course_id),
            topic_id: Set(req.topic_id),
            title: Set(req.item.title),
            item_type: Set(req.item.item_type.as_str().to_string()),
            url: Set(req.item.url),
            html_content: Set(req.item.html_content),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_write_err(e, "创建资料失败"))?;

        result.into_material()
    }

    /// 通过 ID 获取资料
    pub async fn get_material_by_id_impl(
        &self,
        material_id: &str,
    ) -> Result<Option<CustomMaterial>> {
        Materials::find_by_id(material_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询资料失败: {e}")))?
            .map(|m| m.into_material())
            .transpose()
    }

    /// 按课程列出资料（按创建时间排序）
    pub async fn list_materials_by_course_impl(
        &self,
        course_id: &str,
    ) -> Result<Vec<CustomMaterial>> {
        Materials::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询资料列表失败: {e}")))?
            .into_iter()
            .map(|m| m.into_material())
            .collect()
    }

    /// 更新资料
    pub async fn update_material_impl(
        &self,
        material_id: &str,
        update: UpdateMaterialRequest,
    ) -> Result<Option<CustomMaterial>> {
        if self.get_material_by_id_impl(material_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(material_id.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(topic_id) = update.topic_id {
            model.topic_id = Set(topic_id);
        }

        // 资料内容整体替换，未提供的可选字段会被清空
        if let Some(item) = update.item {
            model.title = Set(item.title);
            model.item_type = Set(item.item_type.as_str().to_string());
            model.url = Set(item.url);
            model.html_content = Set(item.html_content);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| map_write_err(e, "更新资料失败"))?;

        self.get_material_by_id_impl(material_id).await
    }

    /// 删除资料
    pub async fn delete_material_impl(&self, material_id: &str) -> Result<bool> {
        let result = Materials::delete_by_id(material_id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("删除资料失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
