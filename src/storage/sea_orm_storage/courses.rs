//! 自定义课程存储操作

use super::{SeaOrmStorage, map_write_err};
use crate::entity::custom_courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::custom_materials::{Column as MaterialColumn, Entity as Materials};
use crate::entity::custom_topics::{
    ActiveModel as TopicActiveModel, Column as TopicColumn, Entity as Topics,
};
use crate::errors::{PortalError, Result};
use crate::models::courses::{
    entities::CustomCourse,
    requests::{CreateCourseRequest, UpdateCourseRequest},
};
use crate::storage::CascadeSummary;
use chrono::Datelike;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set, TransactionTrait,
};
use tracing::debug;

impl SeaOrmStorage {
    /// 创建课程，初始主题与课程在同一事务中写入
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<CustomCourse> {
        if self.get_course_by_code_impl(&req.course_code).await?.is_some() {
            return Err(PortalError::conflict(format!(
                "Course code {} already exists",
                req.course_code
            )));
        }

        let now = chrono::Utc::now();
        let ts = now.timestamp();
        let course_id = uuid::Uuid::new_v4().to_string();

        let model = ActiveModel {
            id: Set(course_id.clone()),
            course_code: Set(req.course_code),
            title: Set(req.title),
            year: Set(req.year.unwrap_or_else(|| now.year())),
            semester: Set(req.semester.unwrap_or(1)),
            image_url: Set(req.image_url),
            syllabus_url: Set(req.syllabus_url),
            created_at: Set(ts),
            updated_at: Set(ts),
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PortalError::database_operation(format!("开启事务失败: {e}")))?;

        let course = model
            .insert(&txn)
            .await
            .map_err(|e| map_write_err(e, "创建课程失败"))?;

        for (position, topic) in req.topics.into_iter().enumerate() {
            TopicActiveModel {
                id: Set(uuid::Uuid::new_v4().to_string()),
                course_id: Set(course_id.clone()),
                title: Set(topic.title),
                schedule: Set(None),
                category: Set(None),
                position: Set(position as i32),
                created_at: Set(ts),
                updated_at: Set(ts),
            }
            .insert(&txn)
            .await
            .map_err(|e| map_write_err(e, "创建初始主题失败"))?;
        }

        txn.commit()
            .await
            .map_err(|e| PortalError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(course.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, course_id: &str) -> Result<Option<CustomCourse>> {
        let result = Courses::find_by_id(course_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 通过课程代码获取课程
    pub async fn get_course_by_code_impl(&self, course_code: &str) -> Result<Option<CustomCourse>> {
        let result = Courses::find()
            .filter(Column::CourseCode.eq(course_code))
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 列出全部课程（按课程代码排序）
    pub async fn list_courses_impl(&self) -> Result<Vec<CustomCourse>> {
        let courses = Courses::find()
            .order_by_asc(Column::CourseCode)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(courses.into_iter().map(|m| m.into_course()).collect())
    }

    /// 更新课程信息
    pub async fn update_course_impl(
        &self,
        course_id: &str,
        update: UpdateCourseRequest,
    ) -> Result<Option<CustomCourse>> {
        // 先检查课程是否存在
        let Some(existing) = self.get_course_by_id_impl(course_id).await? else {
            return Ok(None);
        };

        if let Some(code) = &update.course_code
            && code != &existing.course_code
            && self.get_course_by_code_impl(code).await?.is_some()
        {
            return Err(PortalError::conflict(format!(
                "Course code {code} already exists"
            )));
        }

        let mut model = ActiveModel {
            id: Set(course_id.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(course_code) = update.course_code {
            model.course_code = Set(course_code);
        }
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(year) = update.year {
            model.year = Set(year);
        }
        if let Some(semester) = update.semester {
            model.semester = Set(semester);
        }
        if let Some(image_url) = update.image_url {
            model.image_url = Set(Some(image_url));
        }
        if let Some(syllabus_url) = update.syllabus_url {
            model.syllabus_url = Set(Some(syllabus_url));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| map_write_err(e, "更新课程失败"))?;

        self.get_course_by_id_impl(course_id).await
    }

    /// 删除课程：资料 -> 主题 -> 课程，同一事务
    pub async fn delete_course_impl(&self, course_id: &str) -> Result<Option<CascadeSummary>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| PortalError::database_operation(format!("开启事务失败: {e}")))?;

        let exists = Courses::find_by_id(course_id.to_string())
            .one(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询课程失败: {e}")))?
            .is_some();
        if !exists {
            return Ok(None);
        }

        let topic_ids: Vec<String> = Topics::find()
            .select_only()
            .column(TopicColumn::Id)
            .filter(TopicColumn::CourseId.eq(course_id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询课程主题失败: {e}")))?;

        // 挂在本课程主题下的资料也一并删除，即使其 course_id 指向别处
        let materials = Materials::delete_many()
            .filter(
                Condition::any()
                    .add(MaterialColumn::CourseId.eq(course_id))
                    .add(MaterialColumn::TopicId.is_in(topic_ids)),
            )
            .exec(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("删除课程资料失败: {e}")))?;

        let topics = Topics::delete_many()
            .filter(TopicColumn::CourseId.eq(course_id))
            .exec(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("删除课程主题失败: {e}")))?;

        Courses::delete_by_id(course_id.to_string())
            .exec(&txn)
            .await
            .map_err(|e| PortalError::database_operation(format!("删除课程失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| PortalError::database_operation(format!("提交事务失败: {e}")))?;

        debug!(
            "Deleted course {} with {} topics and {} materials",
            course_id, topics.rows_affected, materials.rows_affected
        );

        Ok(Some(CascadeSummary {
            materials: materials.rows_affected,
            topics: topics.rows_affected,
        }))
    }
}
