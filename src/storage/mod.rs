use std::sync::Arc;

use crate::models::{
    courses::{
        entities::CustomCourse,
        requests::{CreateCourseRequest, UpdateCourseRequest},
    },
    materials::{
        entities::CustomMaterial,
        requests::{CreateMaterialRequest, UpdateMaterialRequest},
    },
    tasks::{
        entities::Task,
        requests::{CreateTaskRequest, TaskListQuery},
        responses::TaskListResponse,
    },
    topics::{entities::CustomTopic, requests::CreateTopicRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 级联删除的统计结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeSummary {
    pub materials: u64,
    pub topics: u64,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 自定义课程管理方法
    // 创建课程（连同初始主题）
    async fn create_course(&self, course: CreateCourseRequest) -> Result<CustomCourse>;
    // 通过ID获取课程
    async fn get_course_by_id(&self, course_id: &str) -> Result<Option<CustomCourse>>;
    // 通过课程代码获取课程
    async fn get_course_by_code(&self, course_code: &str) -> Result<Option<CustomCourse>>;
    // 列出全部课程
    async fn list_courses(&self) -> Result<Vec<CustomCourse>>;
    // 更新课程
    async fn update_course(
        &self,
        course_id: &str,
        update: UpdateCourseRequest,
    ) -> Result<Option<CustomCourse>>;
    // 删除课程：资料 -> 主题 -> 课程，返回 None 表示课程不存在
    async fn delete_course(&self, course_id: &str) -> Result<Option<CascadeSummary>>;

    /// 主题管理方法
    async fn create_topic(&self, topic: CreateTopicRequest) -> Result<CustomTopic>;
    async fn get_topic_by_id(&self, topic_id: &str) -> Result<Option<CustomTopic>>;
    // 按课程列出主题（按 position 排序）
    async fn list_topics_by_course(&self, course_id: &str) -> Result<Vec<CustomTopic>>;
    // 删除主题：资料 -> 主题
    async fn delete_topic(&self, topic_id: &str) -> Result<Option<CascadeSummary>>;

    /// 资料管理方法
    async fn create_material(&self, material: CreateMaterialRequest) -> Result<CustomMaterial>;
    async fn get_material_by_id(&self, material_id: &str) -> Result<Option<CustomMaterial>>;
    async fn list_materials_by_course(&self, course_id: &str) -> Result<Vec<CustomMaterial>>;
    async fn update_material(
        &self,
        material_id: &str,
        update: UpdateMaterialRequest,
    ) -> Result<Option<CustomMaterial>>;
    async fn delete_material(&self, material_id: &str) -> Result<bool>;

    /// 任务管理方法
    async fn create_task(&self, task: CreateTaskRequest) -> Result<Task>;
    async fn get_task_by_id(&self, task_id: &str) -> Result<Option<Task>>;
    async fn list_tasks_with_pagination(&self, query: TaskListQuery) -> Result<TaskListResponse>;
    async fn delete_task(&self, task_id: &str) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
