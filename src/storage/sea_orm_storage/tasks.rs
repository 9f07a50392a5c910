//! 任务存储操作

use super::{SeaOrmStorage, map_write_err};
use crate::entity::tasks::{ActiveModel, Column, Entity as Tasks};
use crate::errors::{PortalError, Result};
use crate::models::{
    PaginationInfo,
    tasks::{
        entities::Task,
        requests::{CreateTaskRequest, TaskListQuery},
        responses::TaskListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::sea_query::LikeExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建任务
    pub async fn create_task_impl(&self, req: CreateTaskRequest) -> Result<Task> {
        let now = chrono::Utc::now().timestamp();
        let resources = serde_json::to_string(&req.resources)?;

        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            task_type: Set(req.task_type.as_str().to_string()),
            course_code: Set(req.course_code),
            title: Set(req.title),
            deadline: Set(req.deadline.timestamp_millis()),
            resources: Set(resources),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_write_err(e, "创建任务失败"))?;

        result.into_task()
    }

    /// 通过 ID 获取任务
    pub async fn get_task_by_id_impl(&self, task_id: &str) -> Result<Option<Task>> {
        Tasks::find_by_id(task_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询任务失败: {e}")))?
            .map(|m| m.into_task())
            .transpose()
    }

    /// 分页列出任务（按截止时间升序）
    pub async fn list_tasks_with_pagination_impl(
        &self,
        query: TaskListQuery,
    ) -> Result<TaskListResponse> {
        let (page, size) = query.pagination.normalized();

        let mut select = Tasks::find();

        if let Some(course_code) = &query.course_code {
            select = select.filter(Column::CourseCode.eq(course_code));
        }

        if let Some(task_type) = query.task_type {
            select = select.filter(Column::TaskType.eq(task_type.as_str()));
        }

        if query.upcoming_only {
            let now_ms = chrono::Utc::now().timestamp_millis();
            select = select.filter(Column::Deadline.gte(now_ms));
        }

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select
                .filter(Column::Title.like(LikeExpr::new(format!("%{escaped}%")).escape('\\')));
        }

        select = select
            .order_by_asc(Column::Deadline)
            .order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| PortalError::database_operation(format!("查询任务总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| PortalError::database_operation(format!("查询任务页数失败: {e}")))?;

        let tasks = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询任务列表失败: {e}")))?;

        Ok(TaskListResponse {
            items: tasks
                .into_iter()
                .map(|m| m.into_task())
                .collect::<Result<Vec<_>>>()?,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 删除任务
    pub async fn delete_task_impl(&self, task_id: &str) -> Result<bool> {
        let result = Tasks::delete_by_id(task_id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("删除任务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::memory_storage;
    use crate::models::PaginationQuery;
    use crate::models::subjects::ResourceKind;
    use crate::models::tasks::entities::{TaskResource, TaskType};
    use crate::models::tasks::requests::{CreateTaskRequest, TaskListQuery};
    use chrono::{Duration, TimeZone, Utc};

    fn task_request(
        task_type: TaskType,
        code: &str,
        title: &str,
        deadline: chrono::DateTime<Utc>,
    ) -> CreateTaskRequest {
        CreateTaskRequest {
            task_type,
            course_code: code.to_string(),
            title: title.to_string(),
            deadline,
            resources: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_task_round_trip() {
        let storage = memory_storage().await;
        let deadline = Utc.with_ymd_and_hms(2030, 5, 1, 9, 30, 0).unwrap()
            + Duration::milliseconds(250);

        let created = storage
            .create_task_impl(task_request(
                TaskType::Assignment,
                "COMP1010",
                "Lab report",
                deadline,
            ))
            .await
            .unwrap();
        assert!(created.resources.is_empty());
        assert_eq!(created.deadline, deadline);

        let fetched = storage
            .get_task_by_id_impl(&created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_resources_persist() {
        let storage = memory_storage().await;
        let mut req = task_request(
            TaskType::Examination,
            "COMP1010",
            "Final exam",
            Utc::now() + Duration::days(30),
        );
        req.resources.push(TaskResource {
            kind: ResourceKind::Pdf,
            title: "Past paper".to_string(),
            url: "https://example.edu/past.pdf".to_string(),
        });

        let created = storage.create_task_impl(req).await.unwrap();
        let fetched = storage
            .get_task_by_id_impl(&created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.resources.len(), 1);
        assert_eq!(fetched.resources[0].kind, ResourceKind::Pdf);
    }

    #[tokio::test]
    async fn test_list_filters_and_order() {
        let storage = memory_storage().await;
        let now = Utc::now();
        let fixtures = [
            (TaskType::Assignment, "COMP1010", "Essay 100%", now + Duration::days(3)),
            (TaskType::Assignment, "COMP1010", "Lab 1", now - Duration::days(3)),
            (TaskType::Examination, "COMP1010", "Midterm", now + Duration::days(1)),
            (TaskType::Assignment, "MATH2000", "Problem set", now + Duration::days(2)),
        ];
        for (task_type, code, title, deadline) in fixtures {
            storage
                .create_task_impl(task_request(task_type, code, title, deadline))
                .await
                .unwrap();
        }

        let all = storage
            .list_tasks_with_pagination_impl(TaskListQuery::default())
            .await
            .unwrap();
        let titles: Vec<_> = all.items.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Lab 1", "Midterm", "Problem set", "Essay 100%"]);
        assert_eq!(all.pagination.total, 4);

        let upcoming_comp = storage
            .list_tasks_with_pagination_impl(TaskListQuery {
                course_code: Some("COMP1010".to_string()),
                upcoming_only: true,
                ..Default::default()
            })
            .await
            .unwrap();
        let titles: Vec<_> = upcoming_comp.items.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Midterm", "Essay 100%"]);

        let exams = storage
            .list_tasks_with_pagination_impl(TaskListQuery {
                task_type: Some(TaskType::Examination),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(exams.items.len(), 1);

        // % 按字面匹配
        let search = storage
            .list_tasks_with_pagination_impl(TaskListQuery {
                search: Some("100%".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(search.items.len(), 1);
        assert_eq!(search.items[0].title, "Essay 100%");

        let paged = storage
            .list_tasks_with_pagination_impl(TaskListQuery {
                pagination: PaginationQuery { page: 2, size: 3 },
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(paged.items.len(), 1);
        assert_eq!(paged.pagination.total_pages, 2);
    }

    #[tokio::test]
    async fn test_delete_task() {
        let storage = memory_storage().await;
        let created = storage
            .create_task_impl(task_request(
                TaskType::Assignment,
                "COMP1010",
                "Quiz",
                Utc::now(),
            ))
            .await
            .unwrap();
        assert!(storage.delete_task_impl(&created.id).await.unwrap());
        assert!(storage.get_task_by_id_impl(&created.id).await.unwrap().is_none());
    }
}
