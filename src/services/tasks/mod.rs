pub mod create;
pub mod delete;
pub mod get;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::tasks::requests::{CreateTaskRequest, TaskQueryParams};
use crate::storage::Storage;

pub struct TaskService {
    storage: Option<Arc<dyn Storage>>,
}

impl TaskService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 分页获取任务列表
    pub async fn list_tasks(
        &self,
        request: &HttpRequest,
        query: TaskQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_tasks(self, request, query).await
    }

    pub async fn create_task(
        &self,
        req: &HttpRequest,
        task_data: CreateTaskRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_task(self, req, task_data).await
    }

    pub async fn get_task(&self, req: &HttpRequest, task_id: String) -> ActixResult<HttpResponse> {
        get::get_task(self, req, task_id).await
    }

    pub async fn delete_task(
        &self,
        req: &HttpRequest,
        task_id: String,
    ) -> ActixResult<HttpResponse> {
        delete::delete_task(self, req, task_id).await
    }
}
