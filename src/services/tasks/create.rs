use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TaskService;
use crate::models::tasks::requests::CreateTaskRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_task(
    service: &TaskService,
    request: &HttpRequest,
    task_data: CreateTaskRequest,
) -> ActixResult<HttpResponse> {
    let task_data = match task_data.validate() {
        Ok(data) => data,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }
    };

    let storage = service.get_storage(request);

    match storage.create_task(task_data).await {
        Ok(task) => {
            info!(
                "Task {} ({}) created for {}, due {}",
                task.id, task.task_type, task.course_code, task.deadline
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(task, "Task created successfully")))
        }
        Err(e) => Ok(ApiResponse::<()>::from_error(
            &e,
            ErrorCode::TaskCreationFailed,
            "Task creation failed",
        )),
    }
}
