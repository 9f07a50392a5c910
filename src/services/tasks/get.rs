use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TaskService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_task(
    service: &TaskService,
    request: &HttpRequest,
    task_id: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_task_by_id(&task_id).await {
        Ok(Some(task)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            task,
            "Task retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TaskNotFound,
            "Task not found",
        ))),
        Err(e) => Ok(ApiResponse::<()>::from_error(
            &e,
            ErrorCode::InternalServerError,
            "Failed to get task",
        )),
    }
}
