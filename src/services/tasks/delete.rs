use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TaskService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_task(
    service: &TaskService,
    request: &HttpRequest,
    task_id: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_task(&task_id).await {
        Ok(true) => {
            info!("Task {} deleted", task_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Task deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TaskNotFound,
            "Task not found",
        ))),
        Err(e) => Ok(ApiResponse::<()>::from_error(
            &e,
            ErrorCode::TaskDeleteFailed,
            "Task deletion failed",
        )),
    }
}
