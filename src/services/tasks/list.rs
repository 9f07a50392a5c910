use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TaskService;
use crate::models::tasks::requests::{TaskListQuery, TaskQueryParams};
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_tasks(
    service: &TaskService,
    request: &HttpRequest,
    query: TaskQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_tasks_with_pagination(TaskListQuery::from(query))
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Tasks retrieved successfully",
        ))),
        Err(e) => Ok(ApiResponse::<()>::from_error(
            &e,
            ErrorCode::InternalServerError,
            "Failed to list tasks",
        )),
    }
}
