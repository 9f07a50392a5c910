use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_course(&course_id).await {
        Ok(Some(summary)) => {
            info!(
                "Course {} deleted with {} topics and {} materials",
                course_id, summary.topics, summary.materials
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Course deleted successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => Ok(ApiResponse::<()>::from_error(
            &e,
            ErrorCode::CourseDeleteFailed,
            "Course deletion failed",
        )),
    }
}
