use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::errors::PortalError;
use crate::models::courses::requests::UpdateCourseRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: String,
    update_data: UpdateCourseRequest,
) -> ActixResult<HttpResponse> {
    let update_data = match update_data.validate() {
        Ok(data) => data,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }
    };

    let storage = service.get_storage(request);

    match storage.update_course(&course_id, update_data).await {
        Ok(Some(course)) => {
            info!("Course {} updated", course.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(course, "Course updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e @ PortalError::Conflict(_)) => Ok(ApiResponse::<()>::from_error(
            &e,
            ErrorCode::CourseAlreadyExists,
            "Course update failed",
        )),
        Err(e) => Ok(ApiResponse::<()>::from_error(
            &e,
            ErrorCode::CourseUpdateFailed,
            "Course update failed",
        )),
    }
}
