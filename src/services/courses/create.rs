use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::middlewares::RequireSession;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    course_data: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    let course_data = match course_data.validate() {
        Ok(data) => data,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }
    };

    let storage = service.get_storage(request);

    match storage.create_course(course_data).await {
        Ok(course) => {
            let actor = RequireSession::extract_session_user(request)
                .map(|user| user.email)
                .unwrap_or_default();
            info!("Course {} created successfully by {}", course.course_code, actor);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(course, "Course created successfully")))
        }
        Err(e) => Ok(ApiResponse::<()>::from_error(
            &e,
            ErrorCode::CourseAlreadyExists,
            "Course creation failed",
        )),
    }
}
