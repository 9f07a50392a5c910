use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{SubjectService, load_custom_subject};
use crate::middlewares::RequireSession;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_subject(
    service: &SubjectService,
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

    let course = match storage.create_course(course_data).await {
        Ok(course) => course,
        Err(e) => {
            return Ok(ApiResponse::<()>::from_error(
                &e,
                ErrorCode::CourseAlreadyExists,
                "Subject creation failed",
            ));
        }
    };

    let actor = RequireSession::extract_session_user(request)
        .map(|user| user.email)
        .unwrap_or_default();
    info!("Subject {} created by {}", course.course_code, actor);

    match load_custom_subject(&storage, course).await {
        Ok(subject) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(subject, "Subject created successfully"))),
        Err(e) => Ok(ApiResponse::<()>::from_error(
            &e,
            ErrorCode::CourseCreationFailed,
            "Subject creation failed",
        )),
    }
}
