use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{SubjectService, assemble_lms_subject, load_custom_subject};
use crate::errors::PortalError;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::SubjectId;

pub async fn get_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: SubjectId,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match subject_id {
        SubjectId::Lms(course_id) => {
            let fetcher = service.get_fetcher(request);

            // 只提供配置中的 LMS 课程
            if !fetcher.is_configured(&course_id) {
                info!("Rejected request for unlisted LMS course {}", course_id);
                return Ok(subject_not_found());
            }

            match fetcher.fetch_course(&course_id).await {
                Ok(bundle) => {
                    let subject = assemble_lms_subject(&storage, &fetcher, bundle).await;
                    Ok(HttpResponse::Ok().json(ApiResponse::success(
                        subject,
                        "Subject retrieved successfully",
                    )))
                }
                Err(PortalError::NotFound(_)) => Ok(subject_not_found()),
                Err(e) => Ok(ApiResponse::<()>::from_error(
                    &e,
                    ErrorCode::LmsUnavailable,
                    "Failed to load subject from LMS",
                )),
            }
        }
        SubjectId::Custom(course_id) => {
            let course = match storage.get_course_by_id(&course_id).await {
                Ok(Some(course)) => course,
                Ok(None) => return Ok(subject_not_found()),
                Err(e) => {
                    return Ok(ApiResponse::<()>::from_error(
                        &e,
                        ErrorCode::InternalServerError,
                        "Failed to get subject",
                    ));
                }
            };

            match load_custom_subject(&storage, course).await {
                Ok(subject) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                    subject,
                    "Subject retrieved successfully",
                ))),
                Err(e) => Ok(ApiResponse::<()>::from_error(
                    &e,
                    ErrorCode::InternalServerError,
                    "Failed to get subject",
                )),
            }
        }
    }
}

fn subject_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::SubjectNotFound,
        "Subject not found",
    ))
}
