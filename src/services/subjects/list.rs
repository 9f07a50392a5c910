use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{debug, warn};

use super::{SubjectService, assemble_lms_subject, load_custom_subject};
use crate::adapters::merge_subjects;
use crate::lms::buffered_ordered;
use crate::models::{ApiResponse, ErrorCode};

// 组装自定义课程时的并发上限
const CUSTOM_SUBJECT_CONCURRENCY: usize = 8;

pub async fn list_subjects(
    service: &SubjectService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let fetcher = service.get_fetcher(request);

    // 自定义课程来自本地数据库，失败即视为请求失败
    let courses = match storage.list_courses().await {
        Ok(courses) => courses,
        Err(e) => {
            return Ok(ApiResponse::<()>::from_error(
                &e,
                ErrorCode::InternalServerError,
                "Failed to list subjects",
            ));
        }
    };

    let custom = buffered_ordered(courses, CUSTOM_SUBJECT_CONCURRENCY, |course| {
        load_custom_subject(&storage, course)
    })
    .await;
    let custom = match custom.into_iter().collect::<Result<Vec<_>, _>>() {
        Ok(subjects) => subjects,
        Err(e) => {
            return Ok(ApiResponse::<()>::from_error(
                &e,
                ErrorCode::InternalServerError,
                "Failed to list subjects",
            ));
        }
    };

    // LMS 课程逐门降级：失败的课程不出现在列表中
    let outcome = fetcher.fetch_courses(fetcher.course_ids()).await;
    if !outcome.is_complete() {
        warn!(
            "{} of {} LMS courses are unavailable",
            outcome.failed.len(),
            fetcher.course_ids().len()
        );
    }

    let mut lms = Vec::with_capacity(outcome.succeeded.len());
    for bundle in outcome.succeeded {
        lms.push(assemble_lms_subject(&storage, &fetcher, bundle).await);
    }

    let subjects = merge_subjects(custom, lms);
    debug!("Listing {} subjects", subjects.len());

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        subjects,
        "Subjects retrieved successfully",
    )))
}
