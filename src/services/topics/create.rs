use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TopicService;
use crate::models::topics::requests::CreateTopicRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::is_store_id;

pub async fn create_topic(
    service: &TopicService,
    request: &HttpRequest,
    topic_data: CreateTopicRequest,
) -> ActixResult<HttpResponse> {
    let topic_data = match topic_data.validate() {
        Ok(data) => data,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }
    };

    let storage = service.get_storage(request);

    // 自定义课程必须存在；LMS 课程 ID 不做校验
    if is_store_id(&topic_data.course_id) {
        match storage.get_course_by_id(&topic_data.course_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::CourseNotFound,
                    "Course not found",
                )));
            }
            Err(e) => {
                return Ok(ApiResponse::<()>::from_error(
                    &e,
                    ErrorCode::TopicCreationFailed,
                    "Topic creation failed",
                ));
            }
        }
    }

    match storage.create_topic(topic_data).await {
        Ok(topic) => {
            info!("Topic {} created in course {}", topic.id, topic.course_id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(topic, "Topic created successfully")))
        }
        Err(e) => Ok(ApiResponse::<()>::from_error(
            &e,
            ErrorCode::TopicCreationFailed,
            "Topic creation failed",
        )),
    }
}
