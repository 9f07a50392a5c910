use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TopicService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_topic(
    service: &TopicService,
    request: &HttpRequest,
    topic_id: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_topic(&topic_id).await {
        Ok(Some(summary)) => {
            info!("Topic {} deleted with {} materials", topic_id, summary.materials);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Topic deleted successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TopicNotFound,
            "Topic not found",
        ))),
        Err(e) => Ok(ApiResponse::<()>::from_error(
            &e,
            ErrorCode::TopicDeleteFailed,
            "Topic deletion failed",
        )),
    }
}
