use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FeedService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_calendar(
    service: &FeedService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let reader = service.get_reader(request);

    match reader.calendar(service.today()).await {
        Ok(events) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            events,
            "Calendar retrieved successfully",
        ))),
        Err(e) => Ok(ApiResponse::<()>::from_error(
            &e,
            ErrorCode::FeedUnavailable,
            "Failed to load calendar",
        )),
    }
}
