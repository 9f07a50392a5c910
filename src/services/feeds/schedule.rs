use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FeedService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_schedule(
    service: &FeedService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let reader = service.get_reader(request);

    // 表格是该响应唯一的数据来源，拉取失败直接返回 500
    match reader.schedule(service.today()).await {
        Ok(rows) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            rows,
            "Schedule retrieved successfully",
        ))),
        Err(e) => Ok(ApiResponse::<()>::from_error(
            &e,
            ErrorCode::FeedUnavailable,
            "Failed to load schedule",
        )),
    }
}
