use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::FeedService;

// 懒加载的全局 FEED_SERVICE 实例
static FEED_SERVICE: Lazy<FeedService> = Lazy::new(FeedService::new_lazy);

pub async fn get_schedule(req: HttpRequest) -> ActixResult<HttpResponse> {
    FEED_SERVICE.get_schedule(&req).await
}

pub async fn get_calendar(req: HttpRequest) -> ActixResult<HttpResponse> {
    FEED_SERVICE.get_calendar(&req).await
}

// 配置路由
pub fn configure_feeds_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/feeds")
            .wrap(middlewares::RequireSession)
            .route("/schedule", web::get().to(get_schedule))
            .route("/calendar", web::get().to(get_calendar)),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;

    use super::*;
    use crate::feeds::mock::static_reader;
    use crate::routes::test_support::{MEMBER_EMAIL, TestState, bearer, json_body};

    #[actix_web::test]
    async fn test_unavailable_feed_returns_generic_error() {
        let state = TestState::new().await;
        let app = portal_test_app!(state, configure_feeds_routes);

        for uri in ["/api/v1/feeds/schedule", "/api/v1/feeds/calendar"] {
            let req = test::TestRequest::get()
                .uri(uri)
                .insert_header(bearer(MEMBER_EMAIL))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let body = json_body(resp).await;
            assert_eq!(body["code"], 1005);
            // 上游细节只写日志
            assert!(!body["message"].as_str().unwrap().contains("not configured"));
        }
    }

    #[actix_web::test]
    async fn test_schedule_feed_returns_recent_rows() {
        let today = chrono::Local::now().date_naive();
        let stale = today - chrono::Days::new(30);
        let csv = format!(
            "Date,Event\n{},Enrolment opens\n{},Lecture 4\nTBA,Guest talk\n",
            stale.format("%d/%m/%Y"),
            today.format("%d/%m/%Y"),
        );

        let mut state = TestState::new().await;
        state.feeds = std::sync::Arc::new(static_reader(&csv, ""));
        let app = portal_test_app!(state, configure_feeds_routes);

        let req = test::TestRequest::get()
            .uri("/api/v1/feeds/schedule")
            .insert_header(bearer(MEMBER_EMAIL))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        let titles: Vec<_> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["title"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(titles, vec!["Lecture 4", "Guest talk"]);
        assert_eq!(body["data"][1]["date"]["kind"], "unrecognized");
    }
}
