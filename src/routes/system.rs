use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::SystemService;

// 懒加载的全局 SystemService 实例
static SYSTEM_SERVICE: Lazy<SystemService> = Lazy::new(SystemService::new_lazy);

pub async fn get_health(request: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.get_health(&request).await
}

// 配置路由，健康检查不需要会话
pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/v1/system").route("/health", web::get().to(get_health)));
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};

    use super::*;
    use crate::models::AppStartTime;

    #[actix_web::test]
    async fn test_health_is_public() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppStartTime {
                    start_datetime: chrono::Utc::now() - chrono::Duration::seconds(30),
                }))
                .configure(configure_system_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/system/health")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["status"], "ok");
        assert!(body["data"]["uptime_seconds"].as_i64().unwrap() >= 30);
    }
}
