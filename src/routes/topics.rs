use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::topics::requests::CreateTopicRequest;
use crate::services::TopicService;
use crate::utils::SafeTopicId;

// 懒加载的全局 TOPIC_SERVICE 实例
static TOPIC_SERVICE: Lazy<TopicService> = Lazy::new(TopicService::new_lazy);

pub async fn create_topic(
    req: HttpRequest,
    topic_data: web::Json<CreateTopicRequest>,
) -> ActixResult<HttpResponse> {
    TOPIC_SERVICE
        .create_topic(&req, topic_data.into_inner())
        .await
}

pub async fn delete_topic(req: HttpRequest, topic_id: SafeTopicId) -> ActixResult<HttpResponse> {
    TOPIC_SERVICE.delete_topic(&req, topic_id.0).await
}

// 配置路由，主题只有写操作
pub fn configure_topics_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/topics")
            .wrap(middlewares::RequireSession)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::admin())
                    .route("", web::post().to(create_topic))
                    .route("/{topic_id}", web::delete().to(delete_topic)),
            ),
    );
}
