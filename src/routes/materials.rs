use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::materials::requests::{CreateMaterialRequest, UpdateMaterialRequest};
use crate::services::MaterialService;
use crate::utils::SafeMaterialId;

// 懒加载的全局 MATERIAL_SERVICE 实例
static MATERIAL_SERVICE: Lazy<MaterialService> = Lazy::new(MaterialService::new_lazy);

pub async fn create_material(
    req: HttpRequest,
    material_data: web::Json<CreateMaterialRequest>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .create_material(&req, material_data.into_inner())
        .await
}

pub async fn get_material(
    req: HttpRequest,
    material_id: SafeMaterialId,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.get_material(&req, material_id.0).await
}

pub async fn update_material(
    req: HttpRequest,
    material_id: SafeMaterialId,
    update_data: web::Json<UpdateMaterialRequest>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .update_material(&req, material_id.0, update_data.into_inner())
        .await
}

pub async fn delete_material(
    req: HttpRequest,
    material_id: SafeMaterialId,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.delete_material(&req, material_id.0).await
}

// 配置路由
pub fn configure_materials_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/materials")
            .wrap(middlewares::RequireSession)
            .service(
                web::resource("").route(
                    web::post()
                        .to(create_material)
                        .wrap(middlewares::RequireRole::admin()),
                ),
            )
            .service(
                web::resource("/{material_id}")
                    .route(web::get().to(get_material))
                    .route(
                        web::put()
                            .to(update_material)
                            .wrap(middlewares::RequireRole::admin()),
                    )
                    .route(
                        web::delete()
                            .to(delete_material)
                            .wrap(middlewares::RequireRole::admin()),
                    ),
            ),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::json;

    use super::*;
    use crate::models::courses::requests::{CreateCourseRequest, InitialTopic};
    use crate::routes::test_support::{ADMIN_EMAIL, MEMBER_EMAIL, TestState, bearer, json_body};

    fn page_material() -> serde_json::Value {
        json!({
            "course_id": "101",
            "topic_id": "1",
            "item": {"title": "Reading guide", "type": "Page", "html_content": "<p>Read ch. 1</p>"}
        })
    }

    #[actix_web::test]
    async fn test_material_lifecycle() {
        let state = TestState::new().await;
        let app = portal_test_app!(state, configure_materials_routes);

        let req = test::TestRequest::post()
            .uri("/api/v1/materials")
            .insert_header(bearer(ADMIN_EMAIL))
            .set_json(page_material())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = json_body(resp).await;
        let material_id = body["data"]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/materials/{material_id}"))
            .insert_header(bearer(ADMIN_EMAIL))
            .set_json(json!({
                "item": {"title": "Slides", "type": "File", "url": "https://files.example.edu/w1.pdf"}
            }))
            .to_request();
        let body = json_body(test::call_service(&app, req).await).await;
        assert_eq!(body["data"]["item"]["type"], "File");
        assert_eq!(body["data"]["item"]["html_content"], serde_json::Value::Null);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/materials/{material_id}"))
            .insert_header(bearer(MEMBER_EMAIL))
            .to_request();
        let body = json_body(test::call_service(&app, req).await).await;
        assert_eq!(body["data"]["item"]["title"], "Slides");
        assert_eq!(body["data"]["topic_id"], "1");

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/materials/{material_id}"))
            .insert_header(bearer(ADMIN_EMAIL))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/materials/{material_id}"))
            .insert_header(bearer(ADMIN_EMAIL))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn test_material_validation() {
        let state = TestState::new().await;
        let app = portal_test_app!(state, configure_materials_routes);

        let mut body = page_material();
        body["item"]["html_content"] = json!("");
        let req = test::TestRequest::post()
            .uri("/api/v1/materials")
            .insert_header(bearer(ADMIN_EMAIL))
            .set_json(body)
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );

        // 指向不存在的自定义主题
        let mut body = page_material();
        body["topic_id"] = json!("6f1c2a8e-3d4b-4c5d-9e6f-0a1b2c3d4e5f");
        let req = test::TestRequest::post()
            .uri("/api/v1/materials")
            .insert_header(bearer(ADMIN_EMAIL))
            .set_json(body)
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );

        let req = test::TestRequest::get()
            .uri("/api/v1/materials/42")
            .insert_header(bearer(MEMBER_EMAIL))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }

    fn course(code: &str) -> CreateCourseRequest {
        CreateCourseRequest {
            course_code: code.to_string(),
            title: "Data Structures".to_string(),
            year: Some(2026),
            semester: Some(1),
            image_url: None,
            syllabus_url: None,
            topics: vec![InitialTopic {
                title: "Week 1".to_string(),
            }],
        }
    }

    #[actix_web::test]
    async fn test_material_topic_must_belong_to_its_course() {
        let state = TestState::new().await;
        let course_a = state.storage.create_course(course("AAAA1000")).await.unwrap();
        let course_b = state.storage.create_course(course("BBBB1000")).await.unwrap();
        let topic_a = state.storage.list_topics_by_course(&course_a.id).await.unwrap()[0]
            .id
            .clone();
        let topic_b = state.storage.list_topics_by_course(&course_b.id).await.unwrap()[0]
            .id
            .clone();
        let app = portal_test_app!(state, configure_materials_routes);

        let mut body = page_material();
        body["course_id"] = json!(course_a.id);
        body["topic_id"] = json!(topic_b);
        let req = test::TestRequest::post()
            .uri("/api/v1/materials")
            .insert_header(bearer(ADMIN_EMAIL))
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(resp).await["code"], 1001);

        let mut body = page_material();
        body["course_id"] = json!(course_a.id);
        body["topic_id"] = json!(topic_a);
        let req = test::TestRequest::post()
            .uri("/api/v1/materials")
            .insert_header(bearer(ADMIN_EMAIL))
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let material_id = json_body(resp).await["data"]["id"]
            .as_str()
            .unwrap()
            .to_string();

        // 不能移动到其他课程的主题
        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/materials/{material_id}"))
            .insert_header(bearer(ADMIN_EMAIL))
            .set_json(json!({"topic_id": topic_b}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/materials/{material_id}"))
            .insert_header(bearer(MEMBER_EMAIL))
            .to_request();
        let body = json_body(test::call_service(&app, req).await).await;
        assert_eq!(body["data"]["topic_id"], json!(topic_a));
    }
}
