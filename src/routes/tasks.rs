use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::tasks::requests::{CreateTaskRequest, TaskQueryParams};
use crate::services::TaskService;
use crate::utils::SafeTaskId;

// 懒加载的全局 TASK_SERVICE 实例
static TASK_SERVICE: Lazy<TaskService> = Lazy::new(TaskService::new_lazy);

// HTTP处理程序
pub async fn list_tasks(
    req: HttpRequest,
    query: web::Query<TaskQueryParams>,
) -> ActixResult<HttpResponse> {
    TASK_SERVICE.list_tasks(&req, query.into_inner()).await
}

pub async fn create_task(
    req: HttpRequest,
    task_data: web::Json<CreateTaskRequest>,
) -> ActixResult<HttpResponse> {
    TASK_SERVICE.create_task(&req, task_data.into_inner()).await
}

pub async fn get_task(req: HttpRequest, task_id: SafeTaskId) -> ActixResult<HttpResponse> {
    TASK_SERVICE.get_task(&req, task_id.0).await
}

pub async fn delete_task(req: HttpRequest, task_id: SafeTaskId) -> ActixResult<HttpResponse> {
    TASK_SERVICE.delete_task(&req, task_id.0).await
}

// 配置路由
pub fn configure_tasks_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/tasks")
            .wrap(middlewares::RequireSession)
            .service(
                web::resource("")
                    .route(web::get().to(list_tasks))
                    .route(
                        web::post()
                            .to(create_task)
                            .wrap(middlewares::RequireRole::admin()),
                    ),
            )
            .service(
                web::resource("/{task_id}")
                    .route(web::get().to(get_task))
                    .route(
                        web::delete()
                            .to(delete_task)
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
    use crate::routes::test_support::{ADMIN_EMAIL, MEMBER_EMAIL, TestState, bearer, json_body};

    #[actix_web::test]
    async fn test_task_round_trips_through_create_and_fetch() {
        let state = TestState::new().await;
        let app = portal_test_app!(state, configure_tasks_routes);

        let req = test::TestRequest::post()
            .uri("/api/v1/tasks")
            .insert_header(bearer(ADMIN_EMAIL))
            .set_json(json!({
                "type": "examination",
                "course_code": "COMP1010",
                "title": "Final exam",
                "deadline": "2099-06-15T09:30:00.250Z",
                "resources": []
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created = json_body(resp).await["data"].clone();

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/tasks/{}", created["id"].as_str().unwrap()))
            .insert_header(bearer(MEMBER_EMAIL))
            .to_request();
        let fetched = json_body(test::call_service(&app, req).await).await["data"].clone();
        assert_eq!(fetched, created);
        assert_eq!(fetched["resources"], json!([]));
    }

    #[actix_web::test]
    async fn test_list_tasks_with_filters() {
        let state = TestState::new().await;
        let app = portal_test_app!(state, configure_tasks_routes);

        let tasks = [
            ("assignment", "COMP1010", "Essay", "2099-03-01T00:00:00Z"),
            ("examination", "COMP1010", "Midterm", "2099-02-01T00:00:00Z"),
            ("assignment", "MATH2001", "Problem set", "2020-01-01T00:00:00Z"),
        ];
        for (kind, code, title, deadline) in tasks {
            let req = test::TestRequest::post()
                .uri("/api/v1/tasks")
                .insert_header(bearer(ADMIN_EMAIL))
                .set_json(json!({
                    "type": kind,
                    "course_code": code,
                    "title": title,
                    "deadline": deadline
                }))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
        }

        let req = test::TestRequest::get()
            .uri("/api/v1/tasks?upcoming_only=true")
            .insert_header(bearer(MEMBER_EMAIL))
            .to_request();
        let body = json_body(test::call_service(&app, req).await).await;
        let titles: Vec<&str> = body["data"]["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["title"].as_str().unwrap())
            .collect();
        // 按截止时间升序
        assert_eq!(titles, vec!["Midterm", "Essay"]);

        let req = test::TestRequest::get()
            .uri("/api/v1/tasks?type=assignment&course_code=MATH2001")
            .insert_header(bearer(MEMBER_EMAIL))
            .to_request();
        let body = json_body(test::call_service(&app, req).await).await;
        assert_eq!(body["data"]["pagination"]["total"], 1);

        let req = test::TestRequest::get()
            .uri("/api/v1/tasks?type=quiz")
            .insert_header(bearer(MEMBER_EMAIL))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[actix_web::test]
    async fn test_delete_missing_task() {
        let state = TestState::new().await;
        let app = portal_test_app!(state, configure_tasks_routes);

        let req = test::TestRequest::delete()
            .uri("/api/v1/tasks/6f1c2a8e-3d4b-4c5d-9e6f-0a1b2c3d4e5f")
            .insert_header(bearer(ADMIN_EMAIL))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }
}
