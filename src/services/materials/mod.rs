pub mod create;
pub mod delete;
pub mod get;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::materials::requests::{CreateMaterialRequest, UpdateMaterialRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::validate::is_store_id;

pub struct MaterialService {
    storage: Option<Arc<dyn Storage>>,
}

impl MaterialService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn create_material(
        &self,
        req: &HttpRequest,
        material_data: CreateMaterialRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_material(self, req, material_data).await
    }

    pub async fn get_material(
        &self,
        req: &HttpRequest,
        material_id: String,
    ) -> ActixResult<HttpResponse> {
        get::get_material(self, req, material_id).await
    }

    pub async fn update_material(
        &self,
        req: &HttpRequest,
        material_id: String,
        update_data: UpdateMaterialRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_material(self, req, material_id, update_data).await
    }

    pub async fn delete_material(
        &self,
        req: &HttpRequest,
        material_id: String,
    ) -> ActixResult<HttpResponse> {
        delete::delete_material(self, req, material_id).await
    }
}

/// 目标主题的校验结果
pub(crate) enum TopicCheck {
    Accepted,
    Missing,
    OtherCourse,
}

/// 自定义主题必须存在且属于资料所在课程；LMS 模块 ID 直接放行
pub(crate) async fn check_topic(
    storage: &Arc<dyn Storage>,
    topic_id: &str,
    course_id: &str,
) -> Result<TopicCheck> {
    if !is_store_id(topic_id) {
        return Ok(TopicCheck::Accepted);
    }
    Ok(match storage.get_topic_by_id(topic_id).await? {
        None => TopicCheck::Missing,
        Some(topic) if topic.course_id != course_id => TopicCheck::OtherCourse,
        Some(_) => TopicCheck::Accepted,
    })
}

pub(crate) fn topic_rejection(check: TopicCheck) -> Option<HttpResponse> {
    match check {
        TopicCheck::Accepted => None,
        TopicCheck::Missing => Some(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TopicNotFound,
            "Topic not found",
        ))),
        TopicCheck::OtherCourse => Some(HttpResponse::BadRequest().json(
            ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                "Topic does not belong to the material's course",
            ),
        )),
    }
}
