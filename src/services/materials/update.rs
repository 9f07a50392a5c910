use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{MaterialService, check_topic, topic_rejection};
use crate::models::materials::requests::UpdateMaterialRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_material(
    service: &MaterialService,
    request: &HttpRequest,
    material_id: String,
    update_data: UpdateMaterialRequest,
) -> ActixResult<HttpResponse> {
    let update_data = match update_data.validate() {
        Ok(data) => data,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }
    };

    let storage = service.get_storage(request);

    // 移动到其他主题时，目标主题必须属于资料原有课程
    if let Some(topic_id) = &update_data.topic_id {
        let material = match storage.get_material_by_id(&material_id).await {
            Ok(Some(material)) => material,
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::MaterialNotFound,
                    "Material not found",
                )));
            }
            Err(e) => {
                return Ok(ApiResponse::<()>::from_error(
                    &e,
                    ErrorCode::MaterialUpdateFailed,
                    "Material update failed",
                ));
            }
        };

        match check_topic(&storage, topic_id, &material.course_id).await {
            Ok(check) => {
                if let Some(resp) = topic_rejection(check) {
                    return Ok(resp);
                }
            }
            Err(e) => {
                return Ok(ApiResponse::<()>::from_error(
                    &e,
                    ErrorCode::MaterialUpdateFailed,
                    "Material update failed",
                ));
            }
        }
    }

    match storage.update_material(&material_id, update_data).await {
        Ok(Some(material)) => {
            info!("Material {} updated", material.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                material,
                "Material updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::MaterialNotFound,
            "Material not found",
        ))),
        Err(e) => Ok(ApiResponse::<()>::from_error(
            &e,
            ErrorCode::MaterialUpdateFailed,
            "Material update failed",
        )),
    }
}
