use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{MaterialService, check_topic, topic_rejection};
use crate::models::materials::requests::CreateMaterialRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_material(
    service: &MaterialService,
    request: &HttpRequest,
    material_data: CreateMaterialRequest,
) -> ActixResult<HttpResponse> {
    let material_data = match material_data.validate() {
        Ok(data) => data,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }
    };

    let storage = service.get_storage(request);

    match check_topic(&storage, &material_data.topic_id, &material_data.course_id).await {
        Ok(check) => {
            if let Some(resp) = topic_rejection(check) {
                return Ok(resp);
            }
        }
        Err(e) => {
            return Ok(ApiResponse::<()>::from_error(
                &e,
                ErrorCode::MaterialCreationFailed,
                "Material creation failed",
            ));
        }
    }

    match storage.create_material(material_data).await {
        Ok(material) => {
            info!(
                "Material {} ({}) created in topic {}",
                material.id, material.item.item_type, material.topic_id
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(material, "Material created successfully")))
        }
        Err(e) => Ok(ApiResponse::<()>::from_error(
            &e,
            ErrorCode::MaterialCreationFailed,
            "Material creation failed",
        )),
    }
}
