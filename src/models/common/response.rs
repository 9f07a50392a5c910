use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use tracing::error;
use ts_rs::TS;

use crate::errors::PortalError;
use crate::models::ErrorCode;

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// 将业务错误转换为 HTTP 响应
    ///
    /// 4xx 错误原样返回错误详情；其余错误只返回通用信息，详情写入服务端日志。
    pub fn from_error(err: &PortalError, code: ErrorCode, context: &str) -> HttpResponse {
        let status = err.http_status();
        if err.is_client_error() {
            let code = match err {
                PortalError::Validation(_) => ErrorCode::ValidationFailed,
                _ => code,
            };
            HttpResponse::build(status).json(Self::error_empty(code, err.message()))
        } else {
            error!("{}: {}", context, err);
            HttpResponse::build(status).json(Self::error_empty(
                ErrorCode::InternalServerError,
                format!("{context}, please try again later"),
            ))
        }
    }
}
