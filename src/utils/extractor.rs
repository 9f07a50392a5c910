//! 路径参数安全提取器
//!
//! 在进入业务逻辑之前校验路径中的 ID 格式，格式错误直接返回 400，不触发任何 I/O。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use super::validate::{is_lms_id, normalize_store_id};
use crate::models::{ApiResponse, ErrorCode};

fn bad_request(message: String) -> actix_web::Error {
    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(message, response).into()
}

/// 定义自定义存储 ID（UUID）的路径提取器
macro_rules! define_safe_store_id {
    ($($name:ident => $param:literal),* $(,)?) => {
        $(
            #[derive(Debug, Clone)]
            pub struct $name(pub String);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    let raw = req.match_info().get($param).unwrap_or_default();
                    match normalize_store_id(raw) {
                        Some(id) => ready(Ok($name(id))),
                        None => ready(Err(bad_request(format!(
                            "Invalid {}: expected a UUID",
                            $param
                        )))),
                    }
                }
            }
        )*
    };
}

define_safe_store_id! {
    SafeCourseId => "course_id",
    SafeTopicId => "topic_id",
    SafeMaterialId => "material_id",
    SafeTaskId => "task_id",
}

/// 统一课程视图 ID：数字为 LMS 课程，UUID 为自定义课程
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectId {
    Lms(String),
    Custom(String),
}

impl SubjectId {
    pub fn parse(raw: &str) -> Option<Self> {
        if is_lms_id(raw) {
            Some(SubjectId::Lms(raw.to_string()))
        } else {
            normalize_store_id(raw).map(SubjectId::Custom)
        }
    }
}

#[derive(Debug, Clone)]
pub struct SafeSubjectId(pub SubjectId);

impl FromRequest for SafeSubjectId {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("subject_id").unwrap_or_default();
        match SubjectId::parse(raw) {
            Some(id) => ready(Ok(SafeSubjectId(id))),
            None => ready(Err(bad_request(
                "Invalid subject_id: expected a numeric LMS id or a UUID".to_string(),
            ))),
        }
    }
}
