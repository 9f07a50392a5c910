use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use super::entities::{TaskResource, TaskType};
use crate::models::common::PaginationQuery;
use crate::utils::validate::{validate_course_code, validate_title, validate_url};

/// 创建任务请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/task.ts")]
pub struct CreateTaskRequest {
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub course_code: String,
    pub title: String,
    pub deadline: DateTime<Utc>, // ISO 8601 格式，如 "2026-01-24T12:00:00Z"
    #[serde(default)]
    pub resources: Vec<TaskResource>,
}

impl CreateTaskRequest {
    pub fn validate(mut self) -> Result<Self, String> {
        self.course_code = validate_course_code(&self.course_code)?;
        self.title = validate_title(&self.title)?;
        for resource in &mut self.resources {
            resource.title = validate_title(&resource.title)?;
            resource.url = validate_url(&resource.url)?;
        }
        Ok(self)
    }
}

/// 任务列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/task.ts")]
pub struct TaskQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub course_code: Option<String>,
    #[serde(rename = "type")]
    pub task_type: Option<TaskType>,
    /// 只返回截止时间未到的任务
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub upcoming_only: Option<bool>,
    pub search: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct TaskListQuery {
    pub pagination: PaginationQuery,
    pub course_code: Option<String>,
    pub task_type: Option<TaskType>,
    pub upcoming_only: bool,
    pub search: Option<String>,
}

impl From<TaskQueryParams> for TaskListQuery {
    fn from(params: TaskQueryParams) -> Self {
        Self {
            pagination: params.pagination,
            course_code: params
                .course_code
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            task_type: params.task_type,
            upcoming_only: params.upcoming_only.unwrap_or(false),
            search: params.search,
        }
    }
}

// flatten 之后查询参数全部以字符串形式出现，这里同时接受布尔值与字符串
fn deserialize_optional_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Str(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::Str(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "true" | "1" | "yes" => Ok(Some(true)),
            "false" | "0" | "no" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "invalid boolean value: {other}"
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_from_query_string() {
        let params = actix_web::web::Query::<TaskQueryParams>::from_query(
            "page=2&size=5&type=examination&upcoming_only=true",
        )
        .unwrap()
        .into_inner();
        assert_eq!(params.pagination.page, 2);
        assert_eq!(params.task_type, Some(TaskType::Examination));
        assert_eq!(params.upcoming_only, Some(true));

        let query = TaskListQuery::from(params);
        assert!(query.upcoming_only);
    }

    #[test]
    fn test_create_request_validation() {
        let req: CreateTaskRequest = serde_json::from_value(serde_json::json!({
            "type": "assignment",
            "course_code": " COMP1010 ",
            "title": "Lab report",
            "deadline": "2030-05-01T09:00:00Z"
        }))
        .unwrap();
        let req = req.validate().unwrap();
        assert_eq!(req.course_code, "COMP1010");
        assert!(req.resources.is_empty());
    }
}
