use super::entities::Task;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 任务列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/task.ts")]
pub struct TaskListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Task>,
}
