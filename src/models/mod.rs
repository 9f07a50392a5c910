//! 数据模型定义
//!
//! - `common`: 统一响应与分页结构
//! - `subjects`: 统一课程视图（LMS 课程与自定义课程归一后的形态）
//! - `courses` / `topics` / `materials`: 管理端维护的自定义课程层级
//! - `tasks`: 作业与考试
//! - `lms`: LMS 接口原始数据结构与聚合结果
//! - `feeds`: 公开表格与日历源条目
//! - `system`: 服务状态

pub mod common;
pub mod courses;
pub mod feeds;
pub mod lms;
pub mod materials;
pub mod subjects;
pub mod system;
pub mod tasks;
pub mod topics;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery};

use serde::Serialize;

/// 程序启动时间
#[derive(Debug, Clone, Serialize)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    ValidationFailed = 1001,
    Unauthorized = 1002,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,

    // 课程
    CourseNotFound = 2000,
    CourseAlreadyExists = 2001,
    CourseCreationFailed = 2002,
    CourseUpdateFailed = 2003,
    CourseDeleteFailed = 2004,

    // 主题
    TopicNotFound = 2100,
    TopicCreationFailed = 2101,
    TopicDeleteFailed = 2102,

    // 资料
    MaterialNotFound = 2200,
    MaterialCreationFailed = 2201,
    MaterialUpdateFailed = 2202,
    MaterialDeleteFailed = 2203,

    // 任务
    TaskNotFound = 2300,
    TaskCreationFailed = 2301,
    TaskDeleteFailed = 2302,

    // 统一课程视图
    SubjectNotFound = 2400,
    LmsUnavailable = 2401,

    // 表格 / 日历源
    FeedUnavailable = 2500,
}
