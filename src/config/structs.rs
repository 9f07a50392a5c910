use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub lms: LmsConfig,
    pub feeds: FeedsConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub unix_socket_path: String,
    pub workers: usize,
    pub max_workers: usize,
    pub timeouts: TimeoutConfig,
    pub limits: LimitConfig,
}

/// 超时配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub client_request: u64,
    pub client_disconnect: u64,
    pub keep_alive: u64,
}

/// 限制配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    pub max_payload_size: usize,
}

/// 会话校验配置
///
/// 登录由外部 OAuth 身份提供方完成，这里只负责校验其签发的会话令牌。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub session_secret: String,
    pub allowed_email_domain: String, // 允许登录的机构邮箱后缀，如 "@university.edu"
    #[serde(default)]
    pub admin_emails: Vec<String>,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,    // 数据库连接 URL（从 scheme 自动推断类型）
    pub pool_size: u32, // 连接池大小
    pub timeout: u64,   // 连接超时 (秒)
}

/// CORS 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub max_age: usize,
}

/// LMS 接口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LmsConfig {
    pub base_url: String,
    #[serde(skip_serializing, default)]
    pub api_token: String,
    #[serde(default)]
    pub course_ids: Vec<String>, // 门户展示的 LMS 课程，按此顺序输出
    pub timeout_secs: u64,       // 单次请求超时
    pub max_concurrency: usize,  // 单个请求内的并发扇出上限
    pub file_link_class: String, // 页面中内嵌文件链接的 class
    #[serde(default)]
    pub terms: HashMap<String, TermOverride>, // 课程 ID -> 显式学期信息
}

/// 显式配置的学年学期，优先于学期字符串解析
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermOverride {
    pub year: i32,
    pub semester: i32,
}

/// 公开表格 / 日历源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedsConfig {
    #[serde(default)]
    pub schedule_csv_url: String,
    #[serde(default)]
    pub calendar_ics_url: String,
    pub retention_days: i64, // 早于 今天 - retention_days 的条目会被丢弃
    pub timeout_secs: u64,
}
