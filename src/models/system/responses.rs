use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct HealthResponse {
    pub status: String,                            // 服务状态
    pub version: String,                           // 服务版本
    pub started_at: chrono::DateTime<chrono::Utc>, // 启动时间
    pub uptime_seconds: i64,                       // 已运行秒数
}
