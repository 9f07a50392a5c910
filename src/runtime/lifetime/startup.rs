use crate::config::AppConfig;
use crate::feeds::FeedReader;
use crate::lms::{LmsClient, LmsFetcher};
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub fetcher: Arc<LmsFetcher>,
    pub feeds: Arc<FeedReader>,
}

/// 创建 LMS 聚合器
///
/// 未配置令牌时仍然启动，LMS 课程请求会以上游错误降级。
fn create_fetcher(config: &AppConfig) -> Arc<LmsFetcher> {
    let lms = &config.lms;
    if lms.api_token.trim().is_empty() {
        warn!("LMS API token is not configured, LMS subjects will be unavailable");
    }
    if lms.course_ids.is_empty() {
        warn!("No LMS course ids configured, only custom subjects will be listed");
    }

    let client = LmsClient::new(lms).expect("Failed to create LMS client");
    debug!(
        "LMS client ready for {} ({} courses, concurrency {})",
        lms.base_url,
        lms.course_ids.len(),
        lms.max_concurrency
    );

    Arc::new(LmsFetcher::new(Arc::new(client), lms))
}

/// 准备服务器启动的上下文
/// 包括存储、LMS 客户端与表格源
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let config = AppConfig::get();

    // 整个进程共享同一个连接池
    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    let fetcher = create_fetcher(config);

    let feeds = FeedReader::new(&config.feeds).expect("Failed to create feed reader");
    if config.feeds.schedule_csv_url.trim().is_empty() {
        warn!("Schedule feed URL is not configured");
    }
    if config.feeds.calendar_ics_url.trim().is_empty() {
        warn!("Calendar feed URL is not configured");
    }

    StartupContext {
        storage,
        fetcher,
        feeds: Arc::new(feeds),
    }
}
