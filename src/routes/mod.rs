// 路由测试共用的应用构建宏，需在子模块声明之前定义
#[cfg(test)]
macro_rules! portal_test_app {
    ($state:expr, $($configure:expr),+ $(,)?) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(
                    actix_web::web::QueryConfig::default()
                        .error_handler(crate::utils::query_error_handler),
                )
                .app_data(
                    actix_web::web::JsonConfig::default()
                        .error_handler(crate::utils::json_error_handler),
                )
                .app_data(actix_web::web::Data::new($state.storage.clone()))
                .app_data(actix_web::web::Data::new($state.fetcher.clone()))
                .app_data(actix_web::web::Data::new($state.feeds.clone()))
                .app_data(actix_web::web::Data::new(
                    crate::routes::test_support::auth_config(),
                ))
                $(.configure($configure))+,
        )
        .await
    };
}

pub mod courses;

pub mod feeds;

pub mod materials;

pub mod subjects;

pub mod system;

pub mod tasks;

pub mod topics;

pub use courses::configure_courses_routes;
pub use feeds::configure_feeds_routes;
pub use materials::configure_materials_routes;
pub use subjects::configure_subjects_routes;
pub use system::configure_system_routes;
pub use tasks::configure_tasks_routes;
pub use topics::configure_topics_routes;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use actix_web::body::MessageBody;
    use actix_web::dev::ServiceResponse;
    use actix_web::test;
    use jsonwebtoken::{EncodingKey, Header, encode};

    use crate::config::{AuthConfig, FeedsConfig};
    use crate::feeds::{DEFAULT_RETENTION_DAYS, FeedReader};
    use crate::lms::LmsFetcher;
    use crate::lms::mock::{MockLms, config, week_one_lms};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::memory_storage;
    use crate::utils::jwt::SessionClaims;

    pub(crate) const ADMIN_EMAIL: &str = "admin@university.edu";
    pub(crate) const MEMBER_EMAIL: &str = "student@university.edu";
    const SECRET: &str = "route-test-secret";

    pub(crate) fn auth_config() -> AuthConfig {
        AuthConfig {
            session_secret: SECRET.to_string(),
            allowed_email_domain: "@university.edu".to_string(),
            admin_emails: vec![ADMIN_EMAIL.to_string()],
        }
    }

    /// `Authorization` 请求头
    pub(crate) fn bearer(email: &str) -> (&'static str, String) {
        let now = chrono::Utc::now().timestamp();
        let claims = SessionClaims {
            sub: format!("idp|{email}"),
            email: email.to_string(),
            name: None,
            exp: (now + 600) as usize,
            iat: now as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        ("Authorization", format!("Bearer {token}"))
    }

    pub(crate) struct TestState {
        pub storage: Arc<dyn Storage>,
        pub fetcher: Arc<LmsFetcher>,
        pub feeds: Arc<FeedReader>,
    }

    impl TestState {
        /// 内存数据库 + 课程 101 可用、课程 202 不存在的 LMS
        pub(crate) async fn new() -> Self {
            Self::with_lms(week_one_lms()).await
        }

        pub(crate) async fn with_lms(lms: MockLms) -> Self {
            let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
            let fetcher = Arc::new(LmsFetcher::new(Arc::new(lms), &config()));
            let feeds = Arc::new(
                FeedReader::new(&FeedsConfig {
                    schedule_csv_url: String::new(),
                    calendar_ics_url: String::new(),
                    retention_days: DEFAULT_RETENTION_DAYS,
                    timeout_secs: 1,
                })
                .unwrap(),
            );
            Self {
                storage,
                fetcher,
                feeds,
            }
        }
    }

    pub(crate) async fn json_body<B: MessageBody>(resp: ServiceResponse<B>) -> serde_json::Value {
        test::read_body_json(resp).await
    }
}
