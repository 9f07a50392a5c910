//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod courses;
mod materials;
mod tasks;
mod topics;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{PortalError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::{info, warn};

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 使用全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(&config.database).await
    }

    /// 连接数据库并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        Migrator::up(&db, None)
            .await
            .map_err(|e| PortalError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| PortalError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        // 内存数据库不支持 WAL，且每个连接都是独立的库
        opt = if in_memory {
            opt.journal_mode(SqliteJournalMode::Memory)
        } else {
            opt.journal_mode(SqliteJournalMode::Wal)
                .pragma("wal_autocheckpoint", "1000")
        };

        let max_connections = if in_memory { 1 } else { config.pool_size };
        let mut pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout));
        pool = if in_memory {
            pool.idle_timeout(None).max_lifetime(None)
        } else {
            pool.idle_timeout(Duration::from_secs(300))
        };

        let pool = pool
            .connect_with(opt)
            .await
            .map_err(|e| PortalError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| PortalError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(PortalError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 写操作错误映射：唯一约束冲突 -> Conflict，其余 -> DatabaseOperation
///
/// 唯一约束只有课程代码一列；数据库原始信息只写日志，不返回给客户端。
pub(crate) fn map_write_err(err: DbErr, context: &str) -> PortalError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            warn!("{}: unique constraint violated: {}", context, detail);
            PortalError::conflict("Course code already exists")
        }
        _ => PortalError::database_operation(format!("{context}: {err}")),
    }
}

// Storage trait 实现
use crate::models::{
    courses::{
        entities::CustomCourse,
        requests::{CreateCourseRequest, UpdateCourseRequest},
    },
    materials::{
        entities::CustomMaterial,
        requests::{CreateMaterialRequest, UpdateMaterialRequest},
    },
    tasks::{
        entities::Task,
        requests::{CreateTaskRequest, TaskListQuery},
        responses::TaskListResponse,
    },
    topics::{entities::CustomTopic, requests::CreateTopicRequest},
};
use crate::storage::{CascadeSummary, Storage};
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 课程模块
    async fn create_course(&self, course: CreateCourseRequest) -> Result<CustomCourse> {
        self.create_course_impl(course).await
    }

    async fn get_course_by_id(&self, course_id: &str) -> Result<Option<CustomCourse>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn get_course_by_code(&self, course_code: &str) -> Result<Option<CustomCourse>> {
        self.get_course_by_code_impl(course_code).await
    }

    async fn list_courses(&self) -> Result<Vec<CustomCourse>> {
        self.list_courses_impl().await
    }

    async fn update_course(
        &self,
        course_id: &str,
        update: UpdateCourseRequest,
    ) -> Result<Option<CustomCourse>> {
        self.update_course_impl(course_id, update).await
    }

    async fn delete_course(&self, course_id: &str) -> Result<Option<CascadeSummary>> {
        self.delete_course_impl(course_id).await
    }

    // 主题模块
    async fn create_topic(&self, topic: CreateTopicRequest) -> Result<CustomTopic> {
        self.create_topic_impl(topic).await
    }

    async fn get_topic_by_id(&self, topic_id: &str) -> Result<Option<CustomTopic>> {
        self.get_topic_by_id_impl(topic_id).await
    }

    async fn list_topics_by_course(&self, course_id: &str) -> Result<Vec<CustomTopic>> {
        self.list_topics_by_course_impl(course_id).await
    }

    async fn delete_topic(&self, topic_id: &str) -> Result<Option<CascadeSummary>> {
        self.delete_topic_impl(topic_id).await
    }

    // 资料模块
    async fn create_material(&self, material: CreateMaterialRequest) -> Result<CustomMaterial> {
        self.create_material_impl(material).await
    }

    async fn get_material_by_id(&self, material_id: &str) -> Result<Option<CustomMaterial>> {
        self.get_material_by_id_impl(material_id).await
    }

    async fn list_materials_by_course(&self, course_id: &str) -> Result<Vec<CustomMaterial>> {
        self.list_materials_by_course_impl(course_id).await
    }

    async fn update_material(
        &self,
        material_id: &str,
        update: UpdateMaterialRequest,
    ) -> Result<Option<CustomMaterial>> {
        self.update_material_impl(material_id, update).await
    }

    async fn delete_material(&self, material_id: &str) -> Result<bool> {
        self.delete_material_impl(material_id).await
    }

    // 任务模块
    async fn create_task(&self, task: CreateTaskRequest) -> Result<Task> {
        self.create_task_impl(task).await
    }

    async fn get_task_by_id(&self, task_id: &str) -> Result<Option<Task>> {
        self.get_task_by_id_impl(task_id).await
    }

    async fn list_tasks_with_pagination(&self, query: TaskListQuery) -> Result<TaskListResponse> {
        self.list_tasks_with_pagination_impl(query).await
    }

    async fn delete_task(&self, task_id: &str) -> Result<bool> {
        self.delete_task_impl(task_id).await
    }
}
