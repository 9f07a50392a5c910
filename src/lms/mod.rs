//! LMS 远程课程数据获取
//!
//! `LmsApi` 是与 LMS 交互的唯一接缝，生产环境使用 [`LmsClient`]，测试中替换为内存实现。
//! [`LmsFetcher`] 负责把课程、模块、条目以及页面内嵌文件聚合成一个 [`LmsCourseBundle`]。
//!
//! [`LmsCourseBundle`]: crate::models::lms::LmsCourseBundle

pub mod batch;
mod client;
mod fetcher;
pub mod page_files;

pub use batch::{BatchOutcome, buffered_ordered, run_batch};
pub use client::LmsClient;
pub use fetcher::LmsFetcher;

#[cfg(test)]
pub(crate) use fetcher::tests as mock;

use crate::errors::Result;
use crate::models::lms::{LmsCourse, LmsFile, LmsModule, LmsModuleItem, LmsPage};

#[async_trait::async_trait]
pub trait LmsApi: Send + Sync {
    // 课程元数据（含学期与大纲）
    async fn get_course(&self, course_id: &str) -> Result<LmsCourse>;
    // 课程模块列表
    async fn list_modules(&self, course_id: &str) -> Result<Vec<LmsModule>>;
    // 模块下的条目
    async fn list_module_items(&self, course_id: &str, module_id: i64)
    -> Result<Vec<LmsModuleItem>>;
    // 页面正文
    async fn get_page(&self, course_id: &str, page_url: &str) -> Result<LmsPage>;
    // 将 File 条目的间接地址解析为下载地址
    async fn resolve_file(&self, api_url: &str) -> Result<LmsFile>;
}
