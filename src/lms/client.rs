use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::LmsApi;
use crate::config::LmsConfig;
use crate::errors::{PortalError, Result};
use crate::models::lms::{LmsCourse, LmsFile, LmsModule, LmsModuleItem, LmsPage};

const PER_PAGE: &str = "100";

/// 基于 reqwest 的 LMS REST 客户端
#[derive(Clone)]
pub struct LmsClient {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl LmsClient {
    pub fn new(config: &LmsConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PortalError::upstream(format!("Failed to build LMS client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T> {
        let res = self
            .client
            .get(url)
            .header(USER_AGENT, "rust-course-portal/0.0.1")
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", self.api_token))
            .query(query)
            .send()
            .await?;

        let status = res.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(PortalError::not_found(format!("LMS resource not found: {url}")));
        }
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(PortalError::upstream(format!(
                "LMS HTTP {status} for {url}: {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        res.json::<T>()
            .await
            .map_err(|e| PortalError::upstream(format!("Invalid LMS response from {url}: {e}")))
    }
}

#[async_trait::async_trait]
impl LmsApi for LmsClient {
    #[instrument(level = "debug", skip(self))]
    async fn get_course(&self, course_id: &str) -> Result<LmsCourse> {
        let url = self.api_url(&format!("/courses/{course_id}"));
        self.get_json(&url, &[("include[]", "term"), ("include[]", "syllabus_body")])
            .await
    }

    #[instrument(level = "debug", skip(self))]
    async fn list_modules(&self, course_id: &str) -> Result<Vec<LmsModule>> {
        let url = self.api_url(&format!("/courses/{course_id}/modules"));
        let modules: Vec<LmsModule> = self.get_json(&url, &[("per_page", PER_PAGE)]).await?;
        debug!("Course {} has {} modules", course_id, modules.len());
        Ok(modules)
    }

    #[instrument(level = "debug", skip(self))]
    async fn list_module_items(
        &self,
        course_id: &str,
        module_id: i64,
    ) -> Result<Vec<LmsModuleItem>> {
        let url = self.api_url(&format!("/courses/{course_id}/modules/{module_id}/items"));
        self.get_json(
            &url,
            &[("per_page", PER_PAGE), ("include[]", "content_details")],
        )
        .await
    }

    #[instrument(level = "debug", skip(self))]
    async fn get_page(&self, course_id: &str, page_url: &str) -> Result<LmsPage> {
        let url = self.api_url(&format!("/courses/{course_id}/pages/{page_url}"));
        self.get_json(&url, &[]).await
    }

    #[instrument(level = "debug", skip(self))]
    async fn resolve_file(&self, api_url: &str) -> Result<LmsFile> {
        // 条目中的 url 已是完整的 API 地址
        self.get_json(api_url, &[]).await
    }
}
