use std::collections::HashMap;
use std::sync::Arc;

use tracing::{instrument, warn};

use super::LmsApi;
use super::batch::{BatchOutcome, buffered_ordered, run_batch};
use super::page_files::extract_embedded_files;
use crate::config::{LmsConfig, TermOverride};
use crate::errors::Result;
use crate::models::lms::{
    BatchFailure, LmsCourseBundle, LmsItemKind, LmsModuleItem, ResolvedItem, ResolvedModule,
};

/// 聚合 LMS 课程数据，每次请求都会重新获取
pub struct LmsFetcher {
    api: Arc<dyn LmsApi>,
    base_url: String,
    course_ids: Vec<String>,
    terms: HashMap<String, TermOverride>,
    max_concurrency: usize,
    file_link_class: String,
}

impl LmsFetcher {
    pub fn new(api: Arc<dyn LmsApi>, config: &LmsConfig) -> Self {
        Self {
            api,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            course_ids: config.course_ids.clone(),
            terms: config.terms.clone(),
            max_concurrency: config.max_concurrency.max(1),
            file_link_class: config.file_link_class.clone(),
        }
    }

    /// 门户展示的 LMS 课程（按配置顺序）
    pub fn course_ids(&self) -> &[String] {
        &self.course_ids
    }

    pub fn is_configured(&self, course_id: &str) -> bool {
        self.course_ids.iter().any(|id| id == course_id)
    }

    pub fn term_override(&self, course_id: &str) -> Option<TermOverride> {
        self.terms.get(course_id).copied()
    }

    /// 获取单门课程的完整数据
    ///
    /// 课程元数据是必需的，失败时直接返回错误；其余请求失败只降级并记录在 `failures` 中。
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch_course(&self, course_id: &str) -> Result<LmsCourseBundle> {
        let (course, modules) = tokio::join!(
            self.api.get_course(course_id),
            self.api.list_modules(course_id)
        );
        let course = course?;

        let mut failures = Vec::new();
        let modules = match modules {
            Ok(modules) => modules,
            Err(e) => {
                warn!("Failed to list modules of course {}: {}", course_id, e);
                failures.push(BatchFailure {
                    key: format!("course:{course_id}/modules"),
                    message: e.to_string(),
                });
                Vec::new()
            }
        };

        let module_items = buffered_ordered(modules.iter(), self.max_concurrency, |module| {
            self.api.list_module_items(course_id, module.id)
        })
        .await;

        // 展平所有条目，统一做二次请求
        let mut flat: Vec<(usize, LmsModuleItem)> = Vec::new();
        for (index, (module, items)) in modules.iter().zip(module_items).enumerate() {
            match items {
                Ok(items) => flat.extend(items.into_iter().map(|item| (index, item))),
                Err(e) => {
                    warn!("Failed to list items of module {}: {}", module.id, e);
                    failures.push(BatchFailure {
                        key: format!("module:{}", module.id),
                        message: e.to_string(),
                    });
                }
            }
        }

        let resolved = buffered_ordered(flat, self.max_concurrency, |(index, item)| async move {
            (index, self.resolve_item(course_id, item).await)
        })
        .await;

        let mut grouped: Vec<Vec<ResolvedItem>> = modules.iter().map(|_| Vec::new()).collect();
        for (index, (item, failure)) in resolved {
            if let Some(failure) = failure {
                failures.push(failure);
            }
            grouped[index].push(item);
        }

        let modules = modules
            .into_iter()
            .zip(grouped)
            .map(|(module, items)| ResolvedModule { module, items })
            .collect();

        let syllabus_url = course
            .syllabus_body
            .as_deref()
            .filter(|body| !body.trim().is_empty())
            .map(|_| format!("{}/courses/{}/assignments/syllabus", self.base_url, course.id));

        Ok(LmsCourseBundle {
            course,
            modules,
            syllabus_url,
            failures,
        })
    }

    /// 获取多门课程，单门失败不影响其他课程
    pub async fn fetch_courses(&self, course_ids: &[String]) -> BatchOutcome<LmsCourseBundle> {
        let outcome = run_batch(course_ids.to_vec(), self.max_concurrency, |id| async move {
            self.fetch_course(&id).await
        })
        .await;

        for failure in &outcome.failed {
            warn!("Skipping LMS course {}: {}", failure.key, failure.message);
        }
        outcome
    }

    // Page 条目提取内嵌文件，File 条目解析下载地址
    async fn resolve_item(
        &self,
        course_id: &str,
        item: LmsModuleItem,
    ) -> (ResolvedItem, Option<BatchFailure>) {
        let mut resolved = ResolvedItem::new(item);
        let key = format!("item:{}", resolved.item.id);

        let failure = match resolved.item.kind {
            LmsItemKind::Page => match resolved.item.page_url.as_deref() {
                Some(page_url) => match self.api.get_page(course_id, page_url).await {
                    Ok(page) => {
                        resolved.embedded_files = extract_embedded_files(
                            page.body.as_deref().unwrap_or_default(),
                            &self.file_link_class,
                        );
                        None
                    }
                    Err(e) => Some(e),
                },
                None => None,
            },
            LmsItemKind::File => match resolved.item.url.as_deref() {
                Some(api_url) => match self.api.resolve_file(api_url).await {
                    Ok(file) => {
                        resolved.resolved_url = Some(file.url);
                        None
                    }
                    Err(e) => Some(e),
                },
                None => None,
            },
            _ => None,
        };

        let failure = failure.map(|e| {
            warn!("Degrading {} of course {}: {}", key, course_id, e);
            BatchFailure {
                key,
                message: e.to_string(),
            }
        });

        (resolved, failure)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::errors::PortalError;
    use crate::models::lms::{LmsCourse, LmsFile, LmsModule, LmsPage, LmsTerm};
    use std::collections::HashSet;

    /// 内存中的 LMS，用于测试
    #[derive(Default)]
    pub(crate) struct MockLms {
        pub courses: HashMap<String, LmsCourse>,
        pub modules: HashMap<String, Vec<LmsModule>>,
        pub items: HashMap<i64, Vec<LmsModuleItem>>,
        pub pages: HashMap<String, String>,
        pub files: HashMap<String, String>,
        pub failing_modules: HashSet<String>,
    }

    #[async_trait::async_trait]
    impl LmsApi for MockLms {
        async fn get_course(&self, course_id: &str) -> Result<LmsCourse> {
            self.courses
                .get(course_id)
                .cloned()
                .ok_or_else(|| PortalError::not_found(format!("course {course_id}")))
        }

        async fn list_modules(&self, course_id: &str) -> Result<Vec<LmsModule>> {
            if self.failing_modules.contains(course_id) {
                return Err(PortalError::upstream("LMS HTTP 503"));
            }
            Ok(self.modules.get(course_id).cloned().unwrap_or_default())
        }

        async fn list_module_items(
            &self,
            _course_id: &str,
            module_id: i64,
        ) -> Result<Vec<LmsModuleItem>> {
            Ok(self.items.get(&module_id).cloned().unwrap_or_default())
        }

        async fn get_page(&self, _course_id: &str, page_url: &str) -> Result<LmsPage> {
            self.pages
                .get(page_url)
                .map(|body| LmsPage {
                    body: Some(body.clone()),
                })
                .ok_or_else(|| PortalError::upstream(format!("page {page_url} timed out")))
        }

        async fn resolve_file(&self, api_url: &str) -> Result<LmsFile> {
            self.files
                .get(api_url)
                .map(|url| LmsFile {
                    id: 1,
                    display_name: "file".to_string(),
                    url: url.clone(),
                })
                .ok_or_else(|| PortalError::upstream(format!("file {api_url} timed out")))
        }
    }

    pub(crate) fn course(id: i64, code: &str, term: &str) -> LmsCourse {
        LmsCourse {
            id,
            name: format!("{code} Course"),
            course_code: code.to_string(),
            term: Some(LmsTerm {
                name: Some(term.to_string()),
            }),
            image_download_url: None,
            syllabus_body: None,
        }
    }

    pub(crate) fn module(id: i64, name: &str) -> LmsModule {
        LmsModule {
            id,
            name: name.to_string(),
            position: id,
            unlock_at: None,
        }
    }

    pub(crate) fn item(id: i64, title: &str, kind: LmsItemKind) -> LmsModuleItem {
        LmsModuleItem {
            id,
            title: title.to_string(),
            kind,
            html_url: Some(format!("https://lms.example.edu/items/{id}")),
            url: None,
            page_url: None,
            external_url: None,
            content_details: None,
        }
    }

    pub(crate) fn config() -> LmsConfig {
        LmsConfig {
            base_url: "https://lms.example.edu/".to_string(),
            api_token: String::new(),
            course_ids: vec!["101".to_string(), "202".to_string()],
            timeout_secs: 5,
            max_concurrency: 2,
            file_link_class: "instructure_file_link".to_string(),
            terms: HashMap::new(),
        }
    }

    pub(crate) fn week_one_lms() -> MockLms {
        let mut lms = MockLms::default();
        lms.courses
            .insert("101".to_string(), course(101, "COMP1010", "2025 Semester 2"));
        lms.modules
            .insert("101".to_string(), vec![module(1, "Week 1"), module(2, "Week 2")]);

        let mut page = item(11, "Readings", LmsItemKind::Page);
        page.page_url = Some("readings".to_string());
        let mut file = item(12, "Lecture.pdf", LmsItemKind::File);
        file.url = Some("https://lms.example.edu/api/v1/courses/101/files/5".to_string());
        lms.items.insert(1, vec![page, file]);
        lms.items
            .insert(2, vec![item(21, "Quiz 1", LmsItemKind::Quiz)]);

        lms.pages.insert(
            "readings".to_string(),
            r#"<a class="instructure_file_link" title="a.pdf" href="https://files/a">a</a>
               <a class="instructure_file_link" title="b.pptx" href="https://files/b">b</a>"#
                .to_string(),
        );
        lms.files.insert(
            "https://lms.example.edu/api/v1/courses/101/files/5".to_string(),
            "https://files/lecture".to_string(),
        );
        lms
    }

    #[tokio::test]
    async fn test_fetch_course_resolves_pages_and_files() {
        let fetcher = LmsFetcher::new(Arc::new(week_one_lms()), &config());
        let bundle = fetcher.fetch_course("101").await.unwrap();

        assert!(bundle.failures.is_empty());
        assert_eq!(bundle.modules.len(), 2);
        assert_eq!(bundle.modules[0].module.name, "Week 1");

        let week_one = &bundle.modules[0].items;
        assert_eq!(week_one[0].embedded_files.len(), 2);
        assert_eq!(week_one[0].embedded_files[1].url, "https://files/b");
        assert_eq!(week_one[1].file_url(), Some("https://files/lecture"));
        assert_eq!(bundle.modules[1].items.len(), 1);
    }

    #[tokio::test]
    async fn test_secondary_failures_degrade() {
        let mut lms = week_one_lms();
        lms.pages.clear();
        lms.files.clear();
        let fetcher = LmsFetcher::new(Arc::new(lms), &config());

        let bundle = fetcher.fetch_course("101").await.unwrap();
        let keys: Vec<_> = bundle.failures.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["item:11", "item:12"]);

        let week_one = &bundle.modules[0].items;
        assert!(week_one[0].embedded_files.is_empty());
        // 解析失败时保留间接地址
        assert_eq!(
            week_one[1].file_url(),
            Some("https://lms.example.edu/api/v1/courses/101/files/5")
        );
    }

    #[tokio::test]
    async fn test_module_list_failure_degrades_to_empty() {
        let mut lms = week_one_lms();
        lms.failing_modules.insert("101".to_string());
        let fetcher = LmsFetcher::new(Arc::new(lms), &config());

        let bundle = fetcher.fetch_course("101").await.unwrap();
        assert!(bundle.modules.is_empty());
        assert_eq!(bundle.failures.len(), 1);
        assert_eq!(bundle.failures[0].key, "course:101/modules");
    }

    #[tokio::test]
    async fn test_missing_course_metadata_fails() {
        let fetcher = LmsFetcher::new(Arc::new(week_one_lms()), &config());
        let err = fetcher.fetch_course("999").await.unwrap_err();
        assert_eq!(err.http_status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_fetch_courses_keeps_order_and_failures() {
        let mut lms = week_one_lms();
        lms.courses
            .insert("303".to_string(), course(303, "MATH2000", "2026 S1"));
        let fetcher = LmsFetcher::new(Arc::new(lms), &config());

        let ids = vec!["303".to_string(), "999".to_string(), "101".to_string()];
        let outcome = fetcher.fetch_courses(&ids).await;
        let codes: Vec<_> = outcome
            .succeeded
            .iter()
            .map(|b| b.course.course_code.as_str())
            .collect();
        assert_eq!(codes, vec!["MATH2000", "COMP1010"]);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].key, "999");
    }

    #[tokio::test]
    async fn test_syllabus_url_only_when_body_present() {
        let mut lms = week_one_lms();
        if let Some(c) = lms.courses.get_mut("101") {
            c.syllabus_body = Some("<p>Outline</p>".to_string());
        }
        let fetcher = LmsFetcher::new(Arc::new(lms), &config());
        let bundle = fetcher.fetch_course("101").await.unwrap();
        assert_eq!(
            bundle.syllabus_url.as_deref(),
            Some("https://lms.example.edu/courses/101/assignments/syllabus")
        );
    }
}
