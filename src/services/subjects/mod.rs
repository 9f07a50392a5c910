pub mod create;
pub mod get;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::warn;

use crate::adapters::{subject_from_custom, subject_from_lms};
use crate::errors::Result;
use crate::lms::LmsFetcher;
use crate::models::courses::entities::CustomCourse;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::lms::LmsCourseBundle;
use crate::models::subjects::Subject;
use crate::storage::Storage;
use crate::utils::SubjectId;

pub struct SubjectService {
    storage: Option<Arc<dyn Storage>>,
    fetcher: Option<Arc<LmsFetcher>>,
}

impl SubjectService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            fetcher: None,
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_fetcher(&self, request: &HttpRequest) -> Arc<LmsFetcher> {
        if let Some(fetcher) = &self.fetcher {
            fetcher.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<LmsFetcher>>>()
                .expect("LMS fetcher not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 获取全部课程（自定义课程 + LMS 课程）
    pub async fn list_subjects(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_subjects(self, request).await
    }

    // 根据 ID 获取单门课程
    pub async fn get_subject(
        &self,
        request: &HttpRequest,
        subject_id: SubjectId,
    ) -> ActixResult<HttpResponse> {
        get::get_subject(self, request, subject_id).await
    }

    // 创建自定义课程，返回统一视图
    pub async fn create_subject(
        &self,
        request: &HttpRequest,
        course_data: CreateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_subject(self, request, course_data).await
    }
}

/// 读取自定义课程的主题与资料，组装成统一视图
pub(crate) async fn load_custom_subject(
    storage: &Arc<dyn Storage>,
    course: CustomCourse,
) -> Result<Subject> {
    let (topics, materials) = tokio::join!(
        storage.list_topics_by_course(&course.id),
        storage.list_materials_by_course(&course.id)
    );
    Ok(subject_from_custom(course, topics?, materials?))
}

/// LMS 课程 + 挂在该课程上的自定义主题与资料
///
/// 自定义部分读取失败时只记录日志，课程本身照常返回。
pub(crate) async fn assemble_lms_subject(
    storage: &Arc<dyn Storage>,
    fetcher: &LmsFetcher,
    bundle: LmsCourseBundle,
) -> Subject {
    let course_id = bundle.course.id.to_string();
    let (topics, materials) = tokio::join!(
        storage.list_topics_by_course(&course_id),
        storage.list_materials_by_course(&course_id)
    );

    let topics = topics.unwrap_or_else(|e| {
        warn!("Failed to load custom topics of LMS course {}: {}", course_id, e);
        Vec::new()
    });
    let materials = materials.unwrap_or_else(|e| {
        warn!(
            "Failed to load custom materials of LMS course {}: {}",
            course_id, e
        );
        Vec::new()
    });

    subject_from_lms(
        bundle,
        fetcher.term_override(&course_id),
        topics,
        materials,
        chrono::Utc::now(),
    )
}
