pub mod create;
pub mod delete;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::topics::requests::CreateTopicRequest;
use crate::storage::Storage;

pub struct TopicService {
    storage: Option<Arc<dyn Storage>>,
}

impl TopicService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
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

    pub async fn create_topic(
        &self,
        req: &HttpRequest,
        topic_data: CreateTopicRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_topic(self, req, topic_data).await
    }

    // 删除主题及其资料
    pub async fn delete_topic(
        &self,
        req: &HttpRequest,
        topic_id: String,
    ) -> ActixResult<HttpResponse> {
        delete::delete_topic(self, req, topic_id).await
    }
}
