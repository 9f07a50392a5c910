pub mod calendar;
pub mod schedule;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;
use std::sync::Arc;

use crate::feeds::FeedReader;

pub struct FeedService {
    reader: Option<Arc<FeedReader>>,
}

impl FeedService {
    pub fn new_lazy() -> Self {
        Self { reader: None }
    }

    pub(crate) fn get_reader(&self, request: &HttpRequest) -> Arc<FeedReader> {
        if let Some(reader) = &self.reader {
            reader.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<FeedReader>>>()
                .expect("Feed reader not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 保留窗口以服务器本地日期为准
    pub(crate) fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }

    pub async fn get_schedule(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        schedule::get_schedule(self, request).await
    }

    pub async fn get_calendar(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        calendar::get_calendar(self, request).await
    }
}
