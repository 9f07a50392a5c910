use serde::Deserialize;
use ts_rs::TS;

use crate::utils::validate::{validate_course_code, validate_semester, validate_title, validate_year};

// 创建课程时附带的初始主题
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct InitialTopic {
    pub title: String,
}

// 创建课程请求
//
// year / semester 不填写时使用当前年份与第 1 学期
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CreateCourseRequest {
    pub course_code: String,
    pub title: String,
    pub year: Option<i32>,
    pub semester: Option<i32>,
    pub image_url: Option<String>,
    pub syllabus_url: Option<String>,
    #[serde(default)]
    pub topics: Vec<InitialTopic>,
}

impl CreateCourseRequest {
    /// 校验并规范化请求字段
    pub fn validate(mut self) -> Result<Self, String> {
        self.course_code = validate_course_code(&self.course_code)?;
        self.title = validate_title(&self.title)?;
        if let Some(year) = self.year {
            validate_year(year)?;
        }
        if let Some(semester) = self.semester {
            validate_semester(semester)?;
        }
        for topic in &mut self.topics {
            topic.title = validate_title(&topic.title)?;
        }
        Ok(self)
    }
}

// 更新课程请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct UpdateCourseRequest {
    pub course_code: Option<String>,
    pub title: Option<String>,
    pub year: Option<i32>,
    pub semester: Option<i32>,
    pub image_url: Option<String>,
    pub syllabus_url: Option<String>,
}

impl UpdateCourseRequest {
    pub fn validate(mut self) -> Result<Self, String> {
        if let Some(code) = &self.course_code {
            self.course_code = Some(validate_course_code(code)?);
        }
        if let Some(title) = &self.title {
            self.title = Some(validate_title(title)?);
        }
        if let Some(year) = self.year {
            validate_year(year)?;
        }
        if let Some(semester) = self.semester {
            validate_semester(semester)?;
        }
        Ok(self)
    }
}
