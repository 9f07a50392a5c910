use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CustomCourse {
    // 课程ID（UUID）
    pub id: String,
    // 课程代码，全局唯一
    pub course_code: String,
    // 课程名称
    pub title: String,
    // 学年
    pub year: i32,
    // 学期
    pub semester: i32,
    // 封面图片
    pub image_url: Option<String>,
    // 外部课程大纲链接
    pub syllabus_url: Option<String>,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
