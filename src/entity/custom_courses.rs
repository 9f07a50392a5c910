//! 自定义课程实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "custom_courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub course_code: String,
    pub title: String,
    pub year: i32,
    pub semester: i32,
    pub image_url: Option<String>,
    pub syllabus_url: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

// 主题与资料通过字符串 ID 松散关联，不声明数据库关系
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_course(self) -> crate::models::courses::entities::CustomCourse {
        use crate::models::courses::entities::CustomCourse;

        CustomCourse {
            id: self.id,
            course_code: self.course_code,
            title: self.title,
            year: self.year,
            semester: self.semester,
            image_url: self.image_url,
            syllabus_url: self.syllabus_url,
            created_at: super::from_timestamp(self.created_at),
            updated_at: super::from_timestamp(self.updated_at),
        }
    }
}
