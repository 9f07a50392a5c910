//! 自定义资料实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "custom_materials")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub course_id: String,
    pub topic_id: String,
    pub title: String,
    pub item_type: String,
    pub url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub html_content: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_material(
        self,
    ) -> crate::errors::Result<crate::models::materials::entities::CustomMaterial> {
        use crate::errors::PortalError;
        use crate::models::materials::entities::{CustomMaterial, MaterialItem, MaterialType};

        let item_type = self
            .item_type
            .parse::<MaterialType>()
            .map_err(PortalError::serialization)?;

        Ok(CustomMaterial {
            id: self.id,
            course_id: self.course_id,
            topic_id: self.topic_id,
            item: MaterialItem {
                title: self.title,
                item_type,
                url: self.url,
                html_content: self.html_content,
            },
            created_at: super::from_timestamp(self.created_at),
            updated_at: super::from_timestamp(self.updated_at),
        })
    }
}
