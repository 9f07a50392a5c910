//! 预导入模块，方便使用

pub use super::custom_courses::{
    ActiveModel as CustomCourseActiveModel, Entity as CustomCourses, Model as CustomCourseModel,
};
pub use super::custom_materials::{
    ActiveModel as CustomMaterialActiveModel, Entity as CustomMaterials,
    Model as CustomMaterialModel,
};
pub use super::custom_topics::{
    ActiveModel as CustomTopicActiveModel, Entity as CustomTopics, Model as CustomTopicModel,
};
pub use super::tasks::{ActiveModel as TaskActiveModel, Entity as Tasks, Model as TaskModel};
