use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建自定义课程表
        manager
            .create_table(
                Table::create()
                    .table(CustomCourses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CustomCourses::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CustomCourses::CourseCode)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(CustomCourses::Title).string().not_null())
                    .col(ColumnDef::new(CustomCourses::Year).integer().not_null())
                    .col(ColumnDef::new(CustomCourses::Semester).integer().not_null())
                    .col(ColumnDef::new(CustomCourses::ImageUrl).string().null())
                    .col(ColumnDef::new(CustomCourses::SyllabusUrl).string().null())
                    .col(
                        ColumnDef::new(CustomCourses::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CustomCourses::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建自定义主题表
        // course_id 既可能是自定义课程 ID，也可能是 LMS 课程 ID，因此不建外键
        manager
            .create_table(
                Table::create()
                    .table(CustomTopics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CustomTopics::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CustomTopics::CourseId).string().not_null())
                    .col(ColumnDef::new(CustomTopics::Title).string().not_null())
                    .col(ColumnDef::new(CustomTopics::Schedule).string().null())
                    .col(ColumnDef::new(CustomTopics::Category).string().null())
                    .col(
                        ColumnDef::new(CustomTopics::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CustomTopics::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CustomTopics::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建自定义资料表
        manager
            .create_table(
                Table::create()
                    .table(CustomMaterials::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CustomMaterials::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CustomMaterials::CourseId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CustomMaterials::TopicId).string().not_null())
                    .col(ColumnDef::new(CustomMaterials::Title).string().not_null())
                    .col(ColumnDef::new(CustomMaterials::ItemType).string().not_null())
                    .col(ColumnDef::new(CustomMaterials::Url).string().null())
                    .col(ColumnDef::new(CustomMaterials::HtmlContent).text().null())
                    .col(
                        ColumnDef::new(CustomMaterials::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CustomMaterials::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建任务表（作业 / 考试）
        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tasks::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tasks::TaskType).string().not_null())
                    .col(ColumnDef::new(Tasks::CourseCode).string().not_null())
                    .col(ColumnDef::new(Tasks::Title).string().not_null())
                    .col(ColumnDef::new(Tasks::Deadline).big_integer().not_null())
                    .col(ColumnDef::new(Tasks::Resources).text().not_null())
                    .col(ColumnDef::new(Tasks::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Tasks::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_custom_topics_course_id")
                    .table(CustomTopics::Table)
                    .col(CustomTopics::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_custom_materials_course_id")
                    .table(CustomMaterials::Table)
                    .col(CustomMaterials::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_custom_materials_topic_id")
                    .table(CustomMaterials::Table)
                    .col(CustomMaterials::TopicId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tasks_deadline")
                    .table(Tasks::Table)
                    .col(Tasks::Deadline)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CustomMaterials::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CustomTopics::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CustomCourses::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum CustomCourses {
    #[sea_orm(iden = "custom_courses")]
    Table,
    Id,
    CourseCode,
    Title,
    Year,
    Semester,
    ImageUrl,
    SyllabusUrl,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CustomTopics {
    #[sea_orm(iden = "custom_topics")]
    Table,
    Id,
    CourseId,
    Title,
    Schedule,
    Category,
    Position,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CustomMaterials {
    #[sea_orm(iden = "custom_materials")]
    Table,
    Id,
    CourseId,
    TopicId,
    Title,
    ItemType,
    Url,
    HtmlContent,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Tasks {
    #[sea_orm(iden = "tasks")]
    Table,
    Id,
    TaskType,
    CourseCode,
    Title,
    Deadline,
    Resources,
    CreatedAt,
    UpdatedAt,
}
