use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 评分结构表 ====================
        manager
            .create_table(
                Table::create()
                    .table(GradeStructures::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GradeStructures::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GradeStructures::ClassId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GradeStructures::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GradeStructures::Name).string().not_null())
                    .col(ColumnDef::new(GradeStructures::Description).text().null())
                    .col(
                        ColumnDef::new(GradeStructures::TotalPoints)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GradeStructures::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(GradeStructures::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GradeStructures::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 评分类别表 ====================
        manager
            .create_table(
                Table::create()
                    .table(GradeCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GradeCategories::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GradeCategories::StructureId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GradeCategories::Name).string().not_null())
                    .col(ColumnDef::new(GradeCategories::Weight).double().not_null())
                    .col(
                        ColumnDef::new(GradeCategories::MaxPoints)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GradeCategories::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(GradeCategories::Table, GradeCategories::StructureId)
                            .to(GradeStructures::Table, GradeStructures::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 作业成绩表 ====================
        manager
            .create_table(
                Table::create()
                    .table(AssignmentGrades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AssignmentGrades::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AssignmentGrades::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentGrades::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentGrades::ClassId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentGrades::GradeCategoryId)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(AssignmentGrades::Points).double().not_null())
                    .col(
                        ColumnDef::new(AssignmentGrades::MaxPoints)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentGrades::Percentage)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AssignmentGrades::Feedback).text().null())
                    .col(
                        ColumnDef::new(AssignmentGrades::GradedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentGrades::GradedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AssignmentGrades::Table, AssignmentGrades::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 通知状态表 ====================
        manager
            .create_table(
                Table::create()
                    .table(NotificationStatus::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NotificationStatus::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(NotificationStatus::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NotificationStatus::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NotificationStatus::ClassId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NotificationStatus::Status)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NotificationStatus::ViewedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(NotificationStatus::SubmittedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(NotificationStatus::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NotificationStatus::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 索引 ====================
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_grade_structures_class_id")
                    .table(GradeStructures::Table)
                    .col(GradeStructures::ClassId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_grade_categories_structure_id")
                    .table(GradeCategories::Table)
                    .col(GradeCategories::StructureId)
                    .to_owned(),
            )
            .await?;

        // 同一学生同一作业只保留一条成绩（重新评分即覆盖）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assignment_grades_assignment_student")
                    .table(AssignmentGrades::Table)
                    .col(AssignmentGrades::AssignmentId)
                    .col(AssignmentGrades::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assignment_grades_student_class")
                    .table(AssignmentGrades::Table)
                    .col(AssignmentGrades::StudentId)
                    .col(AssignmentGrades::ClassId)
                    .to_owned(),
            )
            .await?;

        // 通知状态按 (学生, 作业) 唯一，保证批量创建可重入
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_notification_status_student_assignment")
                    .table(NotificationStatus::Table)
                    .col(NotificationStatus::StudentId)
                    .col(NotificationStatus::AssignmentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_notification_status_created_at")
                    .table(NotificationStatus::Table)
                    .col(NotificationStatus::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NotificationStatus::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AssignmentGrades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GradeCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GradeStructures::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Assignments {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum GradeStructures {
    Table,
    Id,
    ClassId,
    TeacherId,
    Name,
    Description,
    TotalPoints,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum GradeCategories {
    Table,
    Id,
    StructureId,
    Name,
    Weight,
    MaxPoints,
    SortOrder,
}

#[derive(DeriveIden)]
enum AssignmentGrades {
    Table,
    Id,
    AssignmentId,
    StudentId,
    ClassId,
    GradeCategoryId,
    Points,
    MaxPoints,
    Percentage,
    Feedback,
    GradedBy,
    GradedAt,
}

#[derive(DeriveIden)]
enum NotificationStatus {
    Table,
    Id,
    StudentId,
    AssignmentId,
    ClassId,
    Status,
    ViewedAt,
    SubmittedAt,
    CreatedAt,
    UpdatedAt,
}
