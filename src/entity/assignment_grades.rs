//! 作业成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignment_grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub class_id: i64,
    pub grade_category_id: Option<i64>,
    pub points: f64,
    pub max_points: f64,
    pub percentage: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,
    pub graded_by: i64,
    pub graded_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id"
    )]
    Assignment,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_assignment_grade(self) -> crate::models::grades::entities::AssignmentGrade {
        use crate::models::grades::entities::AssignmentGrade;
        use chrono::{DateTime, Utc};

        AssignmentGrade {
            id: self.id,
            assignment_id: self.assignment_id,
            student_id: self.student_id,
            class_id: self.class_id,
            grade_category_id: self.grade_category_id,
            points: self.points,
            max_points: self.max_points,
            percentage: self.percentage,
            feedback: self.feedback,
            graded_by: self.graded_by,
            graded_at: DateTime::<Utc>::from_timestamp(self.graded_at, 0).unwrap_or_default(),
        }
    }
}
