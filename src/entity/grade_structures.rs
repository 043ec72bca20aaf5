//! 评分结构实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grade_structures")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_id: i64,
    pub teacher_id: i64,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub total_points: f64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::grade_categories::Entity")]
    Categories,
}

impl Related<super::grade_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型，类别按 sort_order 排列
impl Model {
    pub fn into_grade_structure(
        self,
        mut categories: Vec<super::grade_categories::Model>,
    ) -> crate::models::grade_structures::entities::GradeStructure {
        use crate::models::grade_structures::entities::GradeStructure;
        use chrono::{DateTime, Utc};

        categories.sort_by_key(|c| (c.sort_order, c.id));

        GradeStructure {
            id: self.id,
            class_id: self.class_id,
            teacher_id: self.teacher_id,
            name: self.name,
            description: self.description,
            total_points: self.total_points,
            categories: categories
                .into_iter()
                .map(|c| c.into_grade_category())
                .collect(),
            is_active: self.is_active,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
