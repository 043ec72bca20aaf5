//! 评分类别实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grade_categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub structure_id: i64,
    pub name: String,
    pub weight: f64,
    pub max_points: f64,
    pub sort_order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::grade_structures::Entity",
        from = "Column::StructureId",
        to = "super::grade_structures::Column::Id"
    )]
    Structure,
}

impl Related<super::grade_structures::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Structure.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_grade_category(self) -> crate::models::grade_structures::entities::GradeCategory {
        crate::models::grade_structures::entities::GradeCategory {
            id: self.id,
            name: self.name,
            weight: self.weight,
            max_points: self.max_points,
            order: self.sort_order,
        }
    }
}
