//! 作业通知状态实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notification_status")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub assignment_id: i64,
    pub class_id: i64,
    pub status: String,
    pub viewed_at: Option<i64>,
    pub submitted_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
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
    pub fn into_notification_status(
        self,
    ) -> crate::models::notifications::entities::NotificationStatus {
        use crate::models::notifications::entities::{NotificationState, NotificationStatus};
        use chrono::{DateTime, Utc};

        NotificationStatus {
            id: self.id,
            student_id: self.student_id,
            assignment_id: self.assignment_id,
            class_id: self.class_id,
            status: self
                .status
                .parse::<NotificationState>()
                .unwrap_or(NotificationState::New),
            viewed_at: self
                .viewed_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            submitted_at: self
                .submitted_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
