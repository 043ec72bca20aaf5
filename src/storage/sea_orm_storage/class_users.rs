//! 班级用户关联存储操作

use super::SeaOrmStorage;
use crate::entity::class_users::{ActiveModel, Column, Entity as ClassUsers};
use crate::errors::{GradebookError, Result};
use crate::models::classes::entities::{ClassUser, ClassUserRole};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};

impl SeaOrmStorage {
    /// 加入班级
    pub async fn join_class_impl(
        &self,
        user_id: i64,
        class_id: i64,
        role: ClassUserRole,
    ) -> Result<ClassUser> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            class_id: Set(class_id),
            user_id: Set(user_id),
            role: Set(role.to_string()),
            joined_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("加入班级失败: {e}")))?;

        Ok(result.into_class_user())
    }

    /// 获取用户在班级中的信息
    pub async fn get_class_user_by_user_id_and_class_id_impl(
        &self,
        user_id: i64,
        class_id: i64,
    ) -> Result<Option<ClassUser>> {
        let result = ClassUsers::find()
            .filter(
                Condition::all()
                    .add(Column::UserId.eq(user_id))
                    .add(Column::ClassId.eq(class_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询班级用户失败: {e}")))?;

        Ok(result.map(|m| m.into_class_user()))
    }

    /// 列出班级学生 ID（按加入顺序）
    pub async fn list_class_student_ids_impl(&self, class_id: i64) -> Result<Vec<i64>> {
        ClassUsers::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::Role.eq(ClassUserRole::Student.to_string()))
            .order_by_asc(Column::Id)
            .select_only()
            .column(Column::UserId)
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询班级学生失败: {e}")))
    }
}
