//! 作业存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::errors::{GradebookError, Result};
use crate::models::assignments::{entities::Assignment, requests::CreateAssignmentRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

/// 未指定满分时的默认值
const DEFAULT_MAX_POINTS: f64 = 100.0;

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_assignment_impl(
        &self,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            class_id: Set(req.class_id),
            created_by: Set(created_by),
            title: Set(req.title),
            description: Set(req.description),
            max_points: Set(req.max_points.unwrap_or(DEFAULT_MAX_POINTS)),
            grade_category_id: Set(req.grade_category_id),
            due_date: Set(req.due_date.map(|d| d.timestamp())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 批量获取作业
    pub async fn list_assignments_by_ids_impl(
        &self,
        assignment_ids: &[i64],
    ) -> Result<Vec<Assignment>> {
        if assignment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Assignments::find()
            .filter(Column::Id.is_in(assignment_ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_assignment()).collect())
    }
}
