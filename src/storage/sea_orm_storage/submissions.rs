//! 提交存储操作

use super::SeaOrmStorage;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{GradebookError, Result};
use crate::models::submissions::{entities::Submission, requests::CreateSubmissionRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QuerySelect, Set};

impl SeaOrmStorage {
    /// 创建提交
    pub async fn create_submission_impl(
        &self,
        student_id: i64,
        req: CreateSubmissionRequest,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            assignment_id: Set(req.assignment_id),
            student_id: Set(student_id),
            content: Set(req.content),
            submitted_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("创建提交失败: {e}")))?;

        Ok(result.into_submission())
    }

    /// 学生提交过的作业 ID（去重）
    pub async fn list_submitted_assignment_ids_impl(&self, student_id: i64) -> Result<Vec<i64>> {
        Submissions::find()
            .filter(Column::StudentId.eq(student_id))
            .select_only()
            .column(Column::AssignmentId)
            .distinct()
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询提交记录失败: {e}")))
    }
}
