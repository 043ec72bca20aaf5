//! 作业通知状态存储操作
//!
//! 状态只会前进：new → viewed → submitted。
//! 每个 (student_id, assignment_id) 只有一行，由唯一索引保证。

use super::SeaOrmStorage;
use crate::entity::notification_status::{ActiveModel, Column, Entity as NotificationStatuses};
use crate::errors::{GradebookError, Result};
use crate::models::notifications::{
    entities::{NotificationState, NotificationStatus},
    responses::FanOutReport,
};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::warn;

fn student_assignment(student_id: i64, assignment_id: i64) -> Condition {
    Condition::all()
        .add(Column::StudentId.eq(student_id))
        .add(Column::AssignmentId.eq(assignment_id))
}

fn on_student_assignment() -> OnConflict {
    OnConflict::columns([Column::StudentId, Column::AssignmentId])
}

impl SeaOrmStorage {
    /// 为新作业批量创建 new 状态
    ///
    /// 逐个插入，已存在的行被唯一索引跳过；单个学生失败只记录日志。
    pub async fn create_notification_statuses_impl(
        &self,
        assignment_id: i64,
        class_id: i64,
        student_ids: &[i64],
    ) -> Result<FanOutReport> {
        let now = chrono::Utc::now().timestamp();
        let mut report = FanOutReport::default();

        for &student_id in student_ids {
            let model = ActiveModel {
                student_id: Set(student_id),
                assignment_id: Set(assignment_id),
                class_id: Set(class_id),
                status: Set(NotificationState::New.to_string()),
                viewed_at: Set(None),
                submitted_at: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };

            match NotificationStatuses::insert(model)
                .on_conflict(on_student_assignment().do_nothing().to_owned())
                .exec_without_returning(&self.db)
                .await
            {
                Ok(0) => report.skipped += 1,
                Ok(_) => report.created += 1,
                Err(e) => {
                    warn!(
                        "创建通知状态失败: student_id={}, assignment_id={}: {}",
                        student_id, assignment_id, e
                    );
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }

    /// 标记为已查看：无记录时插入 viewed，有记录时仅推进 new
    pub async fn mark_notification_viewed_impl(
        &self,
        student_id: i64,
        assignment_id: i64,
        class_id: i64,
    ) -> Result<NotificationStatus> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(student_id),
            assignment_id: Set(assignment_id),
            class_id: Set(class_id),
            status: Set(NotificationState::Viewed.to_string()),
            viewed_at: Set(Some(now)),
            submitted_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = NotificationStatuses::insert(model)
            .on_conflict(on_student_assignment().do_nothing().to_owned())
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("更新通知状态失败: {e}")))?;

        if inserted == 0 {
            NotificationStatuses::update_many()
                .col_expr(Column::Status, Expr::value(NotificationState::Viewed.to_string()))
                .col_expr(Column::ViewedAt, Expr::value(now))
                .col_expr(Column::UpdatedAt, Expr::value(now))
                .filter(student_assignment(student_id, assignment_id))
                .filter(Column::Status.eq(NotificationState::New.to_string()))
                .exec(&self.db)
                .await
                .map_err(|e| {
                    GradebookError::database_operation(format!("更新通知状态失败: {e}"))
                })?;
        }

        self.get_notification_status_impl(student_id, assignment_id)
            .await
    }

    /// 标记为已提交，任何状态均可前进到 submitted
    pub async fn mark_notification_submitted_impl(
        &self,
        student_id: i64,
        assignment_id: i64,
        class_id: i64,
    ) -> Result<NotificationStatus> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(student_id),
            assignment_id: Set(assignment_id),
            class_id: Set(class_id),
            status: Set(NotificationState::Submitted.to_string()),
            viewed_at: Set(None),
            submitted_at: Set(Some(now)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        NotificationStatuses::insert(model)
            .on_conflict(
                on_student_assignment()
                    .update_columns([Column::Status, Column::SubmittedAt, Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("更新通知状态失败: {e}")))?;

        self.get_notification_status_impl(student_id, assignment_id)
            .await
    }

    /// 学生的全部通知状态
    pub async fn list_student_notification_statuses_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<NotificationStatus>> {
        let result = NotificationStatuses::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询通知状态失败: {e}")))?;

        Ok(result
            .into_iter()
            .map(|m| m.into_notification_status())
            .collect())
    }

    /// 删除创建时间早于 cutoff 的记录
    pub async fn delete_notification_statuses_before_impl(&self, cutoff: i64) -> Result<u64> {
        let result = NotificationStatuses::delete_many()
            .filter(Column::CreatedAt.lt(cutoff))
            .exec(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("清理通知状态失败: {e}")))?;

        Ok(result.rows_affected)
    }

    async fn get_notification_status_impl(
        &self,
        student_id: i64,
        assignment_id: i64,
    ) -> Result<NotificationStatus> {
        let result = NotificationStatuses::find()
            .filter(student_assignment(student_id, assignment_id))
            .one(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询通知状态失败: {e}")))?
            .ok_or_else(|| GradebookError::database_operation("通知状态写入后未找到记录"))?;

        Ok(result.into_notification_status())
    }
}
