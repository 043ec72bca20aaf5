//! 作业通知状态跟踪
//!
//! 每个 (学生, 作业) 一条记录，状态只前进：new → viewed → submitted。
//! 删除提交不会回退状态。

use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::Result;
use crate::models::notifications::{entities::NotificationStatus, responses::FanOutReport};
use crate::storage::Storage;

/// 学生打开作业详情；只会把 new 推进为 viewed
pub async fn mark_as_viewed(
    storage: &Arc<dyn Storage>,
    student_id: i64,
    assignment_id: i64,
    class_id: i64,
) -> Result<NotificationStatus> {
    storage
        .mark_notification_viewed(student_id, assignment_id, class_id)
        .await
}

/// 学生提交作业后调用
pub async fn mark_as_submitted(
    storage: &Arc<dyn Storage>,
    student_id: i64,
    assignment_id: i64,
    class_id: i64,
) -> Result<NotificationStatus> {
    storage
        .mark_notification_submitted(student_id, assignment_id, class_id)
        .await
}

/// 为班级每个学生创建新作业通知
///
/// 重复调用安全：已有记录的学生被跳过。单个学生失败只计数和记录日志。
pub async fn create_notifications_for_new_assignment(
    storage: &Arc<dyn Storage>,
    assignment_id: i64,
    class_id: i64,
) -> Result<FanOutReport> {
    let student_ids = storage.list_class_student_ids(class_id).await?;
    let report = storage
        .create_notification_statuses(assignment_id, class_id, &student_ids)
        .await?;

    if report.failed > 0 {
        warn!(
            "作业 {} 的通知部分创建失败: created={}, skipped={}, failed={}",
            assignment_id, report.created, report.skipped, report.failed
        );
    } else {
        info!(
            "作业 {} 通知已分发: created={}, skipped={}",
            assignment_id, report.created, report.skipped
        );
    }

    Ok(report)
}
