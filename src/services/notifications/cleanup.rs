use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{DateTime, Duration, Utc};
use tracing::info;

use super::NotificationService;
use crate::config::AppConfig;
use crate::errors::{GradebookError, Result};
use crate::models::notifications::{
    requests::CleanupNotificationsRequest, responses::CleanupNotificationsResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 删除创建时间早于保留窗口的通知状态，返回删除数量
///
/// 由外部定时任务调用，不随请求自动触发。
pub async fn cleanup_expired_notifications(
    storage: &Arc<dyn Storage>,
    retention_days: i64,
    now: DateTime<Utc>,
) -> Result<u64> {
    if retention_days < 0 {
        return Err(GradebookError::validation(format!(
            "保留天数 {retention_days} 不能为负数"
        )));
    }

    let cutoff = Duration::try_days(retention_days)
        .and_then(|window| now.checked_sub_signed(window))
        .ok_or_else(|| GradebookError::validation(format!("保留天数 {retention_days} 超出范围")))?;
    let deleted = storage
        .delete_notification_statuses_before(cutoff.timestamp())
        .await?;

    info!(
        "已清理 {} 条通知状态（保留 {} 天，截止 {}）",
        deleted, retention_days, cutoff
    );
    Ok(deleted)
}

pub async fn cleanup_notifications(
    service: &NotificationService,
    request: &HttpRequest,
    body: CleanupNotificationsRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let retention_days = body
        .retention_days
        .unwrap_or(AppConfig::get().notifications.retention_days);

    match cleanup_expired_notifications(&storage, retention_days, Utc::now()).await {
        Ok(deleted) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CleanupNotificationsResponse {
                deleted_count: deleted as i64,
                retention_days,
            },
            "清理完成",
        ))),
        Err(e) => Ok(ApiResponse::from_error(
            "清理通知状态失败",
            &e,
            ErrorCode::BadRequest,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::*;

    #[tokio::test]
    async fn test_cleanup_keeps_rows_inside_window() {
        let storage = storage().await;
        let class_id = class_with_students(&storage, &[10]).await;
        let assignment = storage
            .create_assignment(
                TEACHER,
                crate::models::assignments::requests::CreateAssignmentRequest {
                    class_id,
                    title: "Poem".into(),
                    description: None,
                    max_points: None,
                    grade_category_id: None,
                    due_date: None,
                },
            )
            .await
            .unwrap();
        storage
            .create_notification_statuses(assignment.id, class_id, &[10])
            .await
            .unwrap();

        let deleted = cleanup_expired_notifications(&storage, 7, Utc::now())
            .await
            .unwrap();
        assert_eq!(deleted, 0);

        // 8 天后同一条记录已过期
        let deleted = cleanup_expired_notifications(&storage, 7, Utc::now() + Duration::days(8))
            .await
            .unwrap();
        assert_eq!(deleted, 1);
        assert!(
            storage
                .list_student_notification_statuses(10)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_out_of_range_retention_is_rejected() {
        let storage = storage().await;
        for days in [1_000_000_000_000_000, i64::MAX] {
            let err = cleanup_expired_notifications(&storage, days, Utc::now())
                .await
                .unwrap_err();
            assert!(err.is_validation());
        }
    }

    #[tokio::test]
    async fn test_negative_retention_is_rejected() {
        let storage = storage().await;
        let err = cleanup_expired_notifications(&storage, -1, Utc::now())
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }
}
