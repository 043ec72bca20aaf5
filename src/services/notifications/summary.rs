use std::collections::HashSet;
use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{DateTime, Duration, Utc};
use tracing::warn;

use super::{NotificationService, build_notification_summary};
use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::notifications::responses::NotificationSummary;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;
use crate::storage::Storage;

/// 即将截止窗口，配置值超出范围时退回默认 24 小时
pub fn window_from_hours(hours: i64) -> Duration {
    Duration::try_hours(hours)
        .filter(|window| *window >= Duration::zero())
        .unwrap_or_else(|| {
            warn!("due_soon_hours {} 超出范围，使用默认 24 小时", hours);
            Duration::hours(24)
        })
}

/// 读取学生的通知状态、相关作业和提交记录并生成汇总
pub async fn notification_summary_for(
    storage: &Arc<dyn Storage>,
    student_id: i64,
    now: DateTime<Utc>,
    due_soon_window: Duration,
) -> Result<NotificationSummary> {
    let statuses = storage
        .list_student_notification_statuses(student_id)
        .await?;
    if statuses.is_empty() {
        return Ok(build_notification_summary(
            &[],
            &[],
            &HashSet::new(),
            now,
            due_soon_window,
        ));
    }

    let assignment_ids: Vec<i64> = statuses.iter().map(|s| s.assignment_id).collect();
    let assignments = storage.list_assignments_by_ids(&assignment_ids).await?;
    let submitted: HashSet<i64> = storage
        .list_submitted_assignment_ids(student_id)
        .await?
        .into_iter()
        .collect();

    Ok(build_notification_summary(
        &statuses,
        &assignments,
        &submitted,
        now,
        due_soon_window,
    ))
}

pub async fn get_notification_summary(
    service: &NotificationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);
    let window = window_from_hours(AppConfig::get().notifications.due_soon_hours);

    match notification_summary_for(&storage, user.id, Utc::now(), window).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(summary, "查询成功"))),
        Err(e) => Ok(ApiResponse::from_error(
            "查询通知失败",
            &e,
            ErrorCode::InternalServerError,
        )),
    }
}
