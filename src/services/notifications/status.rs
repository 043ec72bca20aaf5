use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{NotificationService, mark_as_viewed};
use crate::errors::{GradebookError, Result};
use crate::models::notifications::{
    entities::NotificationStatus,
    requests::{NotificationAction, UpdateNotificationStatusRequest},
};
use crate::models::users::entities::AuthUser;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::classes::access::ensure_class_member;
use crate::services::current_user;
use crate::storage::Storage;

/// 学生对作业执行通知动作
///
/// 作业必须属于请求中的班级，调用者必须是班级成员。
pub async fn apply_notification_action(
    storage: &Arc<dyn Storage>,
    user: &AuthUser,
    req: UpdateNotificationStatusRequest,
) -> Result<NotificationStatus> {
    let assignment = storage
        .get_assignment_by_id(req.assignment_id)
        .await?
        .ok_or_else(|| GradebookError::not_found(format!("作业 {} 不存在", req.assignment_id)))?;

    if assignment.class_id != req.class_id {
        return Err(GradebookError::validation(format!(
            "作业 {} 不属于班级 {}",
            assignment.id, req.class_id
        )));
    }

    ensure_class_member(storage, user, req.class_id).await?;

    match req.action {
        NotificationAction::View => {
            mark_as_viewed(storage, user.id, assignment.id, assignment.class_id).await
        }
    }
}

pub async fn update_notification_status(
    service: &NotificationService,
    request: &HttpRequest,
    body: UpdateNotificationStatusRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match apply_notification_action(&storage, &user, body).await {
        Ok(status) => Ok(HttpResponse::Ok().json(ApiResponse::success(status, "状态已更新"))),
        Err(e) => Ok(ApiResponse::from_error(
            "更新通知状态失败",
            &e,
            ErrorCode::NotificationActionInvalid,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::requests::CreateAssignmentRequest;
    use crate::models::notifications::entities::NotificationState;
    use crate::services::test_support::*;

    async fn setup() -> (Arc<dyn Storage>, i64, i64) {
        let storage = storage().await;
        let class_id = class_with_students(&storage, &[10]).await;
        let assignment = storage
            .create_assignment(
                TEACHER,
                CreateAssignmentRequest {
                    class_id,
                    title: "Essay".into(),
                    description: None,
                    max_points: None,
                    grade_category_id: None,
                    due_date: None,
                },
            )
            .await
            .unwrap();
        (storage, class_id, assignment.id)
    }

    #[tokio::test]
    async fn test_view_marks_status() {
        let (storage, class_id, assignment_id) = setup().await;
        let status = apply_notification_action(
            &storage,
            &student(10),
            UpdateNotificationStatusRequest {
                assignment_id,
                class_id,
                action: NotificationAction::View,
            },
        )
        .await
        .unwrap();
        assert_eq!(status.status, NotificationState::Viewed);
        assert_eq!(status.student_id, 10);
    }

    #[tokio::test]
    async fn test_class_mismatch_is_rejected() {
        let (storage, class_id, assignment_id) = setup().await;
        let err = apply_notification_action(
            &storage,
            &student(10),
            UpdateNotificationStatusRequest {
                assignment_id,
                class_id: class_id + 100,
                action: NotificationAction::View,
            },
        )
        .await
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_outsider_cannot_view() {
        let (storage, class_id, assignment_id) = setup().await;
        let err = apply_notification_action(
            &storage,
            &student(42),
            UpdateNotificationStatusRequest {
                assignment_id,
                class_id,
                action: NotificationAction::View,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, GradebookError::Authorization(_)));
    }
}
