use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::SubmissionService;
use crate::errors::{GradebookError, Result};
use crate::models::submissions::{entities::Submission, requests::CreateSubmissionRequest};
use crate::models::users::entities::AuthUser;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;
use crate::services::notifications::mark_as_submitted;
use crate::storage::Storage;

/// 学生提交作业，并把通知状态推进为 submitted
pub async fn submit_assignment(
    storage: &Arc<dyn Storage>,
    user: &AuthUser,
    submission: CreateSubmissionRequest,
) -> Result<Submission> {
    let assignment = storage
        .get_assignment_by_id(submission.assignment_id)
        .await?
        .ok_or_else(|| {
            GradebookError::not_found(format!("作业 {} 不存在", submission.assignment_id))
        })?;

    if storage
        .get_class_user_by_user_id_and_class_id(user.id, assignment.class_id)
        .await?
        .is_none()
    {
        return Err(GradebookError::authorization("您不是该班级成员"));
    }

    let submission = storage.create_submission(user.id, submission).await?;

    // 状态更新失败不回滚提交，汇总时以提交记录为准
    if let Err(e) = mark_as_submitted(storage, user.id, assignment.id, assignment.class_id).await {
        warn!(
            "提交后更新通知状态失败: student_id={}, assignment_id={}: {}",
            user.id, assignment.id, e
        );
    }

    Ok(submission)
}

pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match submit_assignment(&storage, &user, submission).await {
        Ok(submission) => {
            info!(
                "Submission {} created for assignment {} by {}",
                submission.id, submission.assignment_id, user.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(submission, "提交成功")))
        }
        Err(e) => Ok(ApiResponse::from_error(
            "提交作业失败",
            &e,
            ErrorCode::SubmissionCreationFailed,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::requests::CreateAssignmentRequest;
    use crate::models::notifications::entities::NotificationState;
    use crate::services::test_support::*;

    async fn setup() -> (Arc<dyn Storage>, i64) {
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
        (storage, assignment.id)
    }

    #[tokio::test]
    async fn test_submission_marks_notification_submitted() {
        let (storage, assignment_id) = setup().await;

        let submission = submit_assignment(
            &storage,
            &student(10),
            CreateSubmissionRequest {
                assignment_id,
                content: "My essay".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(submission.student_id, 10);

        let statuses = storage.list_student_notification_statuses(10).await.unwrap();
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].status, NotificationState::Submitted);
        assert!(statuses[0].submitted_at.is_some());
    }

    #[tokio::test]
    async fn test_outsider_cannot_submit() {
        let (storage, assignment_id) = setup().await;
        let err = submit_assignment(
            &storage,
            &student(42),
            CreateSubmissionRequest {
                assignment_id,
                content: "x".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, GradebookError::Authorization(_)));
    }

    #[tokio::test]
    async fn test_missing_assignment_is_not_found() {
        let storage = storage().await;
        let err = submit_assignment(
            &storage,
            &student(10),
            CreateSubmissionRequest {
                assignment_id: 404,
                content: "x".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, GradebookError::NotFound(_)));
    }
}
