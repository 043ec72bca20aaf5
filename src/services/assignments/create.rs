use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::AssignmentService;
use crate::errors::{GradebookError, Result};
use crate::models::assignments::{
    requests::CreateAssignmentRequest, responses::CreateAssignmentResponse,
};
use crate::models::notifications::responses::FanOutReport;
use crate::models::users::entities::AuthUser;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::classes::access::ensure_class_teacher;
use crate::services::current_user;
use crate::services::notifications::create_notifications_for_new_assignment;
use crate::storage::Storage;

/// 创建作业，随后为班级学生分发一次新作业通知
///
/// 通知分发失败不影响作业创建，只记录日志并返回空的分发结果。
pub async fn publish_assignment(
    storage: &Arc<dyn Storage>,
    user: &AuthUser,
    assignment: CreateAssignmentRequest,
) -> Result<CreateAssignmentResponse> {
    if assignment.title.trim().is_empty() {
        return Err(GradebookError::validation("作业标题不能为空"));
    }
    if let Some(max_points) = assignment.max_points
        && (!max_points.is_finite() || max_points <= 0.0)
    {
        return Err(GradebookError::validation(format!(
            "满分 {max_points} 必须大于 0"
        )));
    }

    let class_id = assignment.class_id;
    ensure_class_teacher(storage, user, class_id).await?;

    if let Some(category_id) = assignment.grade_category_id
        && storage.get_grade_category_class_id(category_id).await? != Some(class_id)
    {
        return Err(GradebookError::validation(format!(
            "评分类别 {category_id} 不属于该班级"
        )));
    }

    let assignment = storage.create_assignment(user.id, assignment).await?;

    let notifications =
        match create_notifications_for_new_assignment(storage, assignment.id, class_id).await {
            Ok(report) => report,
            Err(e) => {
                warn!("作业 {} 的通知分发失败: {}", assignment.id, e);
                FanOutReport::default()
            }
        };

    Ok(CreateAssignmentResponse {
        assignment,
        notifications,
    })
}

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match publish_assignment(&storage, &user, assignment).await {
        Ok(response) => {
            info!(
                "Assignment {} created in class {} by {}",
                response.assignment.id, response.assignment.class_id, user.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(response, "作业创建成功")))
        }
        Err(e) => Ok(ApiResponse::from_error(
            "创建作业失败",
            &e,
            ErrorCode::AssignmentCreationFailed,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::grade_structures::create::{create_structure, tests::request};
    use crate::services::test_support::*;

    fn assignment(class_id: i64) -> CreateAssignmentRequest {
        CreateAssignmentRequest {
            class_id,
            title: "Lab report".into(),
            description: Some("Pendulum".into()),
            max_points: Some(20.0),
            grade_category_id: None,
            due_date: None,
        }
    }

    #[tokio::test]
    async fn test_publish_fans_out_to_students() {
        let storage = storage().await;
        let class_id = class_with_students(&storage, &[10, 11, 12]).await;

        let response = publish_assignment(&storage, &teacher(), assignment(class_id))
            .await
            .unwrap();
        assert_eq!(response.assignment.max_points, 20.0);
        assert_eq!(response.notifications.created, 3);
        assert_eq!(response.notifications.failed, 0);
    }

    #[tokio::test]
    async fn test_student_cannot_publish() {
        let storage = storage().await;
        let class_id = class_with_students(&storage, &[10]).await;

        let err = publish_assignment(&storage, &student(10), assignment(class_id))
            .await
            .unwrap_err();
        assert!(matches!(err, GradebookError::Authorization(_)));
    }

    #[tokio::test]
    async fn test_invalid_max_points_is_rejected() {
        let storage = storage().await;
        let class_id = class_with_students(&storage, &[10]).await;
        let mut req = assignment(class_id);
        req.max_points = Some(0.0);

        let err = publish_assignment(&storage, &teacher(), req).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_category_must_belong_to_class() {
        let storage = storage().await;
        let class_id = class_with_students(&storage, &[10]).await;
        let other_class = class_with_students(&storage, &[]).await;
        let structure = create_structure(
            &storage,
            &teacher(),
            other_class,
            request(&[("Homework", 100.0, 100.0)]),
            0.01,
        )
        .await
        .unwrap();

        let mut req = assignment(class_id);
        req.grade_category_id = Some(structure.categories[0].id);
        let err = publish_assignment(&storage, &teacher(), req).await.unwrap_err();
        assert!(err.is_validation());
    }
}
