use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{GradeService, calculator::percentage_of};
use crate::errors::{GradebookError, Result};
use crate::models::grades::{
    entities::AssignmentGrade,
    requests::{AssignmentGradeUpsert, RecordGradeRequest},
};
use crate::models::users::entities::AuthUser;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{classes::access::ensure_class_teacher, current_user};
use crate::storage::Storage;

/// 分数范围校验：0 <= points <= max_points，max_points > 0
pub fn validate_points(points: f64, max_points: f64) -> Result<()> {
    if !max_points.is_finite() || max_points <= 0.0 {
        return Err(GradebookError::validation(format!(
            "满分 {max_points} 必须大于 0"
        )));
    }
    if !points.is_finite() || points < 0.0 {
        return Err(GradebookError::validation(format!(
            "得分 {points} 不能为负数"
        )));
    }
    if points > max_points {
        return Err(GradebookError::validation(format!(
            "得分 {points} 超过满分 {max_points}，超出 {}",
            points - max_points
        )));
    }
    Ok(())
}

/// 录入或覆盖某学生某作业的成绩
///
/// 班级取自作业；未指定评分类别时沿用作业的类别。
pub async fn record_assignment_grade(
    storage: &Arc<dyn Storage>,
    user: &AuthUser,
    grade: RecordGradeRequest,
) -> Result<AssignmentGrade> {
    validate_points(grade.points, grade.max_points)?;

    let assignment = storage
        .get_assignment_by_id(grade.assignment_id)
        .await?
        .ok_or_else(|| {
            GradebookError::not_found(format!("作业 {} 不存在", grade.assignment_id))
        })?;
    let class_id = assignment.class_id;
    ensure_class_teacher(storage, user, class_id).await?;

    if storage
        .get_class_user_by_user_id_and_class_id(grade.student_id, class_id)
        .await?
        .is_none()
    {
        return Err(GradebookError::validation(format!(
            "学生 {} 不是该班级成员",
            grade.student_id
        )));
    }

    let grade_category_id = grade.grade_category_id.or(assignment.grade_category_id);
    if let Some(category_id) = grade_category_id
        && storage.get_grade_category_class_id(category_id).await? != Some(class_id)
    {
        return Err(GradebookError::validation(format!(
            "评分类别 {category_id} 不属于该班级"
        )));
    }

    storage
        .upsert_assignment_grade(AssignmentGradeUpsert {
            assignment_id: grade.assignment_id,
            student_id: grade.student_id,
            class_id,
            grade_category_id,
            points: grade.points,
            max_points: grade.max_points,
            percentage: percentage_of(grade.points, grade.max_points),
            feedback: grade.feedback,
            graded_by: user.id,
        })
        .await
}

pub async fn record_grade(
    service: &GradeService,
    request: &HttpRequest,
    grade: RecordGradeRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match record_assignment_grade(&storage, &user, grade).await {
        Ok(grade) => {
            info!(
                "Grade recorded: assignment {} student {} = {}/{} by {}",
                grade.assignment_id, grade.student_id, grade.points, grade.max_points, user.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "成绩已保存")))
        }
        Err(e) => Ok(ApiResponse::from_error("保存成绩失败", &e, ErrorCode::GradeInvalid)),
    }
}
