use std::collections::HashMap;
use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{DateTime, Utc};

use super::{GRADE_SCALE, GradeService, GradeScale, compute_grade_summary, empty_grade_summary};
use crate::errors::Result;
use crate::models::grades::{
    entities::AssignmentGrade,
    requests::GradeSummaryQuery,
    responses::{ClassGradebookResponse, StudentGradeSummary},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::classes::access::{
    access_error_code, ensure_class_member, ensure_class_teacher,
};
use crate::services::current_user;
use crate::storage::Storage;

/// 学生在班级当前评分结构下的成绩汇总
///
/// 班级没有启用中的评分结构时返回 `has_structure = false` 的空汇总。
pub async fn student_grade_summary(
    storage: &Arc<dyn Storage>,
    student_id: i64,
    class_id: i64,
    scale: &GradeScale,
    now: DateTime<Utc>,
) -> Result<StudentGradeSummary> {
    let Some(structure) = storage.get_active_grade_structure(class_id).await? else {
        return Ok(empty_grade_summary(student_id, class_id, scale, now));
    };

    let grades = storage.list_student_grades(student_id, class_id).await?;
    Ok(compute_grade_summary(
        student_id, &structure, &grades, scale, now,
    ))
}

/// 班级全部学生的成绩汇总，每个学生独立计算
pub async fn class_gradebook(
    storage: &Arc<dyn Storage>,
    class_id: i64,
    scale: &GradeScale,
    now: DateTime<Utc>,
) -> Result<ClassGradebookResponse> {
    let student_ids = storage.list_class_student_ids(class_id).await?;
    let structure = storage.get_active_grade_structure(class_id).await?;

    let items = match &structure {
        Some(structure) => {
            let mut by_student: HashMap<i64, Vec<AssignmentGrade>> = HashMap::new();
            for grade in storage.list_class_grades(class_id).await? {
                by_student.entry(grade.student_id).or_default().push(grade);
            }
            student_ids
                .iter()
                .map(|&student_id| {
                    let grades = by_student.get(&student_id).map(Vec::as_slice).unwrap_or(&[]);
                    compute_grade_summary(student_id, structure, grades, scale, now)
                })
                .collect()
        }
        None => student_ids
            .iter()
            .map(|&student_id| empty_grade_summary(student_id, class_id, scale, now))
            .collect(),
    };

    Ok(ClassGradebookResponse {
        class_id,
        has_structure: structure.is_some(),
        items,
    })
}

pub async fn get_student_grade_summary(
    service: &GradeService,
    request: &HttpRequest,
    class_id: i64,
    query: GradeSummaryQuery,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    // 学生只能查看自己的汇总，查看他人需要班级教师权限
    let student_id = query.student_id.unwrap_or(user.id);
    let access = if student_id == user.id {
        ensure_class_member(&storage, &user, class_id).await
    } else {
        ensure_class_teacher(&storage, &user, class_id).await
    };
    if let Err(e) = access {
        return Ok(ApiResponse::from_error(
            "查询成绩汇总失败",
            &e,
            access_error_code(&e),
        ));
    }

    match student_grade_summary(&storage, student_id, class_id, &GRADE_SCALE, Utc::now()).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(summary, "查询成功"))),
        Err(e) => Ok(ApiResponse::from_error(
            "查询成绩汇总失败",
            &e,
            ErrorCode::InternalServerError,
        )),
    }
}

pub async fn get_class_gradebook(
    service: &GradeService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(e) = ensure_class_teacher(&storage, &user, class_id).await {
        return Ok(ApiResponse::from_error(
            "查询成绩册失败",
            &e,
            access_error_code(&e),
        ));
    }

    match class_gradebook(&storage, class_id, &GRADE_SCALE, Utc::now()).await {
        Ok(gradebook) => Ok(HttpResponse::Ok().json(ApiResponse::success(gradebook, "查询成功"))),
        Err(e) => Ok(ApiResponse::from_error(
            "查询成绩册失败",
            &e,
            ErrorCode::InternalServerError,
        )),
    }
}
