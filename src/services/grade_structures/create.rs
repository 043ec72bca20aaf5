use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{GradeStructureService, validate_categories};
use crate::config::AppConfig;
use crate::errors::{GradebookError, Result};
use crate::models::grade_structures::{
    entities::GradeStructure, requests::CreateGradeStructureRequest,
};
use crate::models::users::entities::AuthUser;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{classes::access::ensure_class_teacher, current_user};
use crate::storage::Storage;

/// 总分必须为正数
pub(super) fn validate_total_points(total_points: Option<f64>) -> Result<()> {
    match total_points {
        Some(total) if !total.is_finite() || total <= 0.0 => Err(GradebookError::validation(
            format!("总分 {total} 必须大于 0"),
        )),
        _ => Ok(()),
    }
}

/// 创建评分结构，校验通过后才写入
pub async fn create_structure(
    storage: &Arc<dyn Storage>,
    user: &AuthUser,
    class_id: i64,
    structure: CreateGradeStructureRequest,
    tolerance: f64,
) -> Result<GradeStructure> {
    let class = ensure_class_teacher(storage, user, class_id).await?;

    if structure.name.trim().is_empty() {
        return Err(GradebookError::validation("评分结构名称不能为空"));
    }
    validate_categories(&structure.categories, tolerance)?;
    validate_total_points(structure.total_points)?;

    // 管理员代为创建时归属班级教师
    let teacher_id = if user.is_admin() {
        class.teacher_id
    } else {
        user.id
    };

    storage
        .create_grade_structure(class_id, teacher_id, structure)
        .await
}

pub async fn create_grade_structure(
    service: &GradeStructureService,
    request: &HttpRequest,
    class_id: i64,
    structure: CreateGradeStructureRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);
    let tolerance = AppConfig::get().grading.weight_tolerance;

    match create_structure(&storage, &user, class_id, structure, tolerance).await {
        Ok(structure) => {
            info!(
                "Grade structure {} created for class {} by {}",
                structure.id, class_id, user.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(structure, "评分结构创建成功")))
        }
        Err(e) => Ok(ApiResponse::from_error(
            "创建评分结构失败",
            &e,
            ErrorCode::GradeStructureInvalid,
        )),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::grade_structures::requests::GradeCategoryInput;
    use crate::services::test_support::*;

    pub(crate) fn request(weights: &[(&str, f64, f64)]) -> CreateGradeStructureRequest {
        CreateGradeStructureRequest {
            name: "Semester 1".into(),
            description: None,
            total_points: None,
            categories: weights
                .iter()
                .map(|(name, weight, max_points)| GradeCategoryInput {
                    id: None,
                    name: (*name).into(),
                    weight: *weight,
                    max_points: *max_points,
                    order: None,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_invalid_weights_are_not_persisted() {
        let storage = storage().await;
        let class_id = class_with_students(&storage, &[]).await;

        let err = create_structure(
            &storage,
            &teacher(),
            class_id,
            request(&[("Homework", 40.0, 25.0), ("Exam", 50.0, 75.0)]),
            0.01,
        )
        .await
        .unwrap_err();
        assert!(err.is_validation());
        assert!(err.message().contains("90"));
        assert!(storage.list_grade_structures(class_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_and_activate() {
        let storage = storage().await;
        let class_id = class_with_students(&storage, &[10]).await;

        let structure = create_structure(
            &storage,
            &teacher(),
            class_id,
            request(&[("Homework", 40.0, 25.0), ("Exam", 60.0, 75.0)]),
            0.01,
        )
        .await
        .unwrap();
        assert_eq!(structure.teacher_id, TEACHER);
        assert_eq!(structure.total_points, 100.0);

        let active = storage.get_active_grade_structure(class_id).await.unwrap();
        assert_eq!(active.map(|s| s.id), Some(structure.id));
    }

    #[tokio::test]
    async fn test_students_cannot_create() {
        let storage = storage().await;
        let class_id = class_with_students(&storage, &[10]).await;
        let err = create_structure(
            &storage,
            &student(10),
            class_id,
            request(&[("All", 100.0, 10.0)]),
            0.01,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code(), "E010");
    }

    #[test]
    fn test_total_points_must_be_positive() {
        assert!(validate_total_points(None).is_ok());
        assert!(validate_total_points(Some(50.0)).is_ok());
        assert!(validate_total_points(Some(0.0)).is_err());
        assert!(validate_total_points(Some(f64::INFINITY)).is_err());
    }
}
