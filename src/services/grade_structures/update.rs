use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{GradeStructureService, create::validate_total_points, validate_categories};
use crate::config::AppConfig;
use crate::errors::{GradebookError, Result};
use crate::models::grade_structures::{
    entities::GradeStructure, requests::UpdateGradeStructureRequest,
};
use crate::models::users::entities::AuthUser;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{classes::access::ensure_class_teacher, current_user};
use crate::storage::Storage;

pub(super) async fn load_structure(
    storage: &Arc<dyn Storage>,
    structure_id: i64,
) -> Result<GradeStructure> {
    storage
        .get_grade_structure_by_id(structure_id)
        .await?
        .ok_or_else(|| GradebookError::not_found(format!("评分结构 {structure_id} 不存在")))
}

/// 更新评分结构；提供类别时整体替换并重新校验权重
pub async fn update_structure(
    storage: &Arc<dyn Storage>,
    user: &AuthUser,
    structure_id: i64,
    update: UpdateGradeStructureRequest,
    tolerance: f64,
) -> Result<GradeStructure> {
    let existing = load_structure(storage, structure_id).await?;
    ensure_class_teacher(storage, user, existing.class_id).await?;

    if let Some(name) = &update.name
        && name.trim().is_empty()
    {
        return Err(GradebookError::validation("评分结构名称不能为空"));
    }
    if let Some(categories) = &update.categories {
        validate_categories(categories, tolerance)?;
    }
    validate_total_points(update.total_points)?;

    storage
        .update_grade_structure(structure_id, update)
        .await?
        .ok_or_else(|| GradebookError::not_found(format!("评分结构 {structure_id} 不存在")))
}

pub async fn update_grade_structure(
    service: &GradeStructureService,
    request: &HttpRequest,
    structure_id: i64,
    update: UpdateGradeStructureRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);
    let tolerance = AppConfig::get().grading.weight_tolerance;

    match update_structure(&storage, &user, structure_id, update, tolerance).await {
        Ok(structure) => {
            info!("Grade structure {} updated by {}", structure.id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(structure, "评分结构更新成功")))
        }
        Err(e) => Ok(ApiResponse::from_error(
            "更新评分结构失败",
            &e,
            ErrorCode::GradeStructureInvalid,
        )),
    }
}
