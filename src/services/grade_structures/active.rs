use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{GradeStructureService, update::load_structure};
use crate::errors::{GradebookError, Result};
use crate::models::grade_structures::{
    entities::GradeStructure, requests::SetGradeStructureActiveRequest,
};
use crate::models::users::entities::AuthUser;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{classes::access::ensure_class_teacher, current_user};
use crate::storage::Storage;

/// 启用或停用评分结构（不做物理删除）
pub async fn set_structure_active(
    storage: &Arc<dyn Storage>,
    user: &AuthUser,
    structure_id: i64,
    is_active: bool,
) -> Result<GradeStructure> {
    let existing = load_structure(storage, structure_id).await?;
    ensure_class_teacher(storage, user, existing.class_id).await?;

    storage
        .set_grade_structure_active(structure_id, is_active)
        .await?
        .ok_or_else(|| GradebookError::not_found(format!("评分结构 {structure_id} 不存在")))
}

pub async fn set_grade_structure_active(
    service: &GradeStructureService,
    request: &HttpRequest,
    structure_id: i64,
    body: SetGradeStructureActiveRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match set_structure_active(&storage, &user, structure_id, body.is_active).await {
        Ok(structure) => {
            info!(
                "Grade structure {} set active={} by {}",
                structure.id, structure.is_active, user.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(structure, "评分结构状态已更新")))
        }
        Err(e) => Ok(ApiResponse::from_error(
            "更新评分结构状态失败",
            &e,
            ErrorCode::GradeStructureNotFound,
        )),
    }
}
