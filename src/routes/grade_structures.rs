use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::grade_structures::requests::{
    CreateGradeStructureRequest, SetGradeStructureActiveRequest, UpdateGradeStructureRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::GradeStructureService;

// 懒加载的全局 GRADE_STRUCTURE_SERVICE 实例
static GRADE_STRUCTURE_SERVICE: Lazy<GradeStructureService> =
    Lazy::new(GradeStructureService::new_lazy);

// 列出班级评分结构（挂在 /classes/{class_id} 下）
pub async fn list_grade_structures(
    req: HttpRequest,
    class_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    GRADE_STRUCTURE_SERVICE
        .list_grade_structures(&req, class_id.into_inner())
        .await
}

// 创建评分结构（挂在 /classes/{class_id} 下）
pub async fn create_grade_structure(
    req: HttpRequest,
    class_id: web::Path<i64>,
    body: web::Json<CreateGradeStructureRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_STRUCTURE_SERVICE
        .create_grade_structure(&req, class_id.into_inner(), body.into_inner())
        .await
}

pub async fn update_grade_structure(
    req: HttpRequest,
    structure_id: web::Path<i64>,
    body: web::Json<UpdateGradeStructureRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_STRUCTURE_SERVICE
        .update_grade_structure(&req, structure_id.into_inner(), body.into_inner())
        .await
}

pub async fn set_grade_structure_active(
    req: HttpRequest,
    structure_id: web::Path<i64>,
    body: web::Json<SetGradeStructureActiveRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_STRUCTURE_SERVICE
        .set_grade_structure_active(&req, structure_id.into_inner(), body.into_inner())
        .await
}

// 配置路由
pub fn configure_grade_structures_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grade-structures")
            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
            .wrap(middlewares::RequireJWT)
            .route("/{id}", web::put().to(update_grade_structure))
            .route("/{id}/active", web::put().to(set_grade_structure_active)),
    );
}
