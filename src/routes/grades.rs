use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::grades::requests::{GradeSummaryQuery, RecordGradeRequest};
use crate::models::users::entities::UserRole;
use crate::services::GradeService;

// 懒加载的全局 GRADE_SERVICE 实例
static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

// 录入成绩
pub async fn record_grade(
    req: HttpRequest,
    body: web::Json<RecordGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.record_grade(&req, body.into_inner()).await
}

// 学生成绩汇总（挂在 /classes/{class_id} 下）
pub async fn get_student_grade_summary(
    req: HttpRequest,
    class_id: web::Path<i64>,
    query: web::Query<GradeSummaryQuery>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .get_student_grade_summary(&req, class_id.into_inner(), query.into_inner())
        .await
}

// 班级成绩册（挂在 /classes/{class_id} 下）
pub async fn get_class_gradebook(
    req: HttpRequest,
    class_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .get_class_gradebook(&req, class_id.into_inner())
        .await
}

// 配置路由
pub fn configure_grades_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grades")
            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
            .wrap(middlewares::RequireJWT)
            .route("", web::post().to(record_grade)),
    );
}
