use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::{grade_structures, grades};
use crate::middlewares;
use crate::models::classes::requests::{AddClassMemberRequest, CreateClassRequest};
use crate::models::users::entities::UserRole;
use crate::services::ClassService;

// 懒加载的全局 CLASS_SERVICE 实例
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);

// HTTP处理程序
pub async fn create_class(
    req: HttpRequest,
    class_data: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .create_class(&req, class_data.into_inner())
        .await
}

pub async fn add_member(
    req: HttpRequest,
    class_id: web::Path<i64>,
    member: web::Json<AddClassMemberRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .add_member(&req, class_id.into_inner(), member.into_inner())
        .await
}

// 配置路由
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(
                    web::post()
                        .to(create_class)
                        // 教师创建自己的班级，管理员可以创建指定教师的班级
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            )
            .service(
                web::resource("/{class_id}/members").route(
                    web::post()
                        .to(add_member)
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            )
            .service(
                web::resource("/{class_id}/grade-structures")
                    // 班级成员可查看
                    .route(web::get().to(grade_structures::list_grade_structures))
                    .route(
                        web::post()
                            .to(grade_structures::create_grade_structure)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            .service(
                web::resource("/{class_id}/grades/summary")
                    // 学生查看自己的汇总，教师可指定 student_id
                    .route(web::get().to(grades::get_student_grade_summary)),
            )
            .service(
                web::resource("/{class_id}/gradebook").route(
                    web::get()
                        .to(grades::get_class_gradebook)
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            ),
    );
}
