pub mod assignments;
pub mod classes;
pub mod grade_structures;
pub mod grades;
pub mod notifications;
pub mod submissions;

pub use assignments::AssignmentService;
pub use classes::ClassService;
pub use grade_structures::GradeStructureService;
pub use grades::GradeService;
pub use notifications::NotificationService;
pub use submissions::SubmissionService;

use actix_web::{HttpRequest, HttpResponse};

use crate::middlewares::RequireJWT;
use crate::models::users::entities::AuthUser;
use crate::models::{ApiResponse, ErrorCode};

/// 取出 RequireJWT 放入请求扩展的调用者
pub(crate) fn current_user(request: &HttpRequest) -> Result<AuthUser, HttpResponse> {
    RequireJWT::extract_auth_user(request)
        .ok_or_else(|| ApiResponse::error_response(ErrorCode::Unauthorized, "未登录"))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::models::classes::{entities::ClassUserRole, requests::CreateClassRequest};
    use crate::models::users::entities::{AuthUser, UserRole};
    use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};

    pub(crate) const TEACHER: i64 = 1;

    pub(crate) fn teacher() -> AuthUser {
        AuthUser {
            id: TEACHER,
            role: UserRole::Teacher,
        }
    }

    pub(crate) fn student(id: i64) -> AuthUser {
        AuthUser {
            id,
            role: UserRole::User,
        }
    }

    pub(crate) fn admin() -> AuthUser {
        AuthUser {
            id: 999,
            role: UserRole::Admin,
        }
    }

    pub(crate) async fn storage() -> Arc<dyn Storage> {
        Arc::new(SeaOrmStorage::in_memory().await.unwrap())
    }

    /// 建一个班级并加入学生，返回班级 ID
    pub(crate) async fn class_with_students(storage: &Arc<dyn Storage>, students: &[i64]) -> i64 {
        let class = storage
            .create_class(
                TEACHER,
                CreateClassRequest {
                    class_name: "M.6/3".into(),
                    description: None,
                    teacher_id: None,
                },
            )
            .await
            .unwrap();
        storage
            .join_class(TEACHER, class.id, ClassUserRole::Teacher)
            .await
            .unwrap();
        for &id in students {
            storage
                .join_class(id, class.id, ClassUserRole::Student)
                .await
                .unwrap();
        }
        class.id
    }
}
