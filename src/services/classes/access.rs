//! 班级级别的访问控制
//!
//! 管理员放行；班级创建者和班级内的教师视为班级教师。

use std::sync::Arc;

use crate::errors::{GradebookError, Result};
use crate::models::classes::entities::{Class, ClassUserRole};
use crate::models::ErrorCode;
use crate::models::users::entities::AuthUser;
use crate::storage::Storage;

async fn load_class(storage: &Arc<dyn Storage>, class_id: i64) -> Result<Class> {
    storage
        .get_class_by_id(class_id)
        .await?
        .ok_or_else(|| GradebookError::not_found(format!("班级 {class_id} 不存在")))
}

/// 要求调用者是班级教师
pub async fn ensure_class_teacher(
    storage: &Arc<dyn Storage>,
    user: &AuthUser,
    class_id: i64,
) -> Result<Class> {
    let class = load_class(storage, class_id).await?;
    if user.is_admin() || class.teacher_id == user.id {
        return Ok(class);
    }

    match storage
        .get_class_user_by_user_id_and_class_id(user.id, class_id)
        .await?
    {
        Some(member) if member.role == ClassUserRole::Teacher => Ok(class),
        _ => Err(GradebookError::authorization("只有班级教师可以执行此操作")),
    }
}

/// 要求调用者是班级成员（含教师）
pub async fn ensure_class_member(
    storage: &Arc<dyn Storage>,
    user: &AuthUser,
    class_id: i64,
) -> Result<Class> {
    let class = load_class(storage, class_id).await?;
    if user.is_admin() || class.teacher_id == user.id {
        return Ok(class);
    }

    match storage
        .get_class_user_by_user_id_and_class_id(user.id, class_id)
        .await?
    {
        Some(_) => Ok(class),
        None => Err(GradebookError::authorization("您不是该班级成员")),
    }
}

/// 访问检查失败时使用的错误码：无权限为 403，班级不存在为 404
pub fn access_error_code(err: &GradebookError) -> ErrorCode {
    match err {
        GradebookError::Authorization(_) => ErrorCode::ClassPermissionDenied,
        GradebookError::NotFound(_) => ErrorCode::ClassNotFound,
        _ => ErrorCode::InternalServerError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::*;

    #[tokio::test]
    async fn test_teacher_and_member_checks() {
        let storage = storage().await;
        let class_id = class_with_students(&storage, &[10]).await;

        assert!(ensure_class_teacher(&storage, &teacher(), class_id).await.is_ok());
        assert!(ensure_class_teacher(&storage, &admin(), class_id).await.is_ok());

        let err = ensure_class_teacher(&storage, &student(10), class_id)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E010");

        assert!(ensure_class_member(&storage, &student(10), class_id).await.is_ok());
        assert!(ensure_class_member(&storage, &student(11), class_id).await.is_err());

        let err = ensure_class_member(&storage, &student(10), class_id + 100)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E006");
    }

    #[tokio::test]
    async fn test_reading_another_students_summary_is_permission_denied() {
        use crate::models::ApiResponse;
        use actix_web::http::StatusCode;

        let storage = storage().await;
        let class_id = class_with_students(&storage, &[10, 11]).await;

        // 学生 10 查看学生 11 的汇总需要教师权限
        let err = ensure_class_teacher(&storage, &student(10), class_id)
            .await
            .unwrap_err();
        let code = access_error_code(&err);
        assert_eq!(code, ErrorCode::ClassPermissionDenied);
        let resp = ApiResponse::from_error("查询成绩汇总失败", &err, code);
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let err = ensure_class_member(&storage, &student(10), class_id + 100)
            .await
            .unwrap_err();
        assert_eq!(access_error_code(&err), ErrorCode::ClassNotFound);
    }
}
