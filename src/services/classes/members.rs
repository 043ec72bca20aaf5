use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ClassService, access::ensure_class_teacher};
use crate::errors::{GradebookError, Result};
use crate::models::classes::{entities::ClassUser, requests::AddClassMemberRequest};
use crate::models::users::entities::AuthUser;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;
use crate::storage::Storage;

/// 班级教师添加成员
pub async fn add_class_member(
    storage: &Arc<dyn Storage>,
    user: &AuthUser,
    class_id: i64,
    member: AddClassMemberRequest,
) -> Result<ClassUser> {
    ensure_class_teacher(storage, user, class_id).await?;

    if storage
        .get_class_user_by_user_id_and_class_id(member.user_id, class_id)
        .await?
        .is_some()
    {
        return Err(GradebookError::validation(format!(
            "用户 {} 已是班级成员",
            member.user_id
        )));
    }

    storage
        .join_class(member.user_id, class_id, member.role)
        .await
}

pub async fn add_member(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    member: AddClassMemberRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match add_class_member(&storage, &user, class_id, member).await {
        Ok(class_user) => {
            info!(
                "User {} joined class {} as {}",
                class_user.user_id, class_id, class_user.role
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(class_user, "成员添加成功")))
        }
        Err(e) => Ok(ApiResponse::from_error(
            "添加班级成员失败",
            &e,
            ErrorCode::ClassMemberAlreadyExists,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::classes::entities::ClassUserRole;
    use crate::services::test_support::*;

    #[tokio::test]
    async fn test_add_member_rejects_duplicates() {
        let storage = storage().await;
        let class_id = class_with_students(&storage, &[]).await;
        let req = || AddClassMemberRequest {
            user_id: 20,
            role: ClassUserRole::Student,
        };

        let member = add_class_member(&storage, &teacher(), class_id, req())
            .await
            .unwrap();
        assert_eq!(member.user_id, 20);

        let err = add_class_member(&storage, &teacher(), class_id, req())
            .await
            .unwrap_err();
        assert!(err.is_validation());

        assert!(
            add_class_member(&storage, &student(20), class_id, req())
                .await
                .is_err()
        );
        assert_eq!(storage.list_class_student_ids(class_id).await.unwrap(), vec![20]);
    }
}
