use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassService;
use crate::errors::{GradebookError, Result};
use crate::models::classes::{
    entities::{Class, ClassUserRole},
    requests::CreateClassRequest,
};
use crate::models::users::entities::AuthUser;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;
use crate::storage::Storage;

/// 创建班级，创建者（或管理员指定的教师）以教师身份加入
pub async fn create_class_as(
    storage: &Arc<dyn Storage>,
    user: &AuthUser,
    mut class_data: CreateClassRequest,
) -> Result<Class> {
    if class_data.class_name.trim().is_empty() {
        return Err(GradebookError::validation("班级名称不能为空"));
    }

    // 只有管理员可以替其他教师创建班级
    let teacher_id = match class_data.teacher_id.take() {
        Some(id) if id != user.id && !user.is_admin() => {
            return Err(GradebookError::authorization("不能为其他教师创建班级"));
        }
        Some(id) => id,
        None => user.id,
    };

    let class = storage.create_class(teacher_id, class_data).await?;
    storage
        .join_class(teacher_id, class.id, ClassUserRole::Teacher)
        .await?;

    Ok(class)
}

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match create_class_as(&storage, &user, class_data).await {
        Ok(class) => {
            info!("Class {} created successfully by {}", class.class_name, user.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(class, "班级创建成功")))
        }
        Err(e) => Ok(ApiResponse::from_error("创建班级失败", &e, ErrorCode::BadRequest)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::*;

    fn request(teacher_id: Option<i64>) -> CreateClassRequest {
        CreateClassRequest {
            class_name: "Physics".into(),
            description: Some("Grade 11".into()),
            teacher_id,
        }
    }

    #[tokio::test]
    async fn test_creator_joins_as_teacher() {
        let storage = storage().await;
        let class = create_class_as(&storage, &teacher(), request(None))
            .await
            .unwrap();
        assert_eq!(class.teacher_id, TEACHER);

        let member = storage
            .get_class_user_by_user_id_and_class_id(TEACHER, class.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(member.role, ClassUserRole::Teacher);
    }

    #[tokio::test]
    async fn test_only_admin_assigns_other_teacher() {
        let storage = storage().await;
        let err = create_class_as(&storage, &teacher(), request(Some(55)))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E010");

        let class = create_class_as(&storage, &admin(), request(Some(55)))
            .await
            .unwrap();
        assert_eq!(class.teacher_id, 55);
    }
}
