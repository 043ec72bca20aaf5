use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeStructureService;
use crate::models::grade_structures::responses::GradeStructureListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::classes::access::{access_error_code, ensure_class_member};
use crate::services::current_user;

pub async fn list_grade_structures(
    service: &GradeStructureService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(e) = ensure_class_member(&storage, &user, class_id).await {
        return Ok(ApiResponse::from_error(
            "查询评分结构失败",
            &e,
            access_error_code(&e),
        ));
    }

    match storage.list_grade_structures(class_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            GradeStructureListResponse { items },
            "查询成功",
        ))),
        Err(e) => Ok(ApiResponse::from_error(
            "查询评分结构失败",
            &e,
            ErrorCode::InternalServerError,
        )),
    }
}
