use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use tracing::error;
use ts_rs::TS;

use crate::errors::GradebookError;
use crate::models::ErrorCode;

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// 按错误码的 HTTP 状态构造错误响应
    pub fn error_response(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
        HttpResponse::build(code.http_status()).json(Self::error_empty(code, message))
    }

    /// 业务层错误转换为响应
    ///
    /// 校验错误原样回显（包含具体数值差异），其余错误只记录日志，
    /// 对外返回通用的"请稍后重试"。`code` 的 HTTP 状态与错误类别一致时沿用，
    /// 否则使用通用错误码。
    pub fn from_error(context: &str, err: &GradebookError, code: ErrorCode) -> HttpResponse {
        let keep = |fallback: ErrorCode| {
            if code.http_status() == fallback.http_status() {
                code
            } else {
                fallback
            }
        };
        match err {
            GradebookError::Validation(msg) => Self::error_response(code, msg.clone()),
            GradebookError::NotFound(msg) => {
                Self::error_response(keep(ErrorCode::NotFound), msg.clone())
            }
            GradebookError::Authorization(msg) => {
                Self::error_response(keep(ErrorCode::Forbidden), msg.clone())
            }
            GradebookError::Authentication(msg) => {
                Self::error_response(ErrorCode::Unauthorized, msg.clone())
            }
            _ => {
                error!("{}: {}", context, err);
                Self::error_response(
                    ErrorCode::InternalServerError,
                    format!("{context}，请稍后重试"),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_success_envelope() {
        let resp = ApiResponse::success(42_i64, "ok");
        assert_eq!(resp.code, 0);
        assert_eq!(resp.data, Some(42));
    }

    #[test]
    fn test_validation_error_is_echoed() {
        let err = GradebookError::validation("类别权重之和为 90，与 100 相差 10");
        let resp = ApiResponse::from_error("保存评分结构失败", &err, ErrorCode::GradeStructureInvalid);
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_storage_error_is_opaque() {
        let err = GradebookError::database_connection("connection refused");
        let resp = ApiResponse::from_error("查询成绩失败", &err, ErrorCode::GradeInvalid);
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_keeps_specific_code() {
        let err = GradebookError::not_found("班级不存在");
        let resp = ApiResponse::from_error("查询成绩失败", &err, ErrorCode::ClassNotFound);
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let resp = ApiResponse::from_error("录入成绩失败", &err, ErrorCode::GradeInvalid);
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_authorization_error_is_forbidden() {
        let err = GradebookError::authorization("只能查看自己的成绩");
        let resp = ApiResponse::from_error("查询成绩失败", &err, ErrorCode::GradeInvalid);
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
