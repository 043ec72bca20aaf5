/// API 业务错误码
///
/// 0 表示成功；1xxx 通用错误；2xxx 班级；3xxx 作业与提交；
/// 4xxx 评分；5xxx 通知。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1500,

    ClassNotFound = 2001,
    ClassPermissionDenied = 2003,
    ClassMemberAlreadyExists = 2009,

    AssignmentNotFound = 3001,
    AssignmentCreationFailed = 3002,
    SubmissionCreationFailed = 3011,

    GradeStructureNotFound = 4001,
    GradeStructureInvalid = 4002,
    GradeInvalid = 4003,

    NotificationActionInvalid = 5001,
}

impl ErrorCode {
    /// 错误码对应的 HTTP 状态码
    pub fn http_status(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;
        match self {
            ErrorCode::Success => StatusCode::OK,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden | ErrorCode::ClassPermissionDenied => StatusCode::FORBIDDEN,
            ErrorCode::NotFound
            | ErrorCode::ClassNotFound
            | ErrorCode::AssignmentNotFound
            | ErrorCode::GradeStructureNotFound => StatusCode::NOT_FOUND,
            ErrorCode::ClassMemberAlreadyExists => StatusCode::CONFLICT,
            ErrorCode::InternalServerError
            | ErrorCode::AssignmentCreationFailed
            | ErrorCode::SubmissionCreationFailed => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::BadRequest
            | ErrorCode::GradeStructureInvalid
            | ErrorCode::GradeInvalid
            | ErrorCode::NotificationActionInvalid => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::GradeStructureInvalid as i32, 4002);
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(ErrorCode::GradeInvalid.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::ClassNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::ClassPermissionDenied.http_status(),
            StatusCode::FORBIDDEN
        );
    }
}
