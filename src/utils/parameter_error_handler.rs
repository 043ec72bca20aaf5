//! 请求参数解析失败时的统一响应

use actix_web::{
    Error, HttpRequest,
    error::{InternalError, JsonPayloadError, PathError, QueryPayloadError},
};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

fn bad_request<E>(req: &HttpRequest, detail: String, err: E) -> Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    debug!("请求参数错误 {}: {}", req.path(), detail);
    let response = ApiResponse::error_response(ErrorCode::BadRequest, detail);
    InternalError::from_response(err, response).into()
}

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    let detail = format!("请求体格式错误: {err}");
    bad_request(req, detail, err)
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    let detail = format!("查询参数错误: {err}");
    bad_request(req, detail, err)
}

pub fn path_error_handler(err: PathError, req: &HttpRequest) -> Error {
    let detail = format!("路径参数错误: {err}");
    bad_request(req, detail, err)
}
