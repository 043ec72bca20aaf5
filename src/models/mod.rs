pub mod assignments;
pub mod classes;
pub mod common;
pub mod grade_structures;
pub mod grades;
pub mod notifications;
pub mod submissions;
pub mod users;

pub use common::error_code::ErrorCode;
pub use common::response::ApiResponse;

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
