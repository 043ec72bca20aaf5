use serde::Serialize;
use ts_rs::TS;

use super::entities::Assignment;
use crate::models::notifications::responses::FanOutReport;

/// 创建作业响应，附带通知分发结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct CreateAssignmentResponse {
    pub assignment: Assignment,
    pub notifications: FanOutReport,
}
