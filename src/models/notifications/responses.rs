use serde::Serialize;
use ts_rs::TS;

use super::entities::SmartNotification;

/// 学生通知汇总
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct NotificationSummary {
    pub new_assignments: i64,
    pub pending_assignments: i64,
    pub submitted_assignments: i64,
    pub total_notifications: i64,
    pub notifications: Vec<SmartNotification>,
}

/// 新作业通知分发结果
///
/// 部分失败只记录日志，不影响作业创建本身。
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct FanOutReport {
    pub created: i64,
    /// 已存在记录（重复调用）而跳过的数量
    pub skipped: i64,
    pub failed: i64,
}

/// 清理结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct CleanupNotificationsResponse {
    pub deleted_count: i64,
    pub retention_days: i64,
}
