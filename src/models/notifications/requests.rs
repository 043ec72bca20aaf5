use serde::Deserialize;
use ts_rs::TS;

/// 学生可触发的通知状态动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub enum NotificationAction {
    View,
}

/// 更新通知状态请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct UpdateNotificationStatusRequest {
    pub assignment_id: i64,
    pub class_id: i64,
    pub action: NotificationAction,
}

/// 清理过期通知状态请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct CleanupNotificationsRequest {
    /// 缺省使用配置中的保留天数
    pub retention_days: Option<i64>,
}
