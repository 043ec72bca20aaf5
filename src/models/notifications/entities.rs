use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 作业通知状态：new → viewed → submitted
///
/// 只能前进，由存储层的条件更新保证。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub enum NotificationState {
    New,
    Viewed,
    Submitted,
}

impl NotificationState {
    pub const NEW: &'static str = "new";
    pub const VIEWED: &'static str = "viewed";
    pub const SUBMITTED: &'static str = "submitted";

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationState::New => Self::NEW,
            NotificationState::Viewed => Self::VIEWED,
            NotificationState::Submitted => Self::SUBMITTED,
        }
    }
}

impl std::fmt::Display for NotificationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NotificationState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::NEW => Ok(NotificationState::New),
            Self::VIEWED => Ok(NotificationState::Viewed),
            Self::SUBMITTED => Ok(NotificationState::Submitted),
            _ => Err(format!("Invalid notification state: {s}")),
        }
    }
}

/// 学生-作业通知状态记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct NotificationStatus {
    pub id: i64,
    pub student_id: i64,
    pub assignment_id: i64,
    pub class_id: i64,
    pub status: NotificationState,
    pub viewed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 通知优先级，排序时 High 在前
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub enum NotificationPriority {
    High,
    Medium,
    Low,
}

impl NotificationPriority {
    /// 数值越大越优先
    pub fn weight(&self) -> u8 {
        match self {
            NotificationPriority::High => 3,
            NotificationPriority::Medium => 2,
            NotificationPriority::Low => 1,
        }
    }
}

/// 通知类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub enum NotificationKind {
    /// 学生尚未查看的新作业
    New,
    /// 已查看但尚未提交
    Pending,
}

/// 截止提醒标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub enum DueMarker {
    DueSoon,
    Overdue,
}

/// 智能通知：每次查询时临时生成，不持久化
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct SmartNotification {
    pub assignment_id: i64,
    pub class_id: i64,
    pub title: String,
    pub kind: NotificationKind,
    pub priority: NotificationPriority,
    pub message: String,
    pub due_marker: Option<DueMarker>,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_string_roundtrip() {
        for state in [
            NotificationState::New,
            NotificationState::Viewed,
            NotificationState::Submitted,
        ] {
            assert_eq!(state.as_str().parse::<NotificationState>(), Ok(state));
        }
        assert!("read".parse::<NotificationState>().is_err());
    }

    #[test]
    fn test_priority_weight_order() {
        assert!(NotificationPriority::High.weight() > NotificationPriority::Medium.weight());
        assert!(NotificationPriority::Medium.weight() > NotificationPriority::Low.weight());
    }
}
