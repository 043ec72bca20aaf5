//! 学生通知汇总
//!
//! 按需从通知状态、作业和提交记录临时生成，不持久化。

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::models::assignments::entities::Assignment;
use crate::models::notifications::{
    entities::{
        DueMarker, NotificationKind, NotificationPriority, NotificationState, NotificationStatus,
        SmartNotification,
    },
    responses::NotificationSummary,
};

/// 截止标记：已过截止时间为逾期，窗口内为即将截止
pub fn due_marker(
    due_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    due_soon_window: Duration,
) -> Option<DueMarker> {
    let due = due_date?;
    if due < now {
        Some(DueMarker::Overdue)
    } else if due - now <= due_soon_window {
        Some(DueMarker::DueSoon)
    } else {
        None
    }
}

/// 优先级从高到低，同级按作业创建时间从新到旧
pub fn sort_notifications(notifications: &mut [SmartNotification]) {
    notifications.sort_by(|a, b| {
        b.priority
            .weight()
            .cmp(&a.priority.weight())
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

fn to_notification(
    status: &NotificationStatus,
    assignment: &Assignment,
    now: DateTime<Utc>,
    due_soon_window: Duration,
) -> SmartNotification {
    let (kind, mut priority, mut message) = match status.status {
        NotificationState::New => (
            NotificationKind::New,
            NotificationPriority::High,
            format!("新作业：{}", assignment.title),
        ),
        // 已查看，或状态为已提交但找不到提交记录
        _ => (
            NotificationKind::Pending,
            NotificationPriority::Medium,
            format!("{} 尚未提交", assignment.title),
        ),
    };

    let marker = due_marker(assignment.due_date, now, due_soon_window);
    match marker {
        Some(DueMarker::DueSoon) => {
            priority = NotificationPriority::High;
            message.push_str("（即将截止）");
        }
        Some(DueMarker::Overdue) => {
            priority = NotificationPriority::High;
            message.push_str("（已逾期）");
        }
        None => {}
    }

    SmartNotification {
        assignment_id: assignment.id,
        class_id: assignment.class_id,
        title: assignment.title.clone(),
        kind,
        priority,
        message,
        due_marker: marker,
        due_date: assignment.due_date,
        created_at: assignment.created_at,
    }
}

/// 生成通知汇总
///
/// 有提交记录的作业只计入 `submitted_assignments`，不出现在通知列表中；
/// 作业已不存在的状态记录直接跳过。
pub fn build_notification_summary(
    statuses: &[NotificationStatus],
    assignments: &[Assignment],
    submitted_assignment_ids: &HashSet<i64>,
    now: DateTime<Utc>,
    due_soon_window: Duration,
) -> NotificationSummary {
    let by_id: HashMap<i64, &Assignment> = assignments.iter().map(|a| (a.id, a)).collect();

    let mut submitted_assignments = 0;
    let mut notifications = Vec::new();

    for status in statuses {
        let Some(assignment) = by_id.get(&status.assignment_id) else {
            debug!(
                "跳过已不存在的作业 {} 的通知状态 {}",
                status.assignment_id, status.id
            );
            continue;
        };

        if submitted_assignment_ids.contains(&status.assignment_id) {
            submitted_assignments += 1;
            continue;
        }

        notifications.push(to_notification(status, assignment, now, due_soon_window));
    }

    sort_notifications(&mut notifications);

    let new_assignments = notifications
        .iter()
        .filter(|n| n.kind == NotificationKind::New)
        .count() as i64;
    let pending_assignments = notifications.len() as i64 - new_assignments;

    NotificationSummary {
        new_assignments,
        pending_assignments,
        submitted_assignments,
        total_notifications: new_assignments + pending_assignments,
        notifications,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hours: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_767_225_600 + hours * 3600, 0).unwrap()
    }

    fn assignment(id: i64, title: &str, created_hours: i64, due_hours: Option<i64>) -> Assignment {
        Assignment {
            id,
            class_id: 1,
            title: title.into(),
            description: None,
            max_points: 100.0,
            grade_category_id: None,
            due_date: due_hours.map(at),
            created_by: 2,
            created_at: at(created_hours),
            updated_at: at(created_hours),
        }
    }

    fn status(assignment_id: i64, state: NotificationState) -> NotificationStatus {
        NotificationStatus {
            id: assignment_id * 10,
            student_id: 7,
            assignment_id,
            class_id: 1,
            status: state,
            viewed_at: None,
            submitted_at: None,
            created_at: at(0),
            updated_at: at(0),
        }
    }

    fn window() -> Duration {
        Duration::hours(24)
    }

    #[test]
    fn test_classification_and_counts() {
        let now = at(100);
        let assignments = vec![
            assignment(1, "Essay", 0, None),
            assignment(2, "Lab", 1, None),
            assignment(3, "Quiz", 2, None),
        ];
        let statuses = vec![
            status(1, NotificationState::New),
            status(2, NotificationState::Viewed),
            status(3, NotificationState::Viewed),
        ];
        let submitted = HashSet::from([3]);

        let summary = build_notification_summary(&statuses, &assignments, &submitted, now, window());

        assert_eq!(summary.new_assignments, 1);
        assert_eq!(summary.pending_assignments, 1);
        assert_eq!(summary.submitted_assignments, 1);
        assert_eq!(summary.total_notifications, 2);
        assert_eq!(summary.notifications[0].message, "新作业：Essay");
        assert_eq!(summary.notifications[0].priority, NotificationPriority::High);
        assert_eq!(summary.notifications[1].message, "Lab 尚未提交");
        assert_eq!(summary.notifications[1].priority, NotificationPriority::Medium);
    }

    #[test]
    fn test_submitted_never_in_feed_regardless_of_status() {
        let assignments = vec![assignment(1, "Essay", 0, Some(101))];
        for state in [
            NotificationState::New,
            NotificationState::Viewed,
            NotificationState::Submitted,
        ] {
            let summary = build_notification_summary(
                &[status(1, state)],
                &assignments,
                &HashSet::from([1]),
                at(100),
                window(),
            );
            assert!(summary.notifications.is_empty());
            assert_eq!(summary.submitted_assignments, 1);
        }
    }

    #[test]
    fn test_submitted_status_without_submission_is_pending() {
        let summary = build_notification_summary(
            &[status(1, NotificationState::Submitted)],
            &[assignment(1, "Essay", 0, None)],
            &HashSet::new(),
            at(100),
            window(),
        );
        assert_eq!(summary.pending_assignments, 1);
        assert_eq!(summary.notifications[0].kind, NotificationKind::Pending);
    }

    #[test]
    fn test_due_soon_and_overdue_escalate() {
        let now = at(100);
        let assignments = vec![
            assignment(1, "Soon", 0, Some(110)),
            assignment(2, "Late", 1, Some(90)),
            assignment(3, "Later", 2, Some(200)),
        ];
        let statuses = vec![
            status(1, NotificationState::Viewed),
            status(2, NotificationState::Viewed),
            status(3, NotificationState::Viewed),
        ];

        let summary =
            build_notification_summary(&statuses, &assignments, &HashSet::new(), now, window());
        let by_id = |id: i64| {
            summary
                .notifications
                .iter()
                .find(|n| n.assignment_id == id)
                .unwrap()
        };

        assert_eq!(by_id(1).priority, NotificationPriority::High);
        assert_eq!(by_id(1).message, "Soon 尚未提交（即将截止）");
        assert_eq!(by_id(1).due_marker, Some(DueMarker::DueSoon));
        assert_eq!(by_id(2).message, "Late 尚未提交（已逾期）");
        assert_eq!(by_id(2).due_marker, Some(DueMarker::Overdue));
        assert_eq!(by_id(3).priority, NotificationPriority::Medium);
        assert_eq!(by_id(3).due_marker, None);
        // 窗口边界计入即将截止
        assert_eq!(
            due_marker(Some(at(124)), now, window()),
            Some(DueMarker::DueSoon)
        );
        assert_eq!(due_marker(None, now, window()), None);
    }

    #[test]
    fn test_priority_ordering() {
        let make = |id: i64, priority: NotificationPriority, created: i64| SmartNotification {
            assignment_id: id,
            class_id: 1,
            title: format!("#{id}"),
            kind: NotificationKind::Pending,
            priority,
            message: String::new(),
            due_marker: None,
            due_date: None,
            created_at: at(created),
        };
        let mut feed = vec![
            make(1, NotificationPriority::Medium, 5),
            make(2, NotificationPriority::High, 1),
            make(3, NotificationPriority::High, 3),
            make(4, NotificationPriority::Low, 9),
        ];

        sort_notifications(&mut feed);

        let order: Vec<i64> = feed.iter().map(|n| n.assignment_id).collect();
        assert_eq!(order, vec![3, 2, 1, 4]);
    }

    #[test]
    fn test_missing_assignment_is_skipped() {
        let summary = build_notification_summary(
            &[status(1, NotificationState::New), status(2, NotificationState::New)],
            &[assignment(2, "Kept", 0, None)],
            &HashSet::new(),
            at(100),
            window(),
        );
        assert_eq!(summary.total_notifications, 1);
        assert_eq!(summary.notifications[0].assignment_id, 2);
    }
}
