use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 单次评分记录：某学生某作业的得分，归入一个评分类别
///
/// (assignment_id, student_id) 唯一，重新评分会覆盖旧记录。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct AssignmentGrade {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub class_id: i64,
    pub grade_category_id: Option<i64>,
    pub points: f64,
    pub max_points: f64,
    pub percentage: f64,
    pub feedback: Option<String>,
    pub graded_by: i64,
    pub graded_at: chrono::DateTime<chrono::Utc>,
}
