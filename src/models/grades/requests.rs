use serde::Deserialize;
use ts_rs::TS;

/// 录入成绩请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct RecordGradeRequest {
    pub assignment_id: i64,
    pub student_id: i64,
    pub points: f64,
    pub max_points: f64,
    pub feedback: Option<String>,
    /// 缺省时使用作业所属的评分类别
    pub grade_category_id: Option<i64>,
}

/// 成绩汇总查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeSummaryQuery {
    /// 教师查看指定学生；学生省略即查看自己
    pub student_id: Option<i64>,
}

// 用于存储层的内部写入参数（已校验、已补全）
#[derive(Debug, Clone)]
pub struct AssignmentGradeUpsert {
    pub assignment_id: i64,
    pub student_id: i64,
    pub class_id: i64,
    pub grade_category_id: Option<i64>,
    pub points: f64,
    pub max_points: f64,
    pub percentage: f64,
    pub feedback: Option<String>,
    pub graded_by: i64,
}
