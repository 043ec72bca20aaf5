use serde::Serialize;
use ts_rs::TS;

/// 单个评分类别的汇总
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct CategorySummary {
    pub category_id: i64,
    pub name: String,
    pub earned_points: f64,
    pub max_points: f64,
    pub percentage: f64,
    pub weight: f64,
    pub weighted_points: f64,
}

/// 学生在某评分结构下的成绩汇总（按需计算，不持久化）
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct StudentGradeSummary {
    pub student_id: i64,
    pub class_id: i64,
    /// 班级没有启用中的评分结构时为 false，前端显示空状态
    pub has_structure: bool,
    pub structure_id: Option<i64>,
    pub structure_name: Option<String>,
    pub categories: Vec<CategorySummary>,
    pub total_earned_points: f64,
    pub total_max_points: f64,
    pub final_percentage: f64,
    pub final_grade: String,
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

/// 班级成绩册
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct ClassGradebookResponse {
    pub class_id: i64,
    pub has_structure: bool,
    pub items: Vec<StudentGradeSummary>,
}
