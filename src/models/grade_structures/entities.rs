use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 评分类别：评分结构中的一个加权组成部分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade-structure.ts")]
pub struct GradeCategory {
    pub id: i64,
    pub name: String,
    // 权重（百分比，0–100）
    pub weight: f64,
    // 该类别满分
    pub max_points: f64,
    // 显示顺序
    pub order: i32,
}

/// 评分结构
///
/// 属于一个班级和一名教师；类别权重之和在保存时校验为 100。
/// 只通过 `is_active` 停用，不做物理删除。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade-structure.ts")]
pub struct GradeStructure {
    pub id: i64,
    pub class_id: i64,
    pub teacher_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub total_points: f64,
    pub categories: Vec<GradeCategory>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
