use serde::Deserialize;
use ts_rs::TS;

/// 类别输入；携带 id 表示保留原类别
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade-structure.ts")]
pub struct GradeCategoryInput {
    pub id: Option<i64>,
    pub name: String,
    pub weight: f64,
    pub max_points: f64,
    pub order: Option<i32>,
}

/// 创建评分结构请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade-structure.ts")]
pub struct CreateGradeStructureRequest {
    pub name: String,
    pub description: Option<String>,
    /// 缺省为各类别满分之和
    pub total_points: Option<f64>,
    pub categories: Vec<GradeCategoryInput>,
}

/// 更新评分结构请求
///
/// `categories` 存在时整体替换类别列表。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade-structure.ts")]
pub struct UpdateGradeStructureRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub total_points: Option<f64>,
    pub categories: Option<Vec<GradeCategoryInput>>,
}

/// 启用/停用评分结构
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade-structure.ts")]
pub struct SetGradeStructureActiveRequest {
    pub is_active: bool,
}
