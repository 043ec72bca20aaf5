use serde::Serialize;
use ts_rs::TS;

use super::entities::GradeStructure;

/// 评分结构列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade-structure.ts")]
pub struct GradeStructureListResponse {
    pub items: Vec<GradeStructure>,
}
