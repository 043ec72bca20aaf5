use serde::Deserialize;
use ts_rs::TS;

use super::entities::ClassUserRole;

/// 创建班级请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct CreateClassRequest {
    pub class_name: String,
    pub description: Option<String>,
    /// 管理员代教师创建时指定，教师本人创建时忽略
    pub teacher_id: Option<i64>,
}

/// 添加班级成员请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct AddClassMemberRequest {
    pub user_id: i64,
    #[serde(default = "default_member_role")]
    pub role: ClassUserRole,
}

fn default_member_role() -> ClassUserRole {
    ClassUserRole::Student
}
