use std::sync::Arc;

use crate::models::{
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    classes::{
        entities::{Class, ClassUser, ClassUserRole},
        requests::CreateClassRequest,
    },
    grade_structures::{
        entities::GradeStructure,
        requests::{CreateGradeStructureRequest, UpdateGradeStructureRequest},
    },
    grades::{entities::AssignmentGrade, requests::AssignmentGradeUpsert},
    notifications::{entities::NotificationStatus, responses::FanOutReport},
    submissions::{entities::Submission, requests::CreateSubmissionRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 班级管理方法
    // 创建班级
    async fn create_class(&self, teacher_id: i64, class: CreateClassRequest) -> Result<Class>;
    // 通过ID获取班级信息
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;

    /// 班级用户管理方法
    // 加入班级
    async fn join_class(
        &self,
        user_id: i64,
        class_id: i64,
        role: ClassUserRole,
    ) -> Result<ClassUser>;
    // 获取用户在班级中的成员记录
    async fn get_class_user_by_user_id_and_class_id(
        &self,
        user_id: i64,
        class_id: i64,
    ) -> Result<Option<ClassUser>>;
    // 列出班级全部学生ID
    async fn list_class_student_ids(&self, class_id: i64) -> Result<Vec<i64>>;

    /// 作业管理方法
    // 创建作业
    async fn create_assignment(
        &self,
        created_by: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    // 批量获取作业（不存在的ID直接忽略）
    async fn list_assignments_by_ids(&self, assignment_ids: &[i64]) -> Result<Vec<Assignment>>;

    /// 提交管理方法
    // 创建提交
    async fn create_submission(
        &self,
        student_id: i64,
        submission: CreateSubmissionRequest,
    ) -> Result<Submission>;
    // 学生已提交过的作业ID（去重）
    async fn list_submitted_assignment_ids(&self, student_id: i64) -> Result<Vec<i64>>;

    /// 评分结构管理方法
    // 创建评分结构（含类别）
    async fn create_grade_structure(
        &self,
        class_id: i64,
        teacher_id: i64,
        structure: CreateGradeStructureRequest,
    ) -> Result<GradeStructure>;
    // 通过ID获取评分结构
    async fn get_grade_structure_by_id(&self, structure_id: i64)
    -> Result<Option<GradeStructure>>;
    // 更新评分结构，categories 存在时整体替换
    async fn update_grade_structure(
        &self,
        structure_id: i64,
        update: UpdateGradeStructureRequest,
    ) -> Result<Option<GradeStructure>>;
    // 启用/停用评分结构
    async fn set_grade_structure_active(
        &self,
        structure_id: i64,
        is_active: bool,
    ) -> Result<Option<GradeStructure>>;
    // 列出班级的评分结构
    async fn list_grade_structures(&self, class_id: i64) -> Result<Vec<GradeStructure>>;
    // 获取班级当前启用的评分结构
    async fn get_active_grade_structure(&self, class_id: i64) -> Result<Option<GradeStructure>>;
    // 评分类别所属班级
    async fn get_grade_category_class_id(&self, category_id: i64) -> Result<Option<i64>>;

    /// 成绩管理方法
    // 写入或覆盖成绩（按作业+学生唯一）
    async fn upsert_assignment_grade(&self, grade: AssignmentGradeUpsert)
    -> Result<AssignmentGrade>;
    // 学生在班级中的全部成绩
    async fn list_student_grades(&self, student_id: i64, class_id: i64)
    -> Result<Vec<AssignmentGrade>>;
    // 班级全部成绩
    async fn list_class_grades(&self, class_id: i64) -> Result<Vec<AssignmentGrade>>;

    /// 通知状态管理方法
    // 为学生批量创建 new 状态记录，已存在的跳过
    async fn create_notification_statuses(
        &self,
        assignment_id: i64,
        class_id: i64,
        student_ids: &[i64],
    ) -> Result<FanOutReport>;
    // 标记为已查看（仅从 new 前进）
    async fn mark_notification_viewed(
        &self,
        student_id: i64,
        assignment_id: i64,
        class_id: i64,
    ) -> Result<NotificationStatus>;
    // 标记为已提交
    async fn mark_notification_submitted(
        &self,
        student_id: i64,
        assignment_id: i64,
        class_id: i64,
    ) -> Result<NotificationStatus>;
    // 列出学生的通知状态
    async fn list_student_notification_statuses(
        &self,
        student_id: i64,
    ) -> Result<Vec<NotificationStatus>>;
    // 删除创建时间早于 cutoff（unix 秒）的通知状态
    async fn delete_notification_statuses_before(&self, cutoff: i64) -> Result<u64>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
