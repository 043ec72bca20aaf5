//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignment_grades;
mod assignments;
mod class_users;
mod classes;
mod grade_structures;
mod notification_status;
mod submissions;

use crate::config::AppConfig;
use crate::errors::{GradebookError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| GradebookError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// 使用已有连接创建存储实例并运行迁移
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| GradebookError::database_operation(format!("数据库迁移失败: {e}")))?;
        Ok(Self { db })
    }

    /// 内存 SQLite，仅测试使用
    #[cfg(test)]
    pub(crate) async fn in_memory() -> Result<Self> {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        // 内存库只存在于单个连接中
        opt.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opt)
            .await
            .map_err(|e| GradebookError::database_connection(format!("无法连接到数据库: {e}")))?;
        Self::from_connection(db).await
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| GradebookError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| GradebookError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| GradebookError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(GradebookError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 班级模块
    async fn create_class(&self, teacher_id: i64, class: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(teacher_id, class).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    // 班级用户模块
    async fn join_class(
        &self,
        user_id: i64,
        class_id: i64,
        role: ClassUserRole,
    ) -> Result<ClassUser> {
        self.join_class_impl(user_id, class_id, role).await
    }

    async fn get_class_user_by_user_id_and_class_id(
        &self,
        user_id: i64,
        class_id: i64,
    ) -> Result<Option<ClassUser>> {
        self.get_class_user_by_user_id_and_class_id_impl(user_id, class_id)
            .await
    }

    async fn list_class_student_ids(&self, class_id: i64) -> Result<Vec<i64>> {
        self.list_class_student_ids_impl(class_id).await
    }

    // 作业模块
    async fn create_assignment(
        &self,
        created_by: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_impl(created_by, assignment).await
    }

    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(assignment_id).await
    }

    async fn list_assignments_by_ids(&self, assignment_ids: &[i64]) -> Result<Vec<Assignment>> {
        self.list_assignments_by_ids_impl(assignment_ids).await
    }

    // 提交模块
    async fn create_submission(
        &self,
        student_id: i64,
        submission: CreateSubmissionRequest,
    ) -> Result<Submission> {
        self.create_submission_impl(student_id, submission).await
    }

    async fn list_submitted_assignment_ids(&self, student_id: i64) -> Result<Vec<i64>> {
        self.list_submitted_assignment_ids_impl(student_id).await
    }

    // 评分结构模块
    async fn create_grade_structure(
        &self,
        class_id: i64,
        teacher_id: i64,
        structure: CreateGradeStructureRequest,
    ) -> Result<GradeStructure> {
        self.create_grade_structure_impl(class_id, teacher_id, structure)
            .await
    }

    async fn get_grade_structure_by_id(
        &self,
        structure_id: i64,
    ) -> Result<Option<GradeStructure>> {
        self.get_grade_structure_by_id_impl(structure_id).await
    }

    async fn update_grade_structure(
        &self,
        structure_id: i64,
        update: UpdateGradeStructureRequest,
    ) -> Result<Option<GradeStructure>> {
        self.update_grade_structure_impl(structure_id, update).await
    }

    async fn set_grade_structure_active(
        &self,
        structure_id: i64,
        is_active: bool,
    ) -> Result<Option<GradeStructure>> {
        self.set_grade_structure_active_impl(structure_id, is_active)
            .await
    }

    async fn list_grade_structures(&self, class_id: i64) -> Result<Vec<GradeStructure>> {
        self.list_grade_structures_impl(class_id).await
    }

    async fn get_active_grade_structure(&self, class_id: i64) -> Result<Option<GradeStructure>> {
        self.get_active_grade_structure_impl(class_id).await
    }

    async fn get_grade_category_class_id(&self, category_id: i64) -> Result<Option<i64>> {
        self.get_grade_category_class_id_impl(category_id).await
    }

    // 成绩模块
    async fn upsert_assignment_grade(
        &self,
        grade: AssignmentGradeUpsert,
    ) -> Result<AssignmentGrade> {
        self.upsert_assignment_grade_impl(grade).await
    }

    async fn list_student_grades(
        &self,
        student_id: i64,
        class_id: i64,
    ) -> Result<Vec<AssignmentGrade>> {
        self.list_student_grades_impl(student_id, class_id).await
    }

    async fn list_class_grades(&self, class_id: i64) -> Result<Vec<AssignmentGrade>> {
        self.list_class_grades_impl(class_id).await
    }

    // 通知状态模块
    async fn create_notification_statuses(
        &self,
        assignment_id: i64,
        class_id: i64,
        student_ids: &[i64],
    ) -> Result<FanOutReport> {
        self.create_notification_statuses_impl(assignment_id, class_id, student_ids)
            .await
    }

    async fn mark_notification_viewed(
        &self,
        student_id: i64,
        assignment_id: i64,
        class_id: i64,
    ) -> Result<NotificationStatus> {
        self.mark_notification_viewed_impl(student_id, assignment_id, class_id)
            .await
    }

    async fn mark_notification_submitted(
        &self,
        student_id: i64,
        assignment_id: i64,
        class_id: i64,
    ) -> Result<NotificationStatus> {
        self.mark_notification_submitted_impl(student_id, assignment_id, class_id)
            .await
    }

    async fn list_student_notification_statuses(
        &self,
        student_id: i64,
    ) -> Result<Vec<NotificationStatus>> {
        self.list_student_notification_statuses_impl(student_id)
            .await
    }

    async fn delete_notification_statuses_before(&self, cutoff: i64) -> Result<u64> {
        self.delete_notification_statuses_before_impl(cutoff).await
    }
}
