//! 作业成绩存储操作

use super::SeaOrmStorage;
use crate::entity::assignment_grades::{ActiveModel, Column, Entity as AssignmentGrades};
use crate::errors::{GradebookError, Result};
use crate::models::grades::{entities::AssignmentGrade, requests::AssignmentGradeUpsert};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 写入成绩，(assignment_id, student_id) 已存在时覆盖
    pub async fn upsert_assignment_grade_impl(
        &self,
        grade: AssignmentGradeUpsert,
    ) -> Result<AssignmentGrade> {
        let now = chrono::Utc::now().timestamp();
        let (assignment_id, student_id) = (grade.assignment_id, grade.student_id);

        let model = ActiveModel {
            assignment_id: Set(grade.assignment_id),
            student_id: Set(grade.student_id),
            class_id: Set(grade.class_id),
            grade_category_id: Set(grade.grade_category_id),
            points: Set(grade.points),
            max_points: Set(grade.max_points),
            percentage: Set(grade.percentage),
            feedback: Set(grade.feedback),
            graded_by: Set(grade.graded_by),
            graded_at: Set(now),
            ..Default::default()
        };

        AssignmentGrades::insert(model)
            .on_conflict(
                OnConflict::columns([Column::AssignmentId, Column::StudentId])
                    .update_columns([
                        Column::ClassId,
                        Column::GradeCategoryId,
                        Column::Points,
                        Column::MaxPoints,
                        Column::Percentage,
                        Column::Feedback,
                        Column::GradedBy,
                        Column::GradedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("保存成绩失败: {e}")))?;

        let result = AssignmentGrades::find()
            .filter(
                Condition::all()
                    .add(Column::AssignmentId.eq(assignment_id))
                    .add(Column::StudentId.eq(student_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询成绩失败: {e}")))?
            .ok_or_else(|| GradebookError::database_operation("保存成绩后未找到记录"))?;

        Ok(result.into_assignment_grade())
    }

    /// 学生在班级中的全部成绩
    pub async fn list_student_grades_impl(
        &self,
        student_id: i64,
        class_id: i64,
    ) -> Result<Vec<AssignmentGrade>> {
        let result = AssignmentGrades::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::AssignmentId)
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_assignment_grade()).collect())
    }

    /// 班级全部成绩
    pub async fn list_class_grades_impl(&self, class_id: i64) -> Result<Vec<AssignmentGrade>> {
        let result = AssignmentGrades::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::StudentId)
            .order_by_asc(Column::AssignmentId)
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询班级成绩失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_assignment_grade()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::requests::CreateAssignmentRequest;
    use crate::models::classes::requests::CreateClassRequest;

    fn upsert(assignment_id: i64, class_id: i64, points: f64) -> AssignmentGradeUpsert {
        AssignmentGradeUpsert {
            assignment_id,
            student_id: 10,
            class_id,
            grade_category_id: None,
            points,
            max_points: 25.0,
            percentage: points / 25.0 * 100.0,
            feedback: None,
            graded_by: 1,
        }
    }

    #[tokio::test]
    async fn test_regrade_replaces_existing_record() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let class = storage
            .create_class_impl(
                1,
                CreateClassRequest {
                    class_name: "M.5/2".into(),
                    description: None,
                    teacher_id: None,
                },
            )
            .await
            .unwrap();
        let assignment = storage
            .create_assignment_impl(
                1,
                CreateAssignmentRequest {
                    class_id: class.id,
                    title: "Quiz".into(),
                    description: None,
                    max_points: Some(25.0),
                    grade_category_id: None,
                    due_date: None,
                },
            )
            .await
            .unwrap();

        let first = storage
            .upsert_assignment_grade_impl(upsert(assignment.id, class.id, 15.0))
            .await
            .unwrap();
        let second = storage
            .upsert_assignment_grade_impl(upsert(assignment.id, class.id, 20.0))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.points, 20.0);
        assert_eq!(second.percentage, 80.0);

        let grades = storage.list_student_grades_impl(10, class.id).await.unwrap();
        assert_eq!(grades.len(), 1);
        assert_eq!(storage.list_class_grades_impl(class.id).await.unwrap().len(), 1);
        assert!(storage.list_student_grades_impl(10, class.id + 1).await.unwrap().is_empty());
    }
}
