//! 加权成绩计算
//!
//! 纯函数，不访问存储；调用方负责加载评分结构和成绩记录。

use chrono::{DateTime, Utc};

use super::scale::GradeScale;
use crate::models::grade_structures::entities::GradeStructure;
use crate::models::grades::{
    entities::AssignmentGrade,
    responses::{CategorySummary, StudentGradeSummary},
};

/// 得分占满分的百分比，满分为 0 时记为 0
pub fn percentage_of(earned: f64, max: f64) -> f64 {
    if max > 0.0 { earned / max * 100.0 } else { 0.0 }
}

/// 最终百分比保留两位小数，避免浮点误差把分界线上的成绩算到下一等级
pub fn round_percentage(percentage: f64) -> f64 {
    (percentage * 100.0).round() / 100.0
}

/// 按评分结构计算学生成绩汇总
///
/// 每个类别的满分取类别声明的 `max_points`，而不是所属作业满分之和。
/// 未归入任何类别（或归入其他结构类别）的成绩不计入。
pub fn compute_grade_summary(
    student_id: i64,
    structure: &GradeStructure,
    grades: &[AssignmentGrade],
    scale: &GradeScale,
    now: DateTime<Utc>,
) -> StudentGradeSummary {
    let categories: Vec<CategorySummary> = structure
        .categories
        .iter()
        .map(|category| {
            let earned_points: f64 = grades
                .iter()
                .filter(|g| g.grade_category_id == Some(category.id))
                .map(|g| g.points)
                .sum();
            let percentage = percentage_of(earned_points, category.max_points);

            CategorySummary {
                category_id: category.id,
                name: category.name.clone(),
                earned_points,
                max_points: category.max_points,
                percentage,
                weight: category.weight,
                weighted_points: percentage / 100.0 * category.weight,
            }
        })
        .collect();

    let total_earned_points = categories.iter().map(|c| c.earned_points).sum();
    let total_max_points = categories.iter().map(|c| c.max_points).sum();
    let final_percentage = round_percentage(categories.iter().map(|c| c.weighted_points).sum());

    StudentGradeSummary {
        student_id,
        class_id: structure.class_id,
        has_structure: true,
        structure_id: Some(structure.id),
        structure_name: Some(structure.name.clone()),
        categories,
        total_earned_points,
        total_max_points,
        final_percentage,
        final_grade: scale.letter_for(final_percentage).to_string(),
        last_updated: now,
    }
}

/// 班级没有启用中的评分结构时的空汇总
pub fn empty_grade_summary(
    student_id: i64,
    class_id: i64,
    scale: &GradeScale,
    now: DateTime<Utc>,
) -> StudentGradeSummary {
    StudentGradeSummary {
        student_id,
        class_id,
        has_structure: false,
        structure_id: None,
        structure_name: None,
        categories: Vec::new(),
        total_earned_points: 0.0,
        total_max_points: 0.0,
        final_percentage: 0.0,
        final_grade: scale.letter_for(0.0).to_string(),
        last_updated: now,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::grade_structures::entities::GradeCategory;

    pub(crate) fn structure(categories: Vec<(i64, &str, f64, f64)>) -> GradeStructure {
        GradeStructure {
            id: 1,
            class_id: 9,
            teacher_id: 2,
            name: "Semester 1".into(),
            description: None,
            total_points: categories.iter().map(|c| c.3).sum(),
            categories: categories
                .into_iter()
                .enumerate()
                .map(|(i, (id, name, weight, max_points))| GradeCategory {
                    id,
                    name: name.into(),
                    weight,
                    max_points,
                    order: i as i32,
                })
                .collect(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub(crate) fn grade(category: Option<i64>, points: f64, max_points: f64) -> AssignmentGrade {
        AssignmentGrade {
            id: 0,
            assignment_id: 0,
            student_id: 7,
            class_id: 9,
            grade_category_id: category,
            points,
            max_points,
            percentage: percentage_of(points, max_points),
            feedback: None,
            graded_by: 2,
            graded_at: Utc::now(),
        }
    }

    #[test]
    fn test_weighted_summary() {
        // A 占 25%（满分 25），B 占 75%（满分 75）
        let s = structure(vec![(10, "A", 25.0, 25.0), (11, "B", 75.0, 75.0)]);
        let grades = vec![grade(Some(10), 20.0, 25.0), grade(Some(11), 60.0, 75.0)];
        let summary = compute_grade_summary(7, &s, &grades, &GradeScale::default(), Utc::now());

        assert!(summary.has_structure);
        assert_eq!(summary.categories[0].percentage, 80.0);
        assert_eq!(summary.categories[0].weighted_points, 20.0);
        assert_eq!(summary.categories[1].percentage, 80.0);
        assert_eq!(summary.categories[1].weighted_points, 60.0);
        assert_eq!(summary.final_percentage, 80.0);
        assert_eq!(summary.final_grade, "A");
        assert_eq!(summary.total_earned_points, 80.0);
        assert_eq!(summary.total_max_points, 100.0);
    }

    #[test]
    fn test_unequal_weights() {
        // 作业 40%（满分 25），考试 60%（满分 75）
        let s = structure(vec![(10, "Homework", 40.0, 25.0), (11, "Exam", 60.0, 75.0)]);
        let grades = vec![grade(Some(10), 25.0, 25.0), grade(Some(11), 45.0, 75.0)];
        let summary = compute_grade_summary(7, &s, &grades, &GradeScale::default(), Utc::now());

        assert_eq!(summary.categories[0].weighted_points, 40.0);
        assert_eq!(summary.categories[1].percentage, 60.0);
        assert_eq!(summary.final_percentage, 76.0);
        assert_eq!(summary.final_grade, "B+");
    }

    #[test]
    fn test_breakpoint_scores_keep_their_letter() {
        // 3/97 的权重下原始浮点和为 59.99999999999999
        let s = structure(vec![(10, "Quiz", 3.0, 100.0), (11, "Exam", 97.0, 100.0)]);
        let scale = GradeScale::default();

        let sixty = vec![grade(Some(10), 60.0, 100.0), grade(Some(11), 60.0, 100.0)];
        let summary = compute_grade_summary(7, &s, &sixty, &scale, Utc::now());
        assert_eq!(summary.final_percentage, 60.0);
        assert_eq!(summary.final_grade, "C");

        let seventy = vec![grade(Some(10), 70.0, 100.0), grade(Some(11), 70.0, 100.0)];
        let summary = compute_grade_summary(7, &s, &seventy, &scale, Utc::now());
        assert_eq!(summary.final_percentage, 70.0);
        assert_eq!(summary.final_grade, "B");
    }

    #[test]
    fn test_round_percentage() {
        assert_eq!(round_percentage(59.99999999999999), 60.0);
        assert_eq!(round_percentage(76.456), 76.46);
        assert_eq!(round_percentage(0.0), 0.0);
    }

    #[test]
    fn test_category_max_is_declared_not_summed() {
        // 两次作业归入同一类别，类别满分仍按声明的 50 计算
        let s = structure(vec![(10, "Homework", 100.0, 50.0)]);
        let grades = vec![grade(Some(10), 10.0, 50.0), grade(Some(10), 15.0, 50.0)];
        let summary = compute_grade_summary(7, &s, &grades, &GradeScale::default(), Utc::now());

        assert_eq!(summary.categories[0].earned_points, 25.0);
        assert_eq!(summary.categories[0].max_points, 50.0);
        assert_eq!(summary.categories[0].percentage, 50.0);
        assert_eq!(summary.final_grade, "D");
    }

    #[test]
    fn test_zero_data() {
        let s = structure(vec![(10, "Homework", 40.0, 25.0), (11, "Exam", 60.0, 75.0)]);
        let summary = compute_grade_summary(7, &s, &[], &GradeScale::default(), Utc::now());

        assert_eq!(summary.categories.len(), 2);
        assert!(
            summary
                .categories
                .iter()
                .all(|c| c.earned_points == 0.0 && c.percentage == 0.0)
        );
        assert_eq!(summary.final_percentage, 0.0);
        assert_eq!(summary.final_grade, "F");
    }

    #[test]
    fn test_zero_max_points_is_safe() {
        let s = structure(vec![(10, "Bonus", 100.0, 0.0)]);
        let grades = vec![grade(Some(10), 5.0, 5.0)];
        let summary = compute_grade_summary(7, &s, &grades, &GradeScale::default(), Utc::now());

        assert_eq!(summary.categories[0].percentage, 0.0);
        assert!(summary.final_percentage.is_finite());
        assert_eq!(summary.final_percentage, 0.0);
    }

    #[test]
    fn test_uncategorised_grades_are_ignored() {
        let s = structure(vec![(10, "Homework", 100.0, 20.0)]);
        let grades = vec![grade(None, 20.0, 20.0), grade(Some(99), 20.0, 20.0)];
        let summary = compute_grade_summary(7, &s, &grades, &GradeScale::default(), Utc::now());
        assert_eq!(summary.total_earned_points, 0.0);
    }

    #[test]
    fn test_empty_summary() {
        let now = Utc::now();
        let summary = empty_grade_summary(7, 9, &GradeScale::default(), now);
        assert!(!summary.has_structure);
        assert!(summary.categories.is_empty());
        assert_eq!(summary.final_percentage, 0.0);
        assert_eq!(summary.final_grade, "F");
        assert_eq!(summary.last_updated, now);
    }
}
