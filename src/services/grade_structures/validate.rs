//! 评分类别校验

use crate::errors::{GradebookError, Result};
use crate::models::grade_structures::requests::GradeCategoryInput;

/// 权重之和必须等于的值
pub const TOTAL_WEIGHT: f64 = 100.0;

/// 校验类别列表
///
/// 权重之和与 100 的差超过 `tolerance` 时拒绝，错误信息包含实际总和与差值。
pub fn validate_categories(categories: &[GradeCategoryInput], tolerance: f64) -> Result<()> {
    if categories.is_empty() {
        return Err(GradebookError::validation("评分结构至少需要一个类别"));
    }

    for (index, category) in categories.iter().enumerate() {
        if category.name.trim().is_empty() {
            return Err(GradebookError::validation(format!(
                "第 {} 个类别名称不能为空",
                index + 1
            )));
        }
        if !(0.0..=TOTAL_WEIGHT).contains(&category.weight) {
            return Err(GradebookError::validation(format!(
                "类别 {} 的权重 {} 超出 0–100 范围",
                category.name, category.weight
            )));
        }
        if !category.max_points.is_finite() || category.max_points <= 0.0 {
            return Err(GradebookError::validation(format!(
                "类别 {} 的满分必须大于 0",
                category.name
            )));
        }
    }

    let total: f64 = categories.iter().map(|c| c.weight).sum();
    let discrepancy = total - TOTAL_WEIGHT;
    if discrepancy.abs() > tolerance {
        return Err(GradebookError::validation(format!(
            "类别权重之和为 {total}，与 100 相差 {discrepancy:+}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, weight: f64, max_points: f64) -> GradeCategoryInput {
        GradeCategoryInput {
            id: None,
            name: name.into(),
            weight,
            max_points,
            order: None,
        }
    }

    #[test]
    fn test_accepts_weights_summing_to_100() {
        let categories = vec![input("Homework", 40.0, 25.0), input("Exam", 60.0, 75.0)];
        assert!(validate_categories(&categories, 0.01).is_ok());
    }

    #[test]
    fn test_accepts_float_noise_within_tolerance() {
        let categories = vec![
            input("A", 33.333, 10.0),
            input("B", 33.333, 10.0),
            input("C", 33.334, 10.0),
        ];
        assert!(validate_categories(&categories, 0.01).is_ok());
    }

    #[test]
    fn test_rejects_sum_off_by_more_than_tolerance() {
        let categories = vec![input("Homework", 40.0, 25.0), input("Exam", 50.0, 75.0)];
        let err = validate_categories(&categories, 0.01).unwrap_err();
        assert!(err.is_validation());
        assert!(err.message().contains("90"));
        assert!(err.message().contains("-10"));

        let categories = vec![input("Homework", 40.0, 25.0), input("Exam", 60.02, 75.0)];
        assert!(validate_categories(&categories, 0.01).is_err());
    }

    #[test]
    fn test_rejects_malformed_categories() {
        assert!(validate_categories(&[], 0.01).is_err());
        assert!(validate_categories(&[input(" ", 100.0, 10.0)], 0.01).is_err());
        assert!(validate_categories(&[input("A", 120.0, 10.0), input("B", -20.0, 10.0)], 0.01).is_err());
        assert!(validate_categories(&[input("A", 100.0, 0.0)], 0.01).is_err());
        assert!(validate_categories(&[input("A", f64::NAN, 10.0)], 0.01).is_err());
    }
}
