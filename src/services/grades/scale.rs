//! 百分比到等级的映射

use tracing::warn;

use crate::config::{GradeBreakpoint, GradingConfig};
use crate::errors::{GradebookError, Result};

/// 等级表：按分界线从高到低匹配，第一个 `pct >= min` 的等级生效
#[derive(Debug, Clone, PartialEq)]
pub struct GradeScale {
    breakpoints: Vec<GradeBreakpoint>,
    fallback: String,
}

impl GradeScale {
    pub fn new(mut breakpoints: Vec<GradeBreakpoint>, fallback: impl Into<String>) -> Result<Self> {
        if breakpoints.is_empty() {
            return Err(GradebookError::validation("等级表不能为空"));
        }
        if let Some(bad) = breakpoints.iter().find(|b| !b.min.is_finite()) {
            return Err(GradebookError::validation(format!(
                "等级 {} 的分界线不是有效数值",
                bad.letter
            )));
        }

        breakpoints.sort_by(|a, b| b.min.total_cmp(&a.min));

        Ok(Self {
            breakpoints,
            fallback: fallback.into(),
        })
    }

    /// 从配置构建，配置无效时退回默认等级表
    pub fn from_config(config: &GradingConfig) -> Self {
        Self::new(config.scale.clone(), config.fallback_letter.clone()).unwrap_or_else(|e| {
            warn!("等级表配置无效，使用默认等级表: {}", e);
            Self::default()
        })
    }

    pub fn letter_for(&self, percentage: f64) -> &str {
        self.breakpoints
            .iter()
            .find(|b| percentage >= b.min)
            .map(|b| b.letter.as_str())
            .unwrap_or(&self.fallback)
    }
}

impl Default for GradeScale {
    fn default() -> Self {
        let config = GradingConfig::default();
        Self {
            breakpoints: config.scale,
            fallback: config.fallback_letter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scale_boundaries() {
        let scale = GradeScale::default();
        let cases = [
            (100.0, "A"),
            (80.0, "A"),
            (79.99, "B+"),
            (75.0, "B+"),
            (70.0, "B"),
            (65.0, "C+"),
            (60.0, "C"),
            (55.0, "D+"),
            (50.0, "D"),
            (49.99, "F"),
            (0.0, "F"),
        ];
        for (pct, letter) in cases {
            assert_eq!(scale.letter_for(pct), letter, "pct = {pct}");
        }
    }

    #[test]
    fn test_nan_percentage_falls_through() {
        assert_eq!(GradeScale::default().letter_for(f64::NAN), "F");
    }

    #[test]
    fn test_unsorted_breakpoints_are_sorted() {
        let scale = GradeScale::new(
            vec![
                GradeBreakpoint {
                    min: 50.0,
                    letter: "Pass".into(),
                },
                GradeBreakpoint {
                    min: 90.0,
                    letter: "Distinction".into(),
                },
            ],
            "Fail",
        )
        .unwrap();
        assert_eq!(scale.letter_for(95.0), "Distinction");
        assert_eq!(scale.letter_for(60.0), "Pass");
        assert_eq!(scale.letter_for(10.0), "Fail");
    }

    #[test]
    fn test_invalid_config_falls_back_to_default() {
        let config = GradingConfig {
            scale: vec![],
            ..GradingConfig::default()
        };
        assert_eq!(GradeScale::from_config(&config), GradeScale::default());

        let config = GradingConfig {
            scale: vec![GradeBreakpoint {
                min: f64::NAN,
                letter: "A".into(),
            }],
            ..GradingConfig::default()
        };
        assert_eq!(GradeScale::from_config(&config), GradeScale::default());
    }
}
