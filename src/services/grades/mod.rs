pub mod calculator;
pub mod record;
pub mod scale;
pub mod summary;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::grades::requests::{GradeSummaryQuery, RecordGradeRequest};
use crate::storage::Storage;

pub use calculator::{compute_grade_summary, empty_grade_summary};
pub use scale::GradeScale;

/// 全局等级表，首次使用时从配置构建
pub(crate) static GRADE_SCALE: Lazy<GradeScale> =
    Lazy::new(|| GradeScale::from_config(&AppConfig::get().grading));

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 录入成绩
    pub async fn record_grade(
        &self,
        request: &HttpRequest,
        grade: RecordGradeRequest,
    ) -> ActixResult<HttpResponse> {
        record::record_grade(self, request, grade).await
    }

    // 学生成绩汇总
    pub async fn get_student_grade_summary(
        &self,
        request: &HttpRequest,
        class_id: i64,
        query: GradeSummaryQuery,
    ) -> ActixResult<HttpResponse> {
        summary::get_student_grade_summary(self, request, class_id, query).await
    }

    // 班级成绩册
    pub async fn get_class_gradebook(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        summary::get_class_gradebook(self, request, class_id).await
    }
}
