pub mod active;
pub mod create;
pub mod list;
pub mod update;
pub mod validate;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::grade_structures::requests::{
    CreateGradeStructureRequest, SetGradeStructureActiveRequest, UpdateGradeStructureRequest,
};
use crate::storage::Storage;

pub use validate::validate_categories;

pub struct GradeStructureService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeStructureService {
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

    // 列出班级评分结构
    pub async fn list_grade_structures(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_grade_structures(self, request, class_id).await
    }

    // 创建评分结构
    pub async fn create_grade_structure(
        &self,
        request: &HttpRequest,
        class_id: i64,
        structure: CreateGradeStructureRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_grade_structure(self, request, class_id, structure).await
    }

    // 更新评分结构
    pub async fn update_grade_structure(
        &self,
        request: &HttpRequest,
        structure_id: i64,
        update: UpdateGradeStructureRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_grade_structure(self, request, structure_id, update).await
    }

    // 启用/停用评分结构
    pub async fn set_grade_structure_active(
        &self,
        request: &HttpRequest,
        structure_id: i64,
        body: SetGradeStructureActiveRequest,
    ) -> ActixResult<HttpResponse> {
        active::set_grade_structure_active(self, request, structure_id, body).await
    }
}
