pub mod cleanup;
pub mod feed;
pub mod status;
pub mod summary;
pub mod tracker;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::notifications::requests::{
    CleanupNotificationsRequest, UpdateNotificationStatusRequest,
};
use crate::storage::Storage;

pub use feed::build_notification_summary;
pub use tracker::{create_notifications_for_new_assignment, mark_as_submitted, mark_as_viewed};

pub struct NotificationService {
    storage: Option<Arc<dyn Storage>>,
}

impl NotificationService {
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

    // 当前用户的通知汇总
    pub async fn get_notification_summary(
        &self,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        summary::get_notification_summary(self, request).await
    }

    // 更新通知状态（查看作业）
    pub async fn update_notification_status(
        &self,
        request: &HttpRequest,
        body: UpdateNotificationStatusRequest,
    ) -> ActixResult<HttpResponse> {
        status::update_notification_status(self, request, body).await
    }

    // 清理过期通知状态
    pub async fn cleanup_notifications(
        &self,
        request: &HttpRequest,
        body: CleanupNotificationsRequest,
    ) -> ActixResult<HttpResponse> {
        cleanup::cleanup_notifications(self, request, body).await
    }
}
