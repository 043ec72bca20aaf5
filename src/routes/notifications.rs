use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::notifications::requests::{
    CleanupNotificationsRequest, UpdateNotificationStatusRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::NotificationService;

// 懒加载的全局 NOTIFICATION_SERVICE 实例
static NOTIFICATION_SERVICE: Lazy<NotificationService> = Lazy::new(NotificationService::new_lazy);

// 当前用户的通知汇总
pub async fn get_notification_summary(req: HttpRequest) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.get_notification_summary(&req).await
}

// 更新通知状态
pub async fn update_notification_status(
    req: HttpRequest,
    body: web::Json<UpdateNotificationStatusRequest>,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .update_notification_status(&req, body.into_inner())
        .await
}

// 清理过期通知状态，请求体可省略
pub async fn cleanup_notifications(
    req: HttpRequest,
    body: Option<web::Json<CleanupNotificationsRequest>>,
) -> ActixResult<HttpResponse> {
    let body = body.map(web::Json::into_inner).unwrap_or_default();
    NOTIFICATION_SERVICE.cleanup_notifications(&req, body).await
}

// 配置路由
pub fn configure_notifications_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/notifications")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(get_notification_summary))
            .route("/status", web::post().to(update_notification_status))
            .service(
                web::resource("/cleanup").route(
                    web::post()
                        .to(cleanup_notifications)
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                ),
            ),
    );
}
