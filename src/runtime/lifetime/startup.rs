use crate::services::grades::GRADE_SCALE;
use crate::storage::Storage;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 准备服务器启动的上下文
/// 包括等级表和存储
pub async fn prepare_server_startup() -> StartupContext {
    // 提前构建等级表，配置无效时在启动日志中提示
    Lazy::force(&GRADE_SCALE);
    debug!("Grade scale initialized");

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    StartupContext { storage }
}
