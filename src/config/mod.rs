//! 配置管理
//!
//! 配置来源（后者覆盖前者）：`config.toml` → `config.{APP_ENV}.toml` →
//! `GRADEBOOK_*` 环境变量 → 常用环境变量（`DATABASE_URL`、`JWT_SECRET` 等）。

mod r#impl;
mod structs;

pub use structs::*;
