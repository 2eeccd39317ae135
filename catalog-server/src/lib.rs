//! Catalog Server - 多租户在线目录平台服务端
//!
//! # 架构概述
//!
//! 本模块是 Catalog Server 的主入口，提供以下核心功能：
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 文档存储 (catalogs / products / categories / clients)
//! - **目录核心** (`catalog`): slug 解析、商品过滤、统计聚合、会话状态
//! - **HTTP API** (`api`): 公开目录接口 + 管理端 RESTful API
//! - **服务** (`services`): 目录事件钩子、孤儿商品诊断
//!
//! # 模块结构
//!
//! ```text
//! catalog-server/src/
//! ├── core/          # 配置、状态、服务器、错误
//! ├── catalog/       # slug / resolver / filter / session / stats
//! ├── db/            # 数据库层 (models + repository)
//! ├── api/           # HTTP 路由和处理器
//! ├── routes/        # 路由组装和中间件栈
//! ├── services/      # 事件钩子、诊断
//! └── utils/         # 错误类型、日志
//! ```

pub mod api;
pub mod catalog;
pub mod core;
pub mod db;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use catalog::{CatalogResolver, CatalogSession, CatalogView};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv + 日志)
///
/// 必须在 [`Config::from_env`] 之前调用，确保 .env 文件中的变量已加载
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present; missing file is not an error
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   ______      __        __
  / ____/___ _/ /_____ _/ /___  ____ _
 / /   / __ `/ __/ __ `/ / __ \/ __ `/
/ /___/ /_/ / /_/ /_/ / / /_/ / /_/ /
\____/\__,_/\__/\__,_/_/\____/\__, /
                             /____/
    "#
    );
}
