use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::services::hooks::{CatalogEvent, CatalogEventKind, HookService};

/// 服务器状态 - 持有所有服务的共享引用
///
/// ServerState 是目录服务的核心数据结构，通过 Clone 在请求间共享。
/// 内部引用均为浅拷贝 (`Surreal` 和 `HookService` 内部是 Arc)。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式文档数据库 |
/// | hooks | HookService | 目录事件钩子分发 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 目录事件钩子
    pub hooks: HookService,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`ServerState::initialize`] 代替
    pub fn new(config: Config, db: Surreal<Db>, hooks: HookService) -> Self {
        Self { config, db, hooks }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (模拟模式跳过)
    /// 2. 数据库 (work_dir/database/catalog.db，模拟模式为内存库 + 示例数据)
    /// 3. 事件钩子服务
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        if !config.mock_data {
            config
                .ensure_work_dir_structure()
                .expect("Failed to create work directory structure");
        }

        let db_service = DbService::open(config)
            .await
            .expect("Failed to initialize database");

        let hooks = HookService::new();

        Self::new(config.clone(), db_service.db, hooks)
    }

    /// 启动后台任务
    ///
    /// 必须在 `Server::run()` 之前调用。启动的任务：
    /// - 钩子分发器 (目录创建/更新事件)
    pub async fn start_background_tasks(&self) {
        self.hooks.start();
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 发布目录事件
    ///
    /// Fire-and-forget：钩子只是保留的扩展点 (缓存失效、审计、通知)，
    /// 失败不影响请求路径。
    ///
    /// # 参数
    /// - `kind`: 事件类型 (Created / Updated)
    /// - `id`: 目录 ID
    /// - `name`: 目录名称
    pub fn publish_catalog_event(&self, kind: CatalogEventKind, id: &str, name: &str) {
        self.hooks.publish(CatalogEvent {
            kind,
            catalog_id: id.to_string(),
            catalog_name: name.to_string(),
        });
    }
}
