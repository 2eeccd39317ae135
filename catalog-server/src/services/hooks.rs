//! Catalog event hooks
//!
//! 目录创建/更新时发布事件，由后台任务逐条消费。当前订阅者只记录
//! 日志；保留的扩展点：缓存失效、审计、通知分发。
//!
//! Best-effort：通道满时丢弃事件，绝不阻塞请求路径。

use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

const HOOK_BUFFER: usize = 256;

/// 事件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogEventKind {
    Created,
    Updated,
}

/// 目录变更事件
#[derive(Debug, Clone)]
pub struct CatalogEvent {
    pub kind: CatalogEventKind,
    pub catalog_id: String,
    pub catalog_name: String,
}

/// 钩子分发服务
///
/// `new()` 创建通道；`start()` 启动后台消费任务 (幂等，receiver
/// 只会被取走一次)。
#[derive(Debug, Clone)]
pub struct HookService {
    tx: mpsc::Sender<CatalogEvent>,
    rx: Arc<Mutex<Option<mpsc::Receiver<CatalogEvent>>>>,
}

impl HookService {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(HOOK_BUFFER);
        Self {
            tx,
            rx: Arc::new(Mutex::new(Some(rx))),
        }
    }

    /// 发布事件 (fire-and-forget)
    pub fn publish(&self, event: CatalogEvent) {
        if let Err(e) = self.tx.try_send(event) {
            tracing::warn!(error = %e, "Catalog hook channel full, event dropped");
        }
    }

    /// 启动后台消费任务
    pub fn start(&self) {
        let Some(mut rx) = self.rx.lock().expect("hook receiver lock poisoned").take() else {
            return; // already started
        };

        tokio::spawn(async move {
            tracing::info!("Catalog hook dispatcher started");
            while let Some(event) = rx.recv().await {
                dispatch(event);
            }
            tracing::info!("Catalog hook dispatcher stopped");
        });
    }
}

impl Default for HookService {
    fn default() -> Self {
        Self::new()
    }
}

/// 当前唯一的订阅者：结构化日志
fn dispatch(event: CatalogEvent) {
    match event.kind {
        CatalogEventKind::Created => {
            tracing::info!(
                target: "hooks",
                catalog_id = %event.catalog_id,
                name = %event.catalog_name,
                "Catalog created"
            );
        }
        CatalogEventKind::Updated => {
            tracing::info!(
                target: "hooks",
                catalog_id = %event.catalog_id,
                name = %event.catalog_name,
                "Catalog updated"
            );
        }
    }
}
