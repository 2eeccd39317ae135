//! 后台服务：事件钩子与数据巡检

pub mod diagnostics;
pub mod hooks;

pub use diagnostics::DiagnosticsReport;
pub use hooks::{CatalogEvent, CatalogEventKind, HookService};
