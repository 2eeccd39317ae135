//! 目录核心 - slug 解析、过滤、统计、会话状态
//!
//! 除 [`resolver`] 以外全部是纯函数/纯状态机，不做 I/O。
//!
//! - [`slug`] - 名称 → URL-safe slug 派生
//! - [`resolver`] - slug → 目录 + 商品集合
//! - [`filter`] - 商品过滤引擎 (分类 + 全文子串)
//! - [`session`] - 目录会话状态机 (带代际令牌)
//! - [`stats`] - 统计聚合

pub mod filter;
pub mod resolver;
pub mod session;
pub mod slug;
pub mod stats;

pub use filter::{ALL_CATEGORIES, CategoryCount};
pub use resolver::{CatalogResolver, CatalogView, ResolveCatalog};
pub use session::{CatalogSession, LoadToken, SessionState};
pub use stats::CatalogStats;
