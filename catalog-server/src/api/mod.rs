//! API 路由模块
//!
//! # 结构
//!
//! - [`public`] - 公开目录接口 (getCatalog / searchProducts / getCatalogStats)
//! - [`health`] - 健康检查
//! - [`catalogs`] - 目录管理接口
//! - [`products`] - 产品管理接口
//! - [`categories`] - 分类管理接口
//! - [`clients`] - 客户管理接口
//! - [`diagnostics`] - 数据完整性巡检接口

pub mod health;
pub mod public;

// Data models API
pub mod catalogs;
pub mod categories;
pub mod clients;
pub mod products;

pub mod diagnostics;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
