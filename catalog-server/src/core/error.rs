use thiserror::Error;

/// 服务器启动/运行期错误
///
/// HTTP 处理器内部使用 [`crate::utils::AppError`]；
/// 本类型只覆盖服务器生命周期 (绑定端口、任务失败)。
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("内部服务器错误")]
    Internal(#[from] anyhow::Error),
}

/// 服务器生命周期的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
