//! 错误类型

use std::io;

use thiserror::Error;

/// 菜单操作可能产生的错误
#[derive(Debug, Error)]
pub enum MenuError {
    /// 菜单已关闭（Cancel、`close()` 或输入流结束之后）
    #[error("菜单已关闭")]
    Closed,

    /// 终端绘制失败
    #[error("终端输出失败: {0}")]
    Io(#[from] io::Error),

    /// 配置文件格式错误
    #[error("配置文件解析失败: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, MenuError>;

impl From<MenuError> for io::Error {
    fn from(err: MenuError) -> Self {
        match err {
            MenuError::Closed => io::Error::new(io::ErrorKind::BrokenPipe, MenuError::Closed),
            MenuError::Io(e) => e,
            MenuError::Config(e) => io::Error::new(io::ErrorKind::InvalidData, e),
        }
    }
}
