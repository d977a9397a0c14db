//! 终端内的轻量选择菜单
//!
//! 在终端里画出一列带底色的菜单项，用方向键、`j`/`k` 移动选中项，
//! 回车确认，`q`/Ctrl-C 取消。

pub mod config;
pub mod error;
pub mod menu;
pub mod models;
pub mod terminal;

pub use config::{MenuConfig, load_config};
pub use error::{MenuError, Result};
pub use menu::{Menu, MenuStream, Notice, Selection};
pub use models::{MenuItem, Padding};
pub use terminal::{AnsiCanvas, Canvas};
