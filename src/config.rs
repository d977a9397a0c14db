//! 菜单配置与加载

use std::fs;
use std::path::{Path, PathBuf};

use crossterm::style::Color;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::Padding;

/// 菜单构造参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// 标签区域宽度
    pub width: u16,
    /// 名义原点（未加留白），从 1 开始
    pub x: u16,
    pub y: u16,
    /// 初始选中项
    pub selected: usize,
    pub fg: Color,
    pub bg: Color,
    pub padding: Padding,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            width: 50,
            x: 1,
            y: 1,
            selected: 0,
            fg: Color::White,
            bg: Color::Blue,
            padding: Padding::default(),
        }
    }
}

/// 默认配置文件路径 (~/.config/tty-menu/config.toml)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tty-menu").join("config.toml"))
}

/// 从 TOML 文件加载配置，文件不存在时使用默认值
pub fn load_config(path: &Path) -> Result<MenuConfig> {
    if !path.exists() {
        return Ok(MenuConfig::default());
    }

    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<MenuConfig> {
    Ok(toml::from_str(content)?)
}
