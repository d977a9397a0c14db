//! 菜单状态定义 (Model)
//!
//! `MenuState` 是绘制所需的全部可变状态，由 [`Menu`] 独占，
//! 以 `&mut` 的形式交给视图层使用。

use std::collections::{HashMap, HashSet};

use crossterm::style::Color;

use super::input::InputDecoder;
use crate::config::MenuConfig;
use crate::models::{Geometry, MenuItem};
use crate::terminal::{AnsiCanvas, Canvas};

/// 菜单生命周期
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// 首次（或 reset 之后的）绘制尚未执行
    Pending,
    Ready,
    Closed,
}

/// 前景/背景色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colors {
    pub fg: Color,
    pub bg: Color,
}

/// 绘制状态
#[derive(Debug, Clone)]
pub struct MenuState {
    pub geometry: Geometry,
    pub selected: usize,
    pub colors: Colors,
    /// 本轮已经铺过空白的行
    pub painted: HashSet<u16>,
    pub phase: Phase,
}

impl MenuState {
    pub fn new(config: &MenuConfig) -> Self {
        Self {
            geometry: Geometry::new(config.x, config.y, config.width, config.padding),
            selected: config.selected,
            colors: Colors {
                fg: config.fg,
                bg: config.bg,
            },
            painted: HashSet::new(),
            phase: Phase::Pending,
        }
    }

    pub fn item_count(&self) -> usize {
        self.geometry.items.len()
    }

    /// 当前选中项，总是落在 `0..len` 之内
    pub fn selected_index(&self) -> Option<usize> {
        self.geometry.normalize(self.selected as isize)
    }
}

pub type SelectHandler = Box<dyn FnMut(&str, usize)>;
pub type CloseHandler = Box<dyn FnMut()>;

/// 终端选择菜单
pub struct Menu<C: Canvas = AnsiCanvas<Vec<u8>>> {
    pub(crate) canvas: C,
    pub(crate) state: MenuState,
    pub(crate) decoder: InputDecoder,
    pub(crate) select_handlers: Vec<SelectHandler>,
    /// 按菜单项下标登记的回调
    pub(crate) item_handlers: HashMap<usize, SelectHandler>,
    pub(crate) close_handlers: Vec<CloseHandler>,
}

impl<C: Canvas> Menu<C> {
    pub fn state(&self) -> &MenuState {
        &self.state
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn is_closed(&self) -> bool {
        self.state.phase == Phase::Closed
    }

    /// 当前选中项的下标，落在 `0..len` 之内；没有菜单项时返回配置的初始值
    pub fn selected(&self) -> usize {
        self.state.selected_index().unwrap_or(self.state.selected)
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.state.geometry.items
    }
}
