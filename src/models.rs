//! 菜单项与几何信息

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// 菜单四周留白
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PaddingSpec")]
pub struct Padding {
    pub left: u16,
    pub right: u16,
    pub top: u16,
    pub bottom: u16,
}

impl Padding {
    /// 四边相同的留白
    pub fn uniform(n: u16) -> Self {
        Self {
            left: n,
            right: n,
            top: n,
            bottom: n,
        }
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            left: 2,
            right: 2,
            top: 1,
            bottom: 1,
        }
    }
}

/// 配置里的留白写法：单个数字，或者按边给出（缺省的边沿用默认值）
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum PaddingSpec {
    Uniform(u16),
    Sides(PaddingSides),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct PaddingSides {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

impl Default for PaddingSides {
    fn default() -> Self {
        let Padding {
            left,
            right,
            top,
            bottom,
        } = Padding::default();
        Self {
            left,
            right,
            top,
            bottom,
        }
    }
}

impl From<PaddingSpec> for Padding {
    fn from(spec: PaddingSpec) -> Self {
        match spec {
            PaddingSpec::Uniform(n) => Padding::uniform(n),
            PaddingSpec::Sides(s) => Padding {
                left: s.left,
                right: s.right,
                top: s.top,
                bottom: s.bottom,
            },
        }
    }
}

/// 菜单项，坐标在添加时确定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub x: u16,
    pub y: u16,
    pub label: String,
}

/// 菜单几何信息与菜单项列表
#[derive(Debug, Clone)]
pub struct Geometry {
    /// 下一个菜单项的位置
    pub x: u16,
    pub y: u16,
    /// 名义原点（未加留白）
    pub origin: (u16, u16),
    pub padding: Padding,
    /// 标签区域宽度
    pub width: u16,
    pub items: Vec<MenuItem>,
}

impl Geometry {
    pub fn new(x: u16, y: u16, width: u16, padding: Padding) -> Self {
        let mut geometry = Self {
            x,
            y,
            origin: (x, y),
            padding,
            width,
            items: Vec::new(),
        };
        (geometry.x, geometry.y) = geometry.start();
        geometry
    }

    /// 加上留白之后第一个菜单项的位置
    pub fn start(&self) -> (u16, u16) {
        (
            self.origin.0.saturating_add(self.padding.left),
            self.origin.1.saturating_add(self.padding.top),
        )
    }

    /// 整行宽度（含左右留白）
    pub fn total_width(&self) -> u16 {
        self.width
            .saturating_add(self.padding.left)
            .saturating_add(self.padding.right)
    }

    /// 在当前位置追加菜单项，返回其下标
    pub fn add_item(&mut self, label: impl Into<String>) -> usize {
        let index = self.items.len();
        self.items.push(MenuItem {
            x: self.x,
            y: self.y,
            label: label.into(),
        });
        self.y = self.y.saturating_add(1);
        index
    }

    /// 按插入顺序查找第一个同名菜单项
    pub fn index_of_label(&self, label: &str) -> Option<usize> {
        self.items.iter().position(|item| item.label == label)
    }

    /// 回到起始位置并清空菜单项，颜色和留白不变
    pub fn reset(&mut self) {
        (self.x, self.y) = self.start();
        self.items.clear();
    }

    /// 上方留白所占的行
    pub fn top_rows(&self) -> Range<u16> {
        let start = self.start().1;
        start.saturating_sub(self.padding.top)..start
    }

    /// 下方留白所占的行，从最后一项之后开始
    pub fn bottom_rows(&self) -> Range<u16> {
        self.y..self.y.saturating_add(self.padding.bottom)
    }

    pub fn last_item(&self) -> Option<&MenuItem> {
        self.items.last()
    }

    /// 把任意整数下标折回 `0..len`，负数表示从末尾往前数
    pub fn normalize(&self, index: isize) -> Option<usize> {
        let len = self.items.len() as isize;
        if len == 0 {
            return None;
        }
        Some(index.rem_euclid(len) as usize)
    }
}
