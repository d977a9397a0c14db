//! 逻辑导航事件 (Intent)
//!
//! 输入字节解码之后得到的全部事件种类

/// 导航事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    Cancel,  // ^C / q
    Confirm, // Enter / LF
}

/// 确认选择时携带的内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub label: String,
    pub index: usize,
}

/// 一次输入处理产生的通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Selected(Selection),
    Closed,
}
