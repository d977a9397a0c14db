//! 控制逻辑 (Update/Dispatch)
//!
//! 公开操作与输入事件的分发。所有状态变化都按输入到达的顺序同步完成：
//! 先把一个事件完整解码，再执行它的全部绘制，然后才处理下一个。

use std::collections::HashMap;

use tracing::{debug, warn};

use super::actions::{Action, Notice, Selection};
use super::input::InputDecoder;
use super::state::{Menu, MenuState, Phase};
use super::view;
use crate::config::MenuConfig;
use crate::error::{MenuError, Result};
use crate::terminal::{AnsiCanvas, Canvas};

/// `jump` 的目标：下标或标签
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JumpTarget<'a> {
    Index(usize),
    Label(&'a str),
}

impl From<usize> for JumpTarget<'_> {
    fn from(index: usize) -> Self {
        JumpTarget::Index(index)
    }
}

impl<'a> From<&'a str> for JumpTarget<'a> {
    fn from(label: &'a str) -> Self {
        JumpTarget::Label(label)
    }
}

impl Menu {
    /// 使用内置的 ANSI 画布，输出缓存在内存里，见 [`Menu::take_output`]
    pub fn new(config: MenuConfig) -> Self {
        Self::with_canvas(config, AnsiCanvas::new(Vec::new()))
    }

    /// 取走尚未发送的终端输出
    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(self.canvas.writer_mut())
    }
}

impl<C: Canvas> Menu<C> {
    /// 使用调用方提供的画布构造菜单。首次绘制推迟到 [`Menu::tick`]，
    /// 方便调用方先登记回调、添加菜单项。
    pub fn with_canvas(config: MenuConfig, mut canvas: C) -> Self {
        // 不支持属性的终端照样可以用
        if let Err(e) = canvas.reset_attributes().and_then(|_| canvas.set_bright()) {
            warn!("终端属性初始化失败: {}", e);
        }

        Self {
            canvas,
            state: MenuState::new(&config),
            decoder: InputDecoder::new(),
            select_handlers: Vec::new(),
            item_handlers: HashMap::new(),
            close_handlers: Vec::new(),
        }
    }

    // ============ 生命周期 ============

    /// 执行挂起的首次绘制；已经绘制过时什么也不做
    pub fn tick(&mut self) -> Result<()> {
        match self.state.phase {
            Phase::Closed => Err(MenuError::Closed),
            Phase::Ready => Ok(()),
            Phase::Pending => {
                // 绘制失败时保持 Pending，下次 tick 重试
                self.canvas.set_cursor_visible(false)?;
                view::full_draw(&mut self.canvas, &mut self.state)?;
                self.state.phase = Phase::Ready;
                debug!(items = self.state.item_count(), "菜单已绘制");
                Ok(())
            }
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            Err(MenuError::Closed)
        } else {
            Ok(())
        }
    }

    /// 清空菜单项并重新开始一轮绘制
    pub fn reset(&mut self) -> Result<()> {
        self.ensure_open()?;

        self.canvas.full_reset()?;
        self.canvas.reset_attributes()?;
        self.canvas.set_bright()?;

        self.state.geometry.reset();
        self.state.painted.clear();
        self.item_handlers.clear();
        self.state.phase = Phase::Pending;
        debug!("菜单已重置");
        Ok(())
    }

    /// 关闭菜单：结束输入，恢复光标，把光标移到菜单下方
    pub fn close(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.shutdown_input();

        self.canvas.set_cursor_visible(true)?;
        self.canvas.reset_attributes()?;
        self.canvas.move_to(1, self.state.geometry.y.saturating_add(1))?;
        self.canvas.end_session()?;
        Ok(())
    }

    /// 上游输入流结束
    pub fn end_input(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.shutdown_input();
        Ok(())
    }

    /// 丢弃未处理的字节并发出关闭通知
    fn shutdown_input(&mut self) {
        self.decoder.clear();
        self.state.phase = Phase::Closed;
        debug!("菜单已关闭");
        for handler in &mut self.close_handlers {
            handler();
        }
    }

    // ============ 观察者 ============

    /// 登记选择确认的回调，对所有菜单项生效
    pub fn on_select(&mut self, handler: impl FnMut(&str, usize) + 'static) {
        self.select_handlers.push(Box::new(handler));
    }

    pub fn on_close(&mut self, handler: impl FnMut() + 'static) {
        self.close_handlers.push(Box::new(handler));
    }

    // ============ 菜单项 ============

    /// 追加菜单项，只先铺空白，标签在下一次绘制时出现
    pub fn add(&mut self, label: impl Into<String>) -> Result<usize> {
        self.ensure_open()?;
        let y = self.state.geometry.y;
        let index = self.state.geometry.add_item(label);
        view::fill_row(&mut self.canvas, &mut self.state, y)?;
        Ok(index)
    }

    /// 追加菜单项，并登记只在确认该项时触发的回调
    pub fn add_with(
        &mut self,
        label: impl Into<String>,
        handler: impl FnMut(&str, usize) + 'static,
    ) -> Result<usize> {
        let index = self.add(label)?;
        self.item_handlers.insert(index, Box::new(handler));
        Ok(index)
    }

    /// 跳到指定菜单项；找不到时什么也不做
    pub fn jump<'a>(&mut self, target: impl Into<JumpTarget<'a>>) -> Result<()> {
        self.ensure_open()?;

        let index = match target.into() {
            JumpTarget::Index(index) if index < self.state.item_count() => index,
            JumpTarget::Index(_) => return Ok(()),
            JumpTarget::Label(label) => match self.state.geometry.index_of_label(label) {
                Some(index) => index,
                None => return Ok(()),
            },
        };

        let prev = self.state.selected;
        self.state.selected = index;
        if self.state.phase == Phase::Ready {
            view::draw_row(&mut self.canvas, &self.state, prev as isize)?;
            view::draw_row(&mut self.canvas, &self.state, index as isize)?;
        }
        Ok(())
    }

    /// 在菜单项之间输出自由文本
    pub fn write(&mut self, text: &str) -> Result<()> {
        self.ensure_open()?;
        view::write_text(&mut self.canvas, &mut self.state, text)?;
        Ok(())
    }

    // ============ 输入 ============

    /// 处理一段终端输入字节，返回期间产生的通知
    pub fn feed(&mut self, bytes: &[u8]) -> Result<Vec<Notice>> {
        self.tick()?;
        self.decoder.push(bytes);

        let mut notices = Vec::new();
        while let Some(action) = self.decoder.next() {
            debug!(?action, "输入事件");
            if let Some(notice) = self.dispatch(action)? {
                notices.push(notice);
            }
            if self.is_closed() {
                break;
            }
        }
        Ok(notices)
    }

    /// 核心逻辑分发
    pub fn dispatch(&mut self, action: Action) -> Result<Option<Notice>> {
        self.ensure_open()?;
        match action {
            Action::MoveUp => self.move_selection(-1)?,
            Action::MoveDown => self.move_selection(1)?,
            Action::Cancel => return self.cancel().map(Some),
            Action::Confirm => return Ok(self.confirm()?.map(Notice::Selected)),
        }
        Ok(None)
    }

    /// 选中项前后移动，首尾相接；没有菜单项时什么也不做
    fn move_selection(&mut self, delta: isize) -> Result<()> {
        let Some(prev) = self.state.selected_index() else {
            return Ok(());
        };
        let Some(next) = self.state.geometry.normalize(prev as isize + delta) else {
            return Ok(());
        };

        self.state.selected = next;
        view::draw_row(&mut self.canvas, &self.state, prev as isize)?;
        view::draw_row(&mut self.canvas, &self.state, next as isize)?;
        Ok(())
    }

    fn cancel(&mut self) -> Result<Notice> {
        debug!("取消选择");
        // 先结束输入，复位失败也不会重放 Cancel 之后的字节
        self.shutdown_input();
        self.canvas.full_reset()?;
        self.canvas.end_session()?;
        Ok(Notice::Closed)
    }

    fn confirm(&mut self) -> Result<Option<Selection>> {
        let (Some(index), Some(last)) = (self.state.selected_index(), self.state.geometry.last_item())
        else {
            return Ok(None);
        };

        self.canvas.move_to(1, last.y.saturating_add(2))?;
        self.canvas.reset_attributes()?;

        let label = self.state.geometry.items[index].label.clone();
        debug!(index, label = %label, "确认选择");

        if let Some(handler) = self.item_handlers.get_mut(&index) {
            handler(&label, index);
        }
        for handler in &mut self.select_handlers {
            handler(&label, index);
        }
        Ok(Some(Selection { label, index }))
    }
}
