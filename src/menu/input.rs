//! 原始字节解码 (Input -> Action)
//!
//! 每次只看缓冲区开头：按固定优先级（上移 > 下移 > 取消 > 确认）逐条比对
//! 前缀表，命中就消费对应的字节数；都不命中则丢弃一个字节。

use std::collections::VecDeque;

use tracing::trace;

use super::actions::Action;

/// 前缀绑定：命中时消费整个前缀
struct Binding {
    prefix: &'static [u8],
    action: Action,
}

const ESC: u8 = 0x1b;

/// 按优先级排列
const BINDINGS: &[Binding] = &[
    // 上移：方向键（CSI / SS3）、k、^P
    Binding { prefix: &[ESC, b'[', b'A'], action: Action::MoveUp },
    Binding { prefix: &[ESC, b'O', b'A'], action: Action::MoveUp },
    Binding { prefix: b"k", action: Action::MoveUp },
    Binding { prefix: &[0x10], action: Action::MoveUp },
    // 下移：方向键、j、^N
    Binding { prefix: &[ESC, b'[', b'B'], action: Action::MoveDown },
    Binding { prefix: &[ESC, b'O', b'B'], action: Action::MoveDown },
    Binding { prefix: b"j", action: Action::MoveDown },
    Binding { prefix: &[0x0e], action: Action::MoveDown },
    // 取消：^C、q
    Binding { prefix: &[0x03], action: Action::Cancel },
    Binding { prefix: b"q", action: Action::Cancel },
    // 确认：CR、LF
    Binding { prefix: b"\r", action: Action::Confirm },
    Binding { prefix: b"\n", action: Action::Confirm },
];

/// 对一段字节的开头做一次匹配，返回事件和应消费的字节数
pub fn match_prefix(bytes: &[u8]) -> Option<(Action, usize)> {
    BINDINGS
        .iter()
        .find(|b| bytes.starts_with(b.prefix))
        .map(|b| (b.action, b.prefix.len()))
}

/// 一步解码的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    Action(Action, usize),
    /// 无法识别，丢弃开头的一个字节
    Dropped(u8),
}

/// 流式解码器
#[derive(Debug, Default)]
pub struct InputDecoder {
    buf: VecDeque<u8>,
}

impl InputDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bytes: &[u8]) {
        self.buf.extend(bytes);
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// 丢弃尚未处理的字节
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// 解码一步；缓冲区为空时返回 `None`
    pub fn next_step(&mut self) -> Option<Decoded> {
        let front = *self.buf.front()?;
        let bytes = self.buf.make_contiguous();

        match match_prefix(bytes) {
            Some((action, consumed)) => {
                self.buf.drain(..consumed);
                Some(Decoded::Action(action, consumed))
            }
            None => {
                self.buf.pop_front();
                trace!(byte = front, "丢弃无法识别的字节");
                Some(Decoded::Dropped(front))
            }
        }
    }
}

impl Iterator for InputDecoder {
    type Item = Action;

    /// 跳过被丢弃的字节，只产出事件
    fn next(&mut self) -> Option<Action> {
        loop {
            match self.next_step()? {
                Decoded::Action(action, _) => return Some(action),
                Decoded::Dropped(_) => continue,
            }
        }
    }
}
