//! 终端绘制能力
//!
//! 菜单只通过 [`Canvas`] 发出抽象的绘制指令，真正的转义序列由实现者负责。
//! 坐标从 1 开始，与终端的 CUP 约定一致。

use std::fmt;
use std::io::{self, Write};

use crossterm::{
    Command, cursor, queue,
    style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
};

/// 抽象的终端绘制接口
pub trait Canvas {
    fn move_to(&mut self, x: u16, y: u16) -> io::Result<()>;
    fn set_foreground(&mut self, color: Color) -> io::Result<()>;
    fn set_background(&mut self, color: Color) -> io::Result<()>;
    fn write_text(&mut self, text: &str) -> io::Result<()>;
    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()>;
    fn reset_attributes(&mut self) -> io::Result<()>;
    /// 高亮（粗体）显示
    fn set_bright(&mut self) -> io::Result<()>;
    /// 整个终端复位
    fn full_reset(&mut self) -> io::Result<()>;
    /// 结束绘制会话，之后不再有输出
    fn end_session(&mut self) -> io::Result<()>;
}

/// RIS：终端硬复位
#[derive(Debug, Clone, Copy)]
struct ResetTerminal;

impl Command for ResetTerminal {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        f.write_str("\x1bc")
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> io::Result<()> {
        Ok(())
    }
}

/// 基于 crossterm 的实现，把转义序列写进任意 `Write`
#[derive(Debug)]
pub struct AnsiCanvas<W: Write> {
    out: W,
    ended: bool,
}

impl<W: Write> AnsiCanvas<W> {
    pub fn new(out: W) -> Self {
        Self { out, ended: false }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Canvas for AnsiCanvas<W> {
    fn move_to(&mut self, x: u16, y: u16) -> io::Result<()> {
        // crossterm 的坐标从 0 开始
        queue!(
            self.out,
            cursor::MoveTo(x.saturating_sub(1), y.saturating_sub(1))
        )
    }

    fn set_foreground(&mut self, color: Color) -> io::Result<()> {
        queue!(self.out, SetForegroundColor(color))
    }

    fn set_background(&mut self, color: Color) -> io::Result<()> {
        queue!(self.out, SetBackgroundColor(color))
    }

    fn write_text(&mut self, text: &str) -> io::Result<()> {
        queue!(self.out, Print(text))
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        if visible {
            queue!(self.out, cursor::Show)
        } else {
            queue!(self.out, cursor::Hide)
        }
    }

    fn reset_attributes(&mut self) -> io::Result<()> {
        queue!(self.out, SetAttribute(Attribute::Reset))
    }

    fn set_bright(&mut self) -> io::Result<()> {
        queue!(self.out, SetAttribute(Attribute::Bold))
    }

    fn full_reset(&mut self) -> io::Result<()> {
        queue!(self.out, ResetTerminal)
    }

    fn end_session(&mut self) -> io::Result<()> {
        self.ended = true;
        self.out.flush()
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    /// 测试用：记录每一条绘制指令
    #[derive(Debug, Clone, PartialEq)]
    pub enum Op {
        MoveTo(u16, u16),
        Fg(Color),
        Bg(Color),
        Text(String),
        CursorVisible(bool),
        ResetAttributes,
        Bright,
        FullReset,
        EndSession,
    }

    #[derive(Debug, Default)]
    pub struct RecordingCanvas {
        pub ops: Vec<Op>,
        /// 为 true 时属性类指令返回错误
        pub fail_attributes: bool,
        /// 为 true 时 full_reset 返回错误
        pub fail_full_reset: bool,
        /// 接下来这么多次 set_cursor_visible 返回错误
        pub fail_cursor: usize,
    }

    impl RecordingCanvas {
        pub fn texts(&self) -> Vec<&str> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Text(t) => Some(t.as_str()),
                    _ => None,
                })
                .collect()
        }

        pub fn clear(&mut self) {
            self.ops.clear();
        }
    }

    impl Canvas for RecordingCanvas {
        fn move_to(&mut self, x: u16, y: u16) -> io::Result<()> {
            self.ops.push(Op::MoveTo(x, y));
            Ok(())
        }

        fn set_foreground(&mut self, color: Color) -> io::Result<()> {
            self.ops.push(Op::Fg(color));
            Ok(())
        }

        fn set_background(&mut self, color: Color) -> io::Result<()> {
            self.ops.push(Op::Bg(color));
            Ok(())
        }

        fn write_text(&mut self, text: &str) -> io::Result<()> {
            self.ops.push(Op::Text(text.to_string()));
            Ok(())
        }

        fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
            if self.fail_cursor > 0 {
                self.fail_cursor -= 1;
                return Err(io::Error::other("cursor unsupported"));
            }
            self.ops.push(Op::CursorVisible(visible));
            Ok(())
        }

        fn reset_attributes(&mut self) -> io::Result<()> {
            if self.fail_attributes {
                return Err(io::Error::other("attributes unsupported"));
            }
            self.ops.push(Op::ResetAttributes);
            Ok(())
        }

        fn set_bright(&mut self) -> io::Result<()> {
            if self.fail_attributes {
                return Err(io::Error::other("attributes unsupported"));
            }
            self.ops.push(Op::Bright);
            Ok(())
        }

        fn full_reset(&mut self) -> io::Result<()> {
            if self.fail_full_reset {
                return Err(io::Error::other("reset unsupported"));
            }
            self.ops.push(Op::FullReset);
            Ok(())
        }

        fn end_session(&mut self) -> io::Result<()> {
            self.ops.push(Op::EndSession);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_to_is_one_based() {
        let mut canvas = AnsiCanvas::new(Vec::new());
        canvas.move_to(3, 2).unwrap();
        assert_eq!(canvas.writer().as_slice(), b"\x1b[2;3H");
    }

    #[test]
    fn test_full_reset_emits_ris() {
        let mut canvas = AnsiCanvas::new(Vec::new());
        canvas.full_reset().unwrap();
        canvas.write_text("hi").unwrap();
        assert_eq!(canvas.writer().as_slice(), b"\x1bchi");
    }

    #[test]
    fn test_end_session_marks_ended() {
        let mut canvas = AnsiCanvas::new(Vec::new());
        assert!(!canvas.is_ended());
        canvas.end_session().unwrap();
        assert!(canvas.is_ended());
    }
}
