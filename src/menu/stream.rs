//! 双向字节通道
//!
//! 写入的字节作为终端输入交给菜单，读出的是菜单产生的终端输出。
//! 调用方把它接到真实终端的输入输出上即可。

use std::io::{self, Read, Write};

use super::actions::Notice;
use super::state::Menu;

/// 借用菜单的双向流
pub struct MenuStream<'a> {
    menu: &'a mut Menu,
    notices: Vec<Notice>,
}

impl Menu {
    /// 把菜单的输入和输出合成一个双向字节通道
    pub fn stream(&mut self) -> MenuStream<'_> {
        MenuStream {
            menu: self,
            notices: Vec::new(),
        }
    }
}

impl MenuStream<'_> {
    /// 取走写入期间积累的通知
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// 上游输入结束
    pub fn shutdown(&mut self) -> io::Result<()> {
        self.menu.end_input()?;
        self.notices.push(Notice::Closed);
        Ok(())
    }

    pub fn menu(&mut self) -> &mut Menu {
        &mut *self.menu
    }
}

impl Write for MenuStream<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let notices = self.menu.feed(buf)?;
        self.notices.extend(notices);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Read for MenuStream<'_> {
    /// 菜单未关闭而暂时没有输出时返回 `WouldBlock`；关闭且输出取完后返回 0
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let closed = self.menu.is_closed();
        if !closed {
            self.menu.tick()?;
        }

        let out = self.menu.canvas_mut().writer_mut();
        if out.is_empty() && !buf.is_empty() {
            return if closed {
                Ok(0)
            } else {
                Err(io::ErrorKind::WouldBlock.into())
            };
        }

        let n = buf.len().min(out.len());
        buf[..n].copy_from_slice(&out[..n]);
        out.drain(..n);
        Ok(n)
    }
}
