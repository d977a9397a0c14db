//! 视图层 (Render)
//!
//! 只依据 `MenuState` 发出绘制指令，从不读取终端内容。每一行在一轮绘制
//! 里最多铺一次空白，之后只覆盖文字。

use std::io;

use tracing::trace;
use unicode_width::UnicodeWidthStr;

use super::state::MenuState;
use crate::terminal::Canvas;

/// 字符串在终端里占的列数（忽略其中的 ANSI 转义序列）
pub fn visual_width(text: &str) -> usize {
    strip_ansi_escapes::strip_str(text).width()
}

/// 标签右侧补齐空白，补齐长度为 `width - 列数 + 1`，不足时为 0
pub fn padded_label(label: &str, width: u16) -> String {
    let pad = (width as usize + 1).saturating_sub(visual_width(label));
    format!("{label}{}", " ".repeat(pad))
}

/// 整行铺空白，本轮内已铺过的行直接跳过
pub fn fill_row<C: Canvas>(canvas: &mut C, state: &mut MenuState, y: u16) -> io::Result<()> {
    if state.painted.contains(&y) {
        return Ok(());
    }

    let width = state.geometry.total_width() as usize;
    canvas.move_to(state.geometry.origin.0, y)?;
    canvas.write_text(&" ".repeat(width))?;
    state.painted.insert(y);
    trace!(row = y, "铺空白");
    Ok(())
}

/// 重绘一个菜单项；下标按菜单项数取模，可以是负数或越界
pub fn draw_row<C: Canvas>(canvas: &mut C, state: &MenuState, index: isize) -> io::Result<()> {
    let Some(index) = state.geometry.normalize(index) else {
        return Ok(());
    };
    let item = &state.geometry.items[index];
    let colors = state.colors;

    canvas.move_to(item.x, item.y)?;

    // 选中项反色显示
    if state.selected_index() == Some(index) {
        canvas.set_background(colors.fg)?;
        canvas.set_foreground(colors.bg)?;
    } else {
        canvas.set_background(colors.bg)?;
        canvas.set_foreground(colors.fg)?;
    }

    canvas.write_text(&padded_label(&item.label, state.geometry.width))
}

/// 完整绘制：上留白、所有菜单项、下留白
pub fn full_draw<C: Canvas>(canvas: &mut C, state: &mut MenuState) -> io::Result<()> {
    for y in state.geometry.top_rows() {
        fill_row(canvas, state, y)?;
    }

    for index in 0..state.item_count() {
        draw_row(canvas, state, index as isize)?;
    }

    canvas.set_background(state.colors.bg)?;
    canvas.set_foreground(state.colors.fg)?;

    for y in state.geometry.bottom_rows() {
        fill_row(canvas, state, y)?;
    }
    Ok(())
}

/// 在追加位置输出自由文本，可以跨多行；之后添加的菜单项出现在文本下方
pub fn write_text<C: Canvas>(canvas: &mut C, state: &mut MenuState, text: &str) -> io::Result<()> {
    canvas.set_background(state.colors.bg)?;
    canvas.set_foreground(state.colors.fg)?;
    fill_row(canvas, state, state.geometry.y)?;

    let mut lines = text.split('\n').peekable();
    while let Some(line) = lines.next() {
        if !line.is_empty() {
            canvas.move_to(state.geometry.x, state.geometry.y)?;
            canvas.write_text(line)?;
        }
        if lines.peek().is_some() {
            state.geometry.x = state.geometry.start().0;
            state.geometry.y = state.geometry.y.saturating_add(1);
            fill_row(canvas, state, state.geometry.y)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MenuConfig;
    use crate::models::Padding;
    use crate::terminal::recording::{Op, RecordingCanvas};
    use crossterm::style::Color;

    fn state_with(labels: &[&str]) -> MenuState {
        let config = MenuConfig {
            width: 10,
            ..MenuConfig::default()
        };
        let mut state = MenuState::new(&config);
        for label in labels {
            state.geometry.add_item(*label);
        }
        state
    }

    #[test]
    fn test_label_padding() {
        assert_eq!(padded_label("Hi", 10), format!("Hi{}", " ".repeat(9)));
        // 宽字符占两列
        assert_eq!(padded_label("你好", 4), "你好 ");
        assert_eq!(padded_label("much too long", 4), "much too long");
    }

    #[test]
    fn test_visual_width_ignores_escapes() {
        assert_eq!(visual_width("\x1b[31mred\x1b[0m"), 3);
        assert_eq!(visual_width("日本"), 4);
    }

    #[test]
    fn test_fill_row_once_per_epoch() {
        let mut canvas = RecordingCanvas::default();
        let mut state = state_with(&[]);

        fill_row(&mut canvas, &mut state, 5).unwrap();
        fill_row(&mut canvas, &mut state, 5).unwrap();
        assert_eq!(
            canvas.ops,
            vec![Op::MoveTo(1, 5), Op::Text(" ".repeat(14))]
        );

        state.painted.clear();
        fill_row(&mut canvas, &mut state, 5).unwrap();
        assert_eq!(canvas.texts().len(), 2);
    }

    #[test]
    fn test_draw_row_inverts_selected() {
        let mut canvas = RecordingCanvas::default();
        let mut state = state_with(&["A", "B"]);
        state.selected = 1;

        draw_row(&mut canvas, &state, 1).unwrap();
        draw_row(&mut canvas, &state, 0).unwrap();
        assert_eq!(
            canvas.ops,
            vec![
                Op::MoveTo(3, 3),
                Op::Bg(Color::White),
                Op::Fg(Color::Blue),
                Op::Text(padded_label("B", 10)),
                Op::MoveTo(3, 2),
                Op::Bg(Color::Blue),
                Op::Fg(Color::White),
                Op::Text(padded_label("A", 10)),
            ]
        );
    }

    #[test]
    fn test_draw_row_wraps_index() {
        let mut canvas = RecordingCanvas::default();
        let state = state_with(&["A", "B", "C"]);

        draw_row(&mut canvas, &state, -1).unwrap();
        assert_eq!(canvas.ops[0], Op::MoveTo(3, 4));

        let empty = state_with(&[]);
        canvas.clear();
        draw_row(&mut canvas, &empty, 0).unwrap();
        assert!(canvas.ops.is_empty());
    }

    #[test]
    fn test_full_draw_rows() {
        let mut canvas = RecordingCanvas::default();
        let mut state = state_with(&["A", "B"]);

        full_draw(&mut canvas, &mut state).unwrap();

        let moves: Vec<_> = canvas
            .ops
            .iter()
            .filter(|op| matches!(op, Op::MoveTo(..)))
            .cloned()
            .collect();
        assert_eq!(
            moves,
            vec![Op::MoveTo(1, 1), Op::MoveTo(3, 2), Op::MoveTo(3, 3), Op::MoveTo(1, 4)]
        );
        assert!(state.painted.contains(&1));
        assert!(state.painted.contains(&4));
    }

    #[test]
    fn test_write_multiline_advances_cursor() {
        let mut canvas = RecordingCanvas::default();
        let config = MenuConfig {
            width: 10,
            padding: Padding::uniform(1),
            ..MenuConfig::default()
        };
        let mut state = MenuState::new(&config);

        write_text(&mut canvas, &mut state, "one\n\nthree").unwrap();

        assert_eq!((state.geometry.x, state.geometry.y), (2, 4));
        assert_eq!(state.painted.len(), 3);
        assert!(canvas.ops.contains(&Op::Text("one".to_string())));
        assert!(canvas.ops.contains(&Op::Text("three".to_string())));
        assert!(canvas.ops.contains(&Op::MoveTo(2, 4)));

        let index = state.geometry.add_item("A");
        assert_eq!(state.geometry.items[index].y, 4);
    }
}
