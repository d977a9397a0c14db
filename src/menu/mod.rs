//! 菜单模块
//!
//! 采用 MVI (Model-View-Intent) 架构：
//! - Model (state.rs): Menu 结构体及其绘制状态
//! - View (view.rs): 依据状态发出最少的绘制指令
//! - Intent (actions.rs, input.rs): 终端字节解码为语义化的 Action
//! - Update (logic.rs): 公开操作与事件分发

pub mod actions;
pub mod input;
pub mod logic;
pub mod state;
pub mod stream;
pub mod view;

// Re-export for convenience
pub use actions::{Action, Notice, Selection};
pub use input::InputDecoder;
pub use logic::JumpTarget;
pub use state::{Menu, MenuState, Phase};
pub use stream::MenuStream;
