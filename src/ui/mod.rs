//! 表示層
//!
//! レイアウト、テーマ、画面描画

pub mod layout;
pub mod renderer;
pub mod theme;

pub use layout::{AreaType, LayoutManager};
pub use renderer::{NoteRenderer, ScreenView, StatusLineInfo};
pub use theme::{ComponentType, Theme, ThemeType};
