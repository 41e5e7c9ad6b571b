//! 入力処理モジュール
//!
//! キー入力と画面別キーマップ

pub mod keybinding;

pub use keybinding::{Action, Key, KeyCode, KeyMap, KeyModifiers, KeyProcessResult, Screen};
