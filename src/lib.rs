//! memocho - terminal note pad
//!
//! メモリ上のノート一覧を一覧・詳細・作成編集の3画面で操作する

// コアモジュール
pub mod app;
pub mod config;
pub mod error;
pub mod frontend;
pub mod logging;

// データ層
pub mod note;

// 編集層
pub mod editor;

// ロジック層
pub mod input;
pub mod navigation;

// 表示層
pub mod ui;

// 公開API
pub use app::App;
pub use error::{MemoError, Result};
pub use frontend::TuiApplication;
pub use note::{Note, NoteStore};
