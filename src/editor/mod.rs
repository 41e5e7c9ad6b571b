//! 編集層
//!
//! 作成・編集画面の下書きと入力フィールド

pub mod session;
pub mod text_field;

pub use session::{EditMode, EditSession, Field, FormState, SaveOutcome};
pub use text_field::TextField;
