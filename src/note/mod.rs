//! ノートデータ層
//!
//! ノートのレコード型、順序付きストア、保存前の検証規則

pub mod store;
pub mod validation;

pub use store::NoteStore;
pub use validation::{
    validate, FieldErrors, Validation, DESCRIPTION_ERROR_MESSAGE, DESCRIPTION_MAX_CHARS, TITLE_ERROR_MESSAGE,
    TITLE_MAX_CHARS, TITLE_MIN_CHARS,
};

/// タイトルと説明の2フィールドだけを持つノート
///
/// 識別子は持たず、ストア内の位置がそのまま識別子になる
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Note {
    pub title: String,
    pub description: String,
}

impl Note {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}
