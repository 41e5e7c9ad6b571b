//! 保存前の検証規則
//!
//! 文字数は Unicode スカラー値単位で数える。
//! 空のタイトルはエラー表示にならないが保存もできない（表示と保存可否が食い違う）。

/// タイトルの最小文字数（空でない場合）
pub const TITLE_MIN_CHARS: usize = 3;
/// タイトルの最大文字数
pub const TITLE_MAX_CHARS: usize = 50;
/// 説明の最大文字数
pub const DESCRIPTION_MAX_CHARS: usize = 120;

pub const TITLE_ERROR_MESSAGE: &str = "Title must be between 3 and 50 characters";
pub const DESCRIPTION_ERROR_MESSAGE: &str = "description cannot exceed 120 characters";

/// フィールド単位のエラーフラグ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub title_error: bool,
    pub description_error: bool,
}

impl FieldErrors {
    /// いずれかのフィールドにエラーがあるか
    pub fn any(&self) -> bool {
        self.title_error || self.description_error
    }

    /// 表示すべきインラインメッセージ
    pub fn messages(&self) -> Vec<&'static str> {
        let mut messages = Vec::with_capacity(2);
        if self.title_error {
            messages.push(TITLE_ERROR_MESSAGE);
        }
        if self.description_error {
            messages.push(DESCRIPTION_ERROR_MESSAGE);
        }
        messages
    }
}

/// 検証結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validation {
    pub errors: FieldErrors,
    pub can_save: bool,
}

/// タイトル長エラー：1文字以上入力済みで [3, 50] の範囲外
pub fn title_error(title: &str) -> bool {
    let len = title.chars().count();
    len > 0 && !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&len)
}

/// 説明長エラー：上限のみ。下限メッセージはない
pub fn description_error(description: &str) -> bool {
    description.chars().count() > DESCRIPTION_MAX_CHARS
}

/// タイトルと説明の組が保存可能かを判定
pub fn validate(title: &str, description: &str) -> Validation {
    let errors = FieldErrors {
        title_error: title_error(title),
        description_error: description_error(description),
    };
    let can_save = !errors.any() && !title.is_empty() && !description.is_empty();

    Validation { errors, can_save }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_boundaries() {
        assert!(!title_error("Tea"));
        assert!(!title_error(&"x".repeat(50)));
        assert!(title_error("Hi"));
        assert!(title_error("H"));
        assert!(title_error(&"x".repeat(51)));
    }

    #[test]
    fn description_boundaries() {
        assert!(!description_error(&"d".repeat(120)));
        assert!(description_error(&"d".repeat(121)));
        assert!(!description_error(""));
    }

    #[test]
    fn empty_title_shows_no_error_but_blocks_save() {
        let validation = validate("", "Milk, eggs");

        assert!(!validation.errors.title_error);
        assert!(validation.errors.messages().is_empty());
        assert!(!validation.can_save);
    }

    #[test]
    fn empty_description_blocks_save_without_message() {
        let validation = validate("Groceries", "");

        assert!(!validation.errors.any());
        assert!(!validation.can_save);
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        // 3文字だが9バイト
        assert!(!title_error("日本語"));
        assert!(title_error("日本"));
        assert!(!description_error(&"é".repeat(120)));
    }

    #[test]
    fn groceries_can_be_saved() {
        let validation = validate("Groceries", "Milk, eggs");
        assert!(validation.can_save);
        assert_eq!(validation.errors, FieldErrors::default());
    }

    #[test]
    fn messages_follow_field_order() {
        let errors = FieldErrors {
            title_error: true,
            description_error: true,
        };
        assert_eq!(
            errors.messages(),
            vec![TITLE_ERROR_MESSAGE, DESCRIPTION_ERROR_MESSAGE]
        );
    }
}
