//! 単一行テキストフィールド
//!
//! カーソル位置は文字単位で保持し、描画時の表示幅は unicode-width で求める

use unicode_width::UnicodeWidthChar;

/// 編集中の1行入力
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    text: String,
    /// 文字単位のカーソル位置
    cursor: usize,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期値を持つフィールドを作成（カーソルは末尾）
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// 文字数
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// 内容を置き換える
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.char_len();
    }

    /// カーソル位置に文字を挿入
    pub fn insert_char(&mut self, ch: char) {
        let byte_pos = self.byte_offset(self.cursor);
        self.text.insert(byte_pos, ch);
        self.cursor += 1;
    }

    /// カーソル前の文字を削除
    pub fn delete_backward(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let byte_pos = self.byte_offset(self.cursor - 1);
        self.text.remove(byte_pos);
        self.cursor -= 1;
        true
    }

    /// カーソル位置の文字を削除
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let byte_pos = self.byte_offset(self.cursor);
        self.text.remove(byte_pos);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// カーソルより前の表示幅（全角は2カラム）
    pub fn display_width_before_cursor(&self) -> usize {
        self.text
            .chars()
            .take(self.cursor)
            .map(|ch| ch.width().unwrap_or(0))
            .sum()
    }

    fn byte_offset(&self, char_pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_pos)
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len())
    }
}
