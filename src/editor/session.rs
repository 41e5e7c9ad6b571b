//! ノート作成・編集セッション
//!
//! 入力中の下書きをストアとは別に保持し、キー入力のたびに検証状態を更新する。
//! ストアへの書き込みは save と delete の時だけ行う。

use super::text_field::TextField;
use crate::error::{MemoError, Result};
use crate::note::validation::{self, FieldErrors};
use crate::note::{Note, NoteStore};

/// 編集モード
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// 新規作成（保存時に追加）
    Create,
    /// 既存ノートの編集（保存時に置き換え）
    Edit { index: usize },
}

/// 入力中のフィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
}

/// 編集画面の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    /// 新規作成で未入力
    Empty,
    /// 既存ノートを読み込んだまま未変更
    Prefilled,
    /// 保存可能
    Valid,
    /// 保存不可
    Invalid,
}

/// 保存結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created { index: usize },
    Updated { index: usize },
}

/// 作成・編集画面のモデル
#[derive(Debug, Clone)]
pub struct EditSession {
    mode: EditMode,
    title: TextField,
    description: TextField,
    focus: Field,
    errors: FieldErrors,
    touched: bool,
}

impl EditSession {
    /// 新規作成セッション
    pub fn create() -> Self {
        Self {
            mode: EditMode::Create,
            title: TextField::new(),
            description: TextField::new(),
            focus: Field::Title,
            errors: FieldErrors::default(),
            touched: false,
        }
    }

    /// 既存ノートの編集セッション
    pub fn edit(index: usize, note: &Note) -> Self {
        Self {
            mode: EditMode::Edit { index },
            title: TextField::with_text(note.title.clone()),
            description: TextField::with_text(note.description.clone()),
            focus: Field::Title,
            // エラー表示は入力が行われるまで出さない
            errors: FieldErrors::default(),
            touched: false,
        }
    }

    /// ルートの引数からセッションを作る。インデックス無しは新規作成
    pub fn for_index(store: &NoteStore, index: Option<usize>) -> Result<Self> {
        match index {
            None => Ok(Self::create()),
            Some(index) => {
                let note = store.get(index)?;
                Ok(Self::edit(index, note))
            }
        }
    }

    pub fn target_index(&self) -> Option<usize> {
        match self.mode {
            EditMode::Create => None,
            EditMode::Edit { index } => Some(index),
        }
    }

    pub fn title(&self) -> &TextField {
        &self.title
    }

    pub fn description(&self) -> &TextField {
        &self.description
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn errors(&self) -> FieldErrors {
        self.errors
    }

    /// 保存ボタンが有効か
    pub fn can_save(&self) -> bool {
        validation::validate(self.title.value(), self.description.value()).can_save
    }

    pub fn state(&self) -> FormState {
        if !self.touched {
            return match self.mode {
                EditMode::Create => FormState::Empty,
                EditMode::Edit { .. } => FormState::Prefilled,
            };
        }
        if self.can_save() {
            FormState::Valid
        } else {
            FormState::Invalid
        }
    }

    /// 保存ボタンのラベル
    pub fn save_label(&self) -> &'static str {
        match self.mode {
            EditMode::Create => "Create Note",
            EditMode::Edit { .. } => "Save Changes",
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            Field::Title => Field::Description,
            Field::Description => Field::Title,
        };
    }

    pub fn focus_field(&mut self, field: Field) {
        self.focus = field;
    }

    pub fn insert_char(&mut self, ch: char) {
        self.focused_mut().insert_char(ch);
        self.field_changed();
    }

    pub fn delete_backward(&mut self) {
        if self.focused_mut().delete_backward() {
            self.field_changed();
        }
    }

    pub fn delete_forward(&mut self) {
        if self.focused_mut().delete_forward() {
            self.field_changed();
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.focused_mut().move_left();
    }

    pub fn move_cursor_right(&mut self) {
        self.focused_mut().move_right();
    }

    pub fn move_cursor_home(&mut self) {
        self.focused_mut().move_home();
    }

    pub fn move_cursor_end(&mut self) {
        self.focused_mut().move_end();
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title.set(title);
        self.field_changed();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description.set(description);
        self.field_changed();
    }

    /// 下書きをストアへ確定する
    ///
    /// 保存できない状態では何も変更せず ValidationFailed を返す
    pub fn save(&self, store: &mut NoteStore) -> Result<SaveOutcome> {
        let current = validation::validate(self.title.value(), self.description.value());
        if !current.can_save {
            return Err(MemoError::ValidationFailed(current.errors));
        }

        let note = Note::new(self.title.value(), self.description.value());
        match self.mode {
            EditMode::Create => {
                store.append(note);
                Ok(SaveOutcome::Created {
                    index: store.len() - 1,
                })
            }
            EditMode::Edit { index } => {
                store.replace_at(index, note)?;
                Ok(SaveOutcome::Updated { index })
            }
        }
    }

    /// 編集中のノートを確認なしで削除する。新規作成モードでは何もしない
    pub fn delete(&self, store: &mut NoteStore) -> Result<Option<usize>> {
        match self.mode {
            EditMode::Create => Ok(None),
            EditMode::Edit { index } => {
                store.remove_at(index)?;
                Ok(Some(index))
            }
        }
    }

    fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
        }
    }

    fn field_changed(&mut self) {
        self.touched = true;
        self.errors = FieldErrors {
            title_error: validation::title_error(self.title.value()),
            description_error: validation::description_error(self.description.value()),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    fn type_text(session: &mut EditSession, text: &str) {
        for ch in text.chars() {
            session.insert_char(ch);
        }
    }

    #[test]
    fn create_session_starts_empty() {
        let session = EditSession::create();
        assert_eq!(session.state(), FormState::Empty);
        assert_eq!(session.save_label(), "Create Note");
        assert!(!session.can_save());
    }

    #[test]
    fn state_follows_each_keystroke() {
        let mut session = EditSession::create();

        type_text(&mut session, "Hi");
        assert_eq!(session.state(), FormState::Invalid);
        assert!(session.errors().title_error);

        session.insert_char('!');
        assert!(!session.errors().title_error);
        // 説明が空なのでまだ保存できない
        assert_eq!(session.state(), FormState::Invalid);

        session.focus_next();
        type_text(&mut session, "x");
        assert_eq!(session.state(), FormState::Valid);
    }

    #[test]
    fn clearing_title_hides_error_but_blocks_save() {
        let mut session = EditSession::create();
        type_text(&mut session, "H");
        assert!(session.errors().title_error);

        session.delete_backward();
        session.set_description("body");

        assert!(!session.errors().title_error);
        assert!(!session.can_save());
    }

    #[test]
    fn save_in_create_mode_appends() {
        let mut store = NoteStore::new();
        let mut session = EditSession::create();
        session.set_title("Groceries");
        session.set_description("Milk, eggs");

        let outcome = session.save(&mut store).unwrap();

        assert_eq!(outcome, SaveOutcome::Created { index: 0 });
        assert_eq!(store.get(0).unwrap(), &Note::new("Groceries", "Milk, eggs"));
    }

    #[test]
    fn invalid_save_leaves_store_untouched() {
        let mut store = NoteStore::new();
        let mut session = EditSession::create();
        session.set_title("Hi");
        session.set_description("body");

        let result = session.save(&mut store);

        assert!(matches!(
            result,
            Err(MemoError::ValidationFailed(FieldErrors { title_error: true, .. }))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn edit_mode_prefills_and_replaces() {
        let mut store = NoteStore::new();
        store.append(Note::new("Groceries", "Milk, eggs"));
        store.append(Note::new("Errands", "Post office"));

        let mut session = EditSession::for_index(&store, Some(1)).unwrap();
        assert_eq!(session.state(), FormState::Prefilled);
        assert_eq!(session.save_label(), "Save Changes");
        assert!(session.can_save());

        session.focus_field(Field::Description);
        type_text(&mut session, ", bank");
        let outcome = session.save(&mut store).unwrap();

        assert_eq!(outcome, SaveOutcome::Updated { index: 1 });
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).unwrap().description, "Post office, bank");
    }

    #[test]
    fn edit_session_for_stale_index_fails() {
        let store = NoteStore::new();
        let result = EditSession::for_index(&store, Some(0));
        assert_eq!(
            result.err(),
            Some(MemoError::Store(StoreError::OutOfRange { index: 0, len: 0 }))
        );
    }

    #[test]
    fn delete_ignores_validation_state() {
        let mut store = NoteStore::new();
        store.append(Note::new("Groceries", "Milk, eggs"));
        let mut session = EditSession::edit(0, store.get(0).unwrap());
        session.set_title("");

        assert_eq!(session.delete(&mut store).unwrap(), Some(0));
        assert!(store.is_empty());
    }

    #[test]
    fn delete_in_create_mode_is_noop() {
        let mut store = NoteStore::new();
        store.append(Note::new("Groceries", "Milk, eggs"));

        assert_eq!(EditSession::create().delete(&mut store).unwrap(), None);
        assert_eq!(store.len(), 1);
    }
}
