//! キーバインドシステム
//!
//! 画面ごとのキーマップでキー入力をアクションへ変換する

use crossterm::event::{KeyCode as CrosstermKeyCode, KeyEvent, KeyEventKind, KeyModifiers as CrosstermModifiers};
use std::collections::HashMap;

/// キー入力の内部表現
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    /// 修飾キー
    pub modifiers: KeyModifiers,
    /// 基本キー
    pub code: KeyCode,
}

/// 修飾キーの組み合わせ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

/// 基本キーコード
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Esc,
    Unknown,
}

impl Key {
    /// 修飾キーなしのキー
    pub fn plain(code: KeyCode) -> Self {
        Self {
            modifiers: KeyModifiers::default(),
            code,
        }
    }

    /// 修飾キーなしの文字キー
    pub fn char(ch: char) -> Self {
        Self::plain(KeyCode::Char(ch))
    }

    pub fn ctrl(ch: char) -> Self {
        Self {
            modifiers: KeyModifiers {
                ctrl: true,
                ..KeyModifiers::default()
            },
            code: KeyCode::Char(ch),
        }
    }

    /// 文字列表現からパース（`C-s`, `M-x`, `Enter` など）
    pub fn parse(s: &str) -> Result<Self, KeyParseError> {
        if s.is_empty() {
            return Err(KeyParseError::EmptySequence);
        }

        let mut modifiers = KeyModifiers::default();
        let mut remaining = s;

        // 修飾キーの解析
        loop {
            if let Some(rest) = remaining.strip_prefix("C-") {
                modifiers.ctrl = true;
                remaining = rest;
            } else if let Some(rest) = remaining.strip_prefix("M-") {
                modifiers.alt = true;
                remaining = rest;
            } else if let Some(rest) = remaining.strip_prefix("S-") {
                modifiers.shift = true;
                remaining = rest;
            } else {
                break;
            }
        }

        let code = match remaining {
            "Enter" => KeyCode::Enter,
            "Backspace" => KeyCode::Backspace,
            "Delete" => KeyCode::Delete,
            "Tab" => KeyCode::Tab,
            "BackTab" => KeyCode::BackTab,
            "Up" => KeyCode::Up,
            "Down" => KeyCode::Down,
            "Left" => KeyCode::Left,
            "Right" => KeyCode::Right,
            "Home" => KeyCode::Home,
            "End" => KeyCode::End,
            "Esc" => KeyCode::Esc,
            "" => return Err(KeyParseError::InvalidFormat(s.to_string())),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => KeyCode::Char(ch),
                    _ => return Err(KeyParseError::UnknownKey(other.to_string())),
                }
            }
        };

        Ok(Key { modifiers, code })
    }

    /// 挿入可能な文字かどうかを判定
    pub fn is_insertable_char(&self) -> bool {
        matches!(self.code, KeyCode::Char(ch) if !ch.is_control())
            && !self.modifiers.ctrl
            && !self.modifiers.alt
    }

    pub fn as_char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(ch) => Some(ch),
            _ => None,
        }
    }
}

/// crossterm統合
impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        let mut modifiers = KeyModifiers {
            ctrl: event.modifiers.contains(CrosstermModifiers::CONTROL),
            alt: event.modifiers.contains(CrosstermModifiers::ALT),
            shift: event.modifiers.contains(CrosstermModifiers::SHIFT),
        };

        let code = match event.code {
            CrosstermKeyCode::Char(c) => {
                // 大文字は文字そのものが表すので SHIFT を落とす
                modifiers.shift = false;
                KeyCode::Char(c)
            }
            CrosstermKeyCode::Enter => KeyCode::Enter,
            CrosstermKeyCode::Backspace => KeyCode::Backspace,
            CrosstermKeyCode::Delete => KeyCode::Delete,
            CrosstermKeyCode::Tab => KeyCode::Tab,
            CrosstermKeyCode::BackTab => {
                modifiers.shift = false;
                KeyCode::BackTab
            }
            CrosstermKeyCode::Up => KeyCode::Up,
            CrosstermKeyCode::Down => KeyCode::Down,
            CrosstermKeyCode::Left => KeyCode::Left,
            CrosstermKeyCode::Right => KeyCode::Right,
            CrosstermKeyCode::Home => KeyCode::Home,
            CrosstermKeyCode::End => KeyCode::End,
            CrosstermKeyCode::Esc => KeyCode::Esc,
            _ => KeyCode::Unknown,
        };

        Key { modifiers, code }
    }
}

/// キーマップを選ぶための画面種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    List,
    Detail,
    Edit,
}

/// アクション定義
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// 一覧の選択移動
    SelectPrevious,
    SelectNext,
    /// 選択中のノート詳細を開く
    OpenSelected,
    /// 新規作成画面を開く
    CreateNote,
    /// 詳細画面から編集画面を開く
    EditNote,
    /// 前の画面へ戻る
    Back,
    /// 入力フィールド操作
    InsertChar(char),
    DeleteBackward,
    DeleteForward,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    NextField,
    PreviousField,
    /// 保存（検証を通った場合のみ反映）
    Save,
    /// 編集中のノートを削除
    DeleteNote,
    /// 下書きを破棄して戻る
    Cancel,
    /// アプリケーション終了
    Quit,
}

/// キー処理結果
#[derive(Debug, Clone, PartialEq)]
pub enum KeyProcessResult {
    /// アクション実行
    Action(Action),
    /// マッチしない
    NoMatch,
}

/// 画面別キーマップ
pub struct KeyMap {
    bindings: HashMap<Screen, HashMap<Key, Action>>,
}

impl KeyMap {
    /// 標準キーバインドでキーマップを作成
    pub fn new() -> Self {
        let mut keymap = Self {
            bindings: HashMap::with_capacity(3),
        };
        keymap.register_default_bindings();
        keymap
    }

    fn register_default_bindings(&mut self) {
        let list = [
            ("Up", Action::SelectPrevious),
            ("k", Action::SelectPrevious),
            ("C-p", Action::SelectPrevious),
            ("Down", Action::SelectNext),
            ("j", Action::SelectNext),
            ("C-n", Action::SelectNext),
            ("Enter", Action::OpenSelected),
            ("a", Action::CreateNote),
            ("n", Action::CreateNote),
            ("q", Action::Quit),
            ("C-q", Action::Quit),
        ];
        let detail = [
            ("e", Action::EditNote),
            ("Esc", Action::Back),
            ("b", Action::Back),
            ("Backspace", Action::Back),
            ("q", Action::Quit),
            ("C-q", Action::Quit),
        ];
        let edit = [
            ("Backspace", Action::DeleteBackward),
            ("Delete", Action::DeleteForward),
            ("Left", Action::CursorLeft),
            ("C-b", Action::CursorLeft),
            ("Right", Action::CursorRight),
            ("C-f", Action::CursorRight),
            ("Home", Action::CursorHome),
            ("C-a", Action::CursorHome),
            ("End", Action::CursorEnd),
            ("C-e", Action::CursorEnd),
            ("Tab", Action::NextField),
            ("Down", Action::NextField),
            ("BackTab", Action::PreviousField),
            ("Up", Action::PreviousField),
            ("Enter", Action::Save),
            ("C-s", Action::Save),
            ("C-d", Action::DeleteNote),
            ("Esc", Action::Cancel),
            ("C-g", Action::Cancel),
            ("C-q", Action::Quit),
        ];

        for (screen, table) in [
            (Screen::List, &list[..]),
            (Screen::Detail, &detail[..]),
            (Screen::Edit, &edit[..]),
        ] {
            for (sequence, action) in table {
                if let Err(err) = self.bind(screen, sequence, action.clone()) {
                    log::error!("invalid default binding {}: {}", sequence, err);
                }
            }
        }
    }

    /// キーバインドを追加（既存のものは上書き）
    pub fn bind(&mut self, screen: Screen, key: &str, action: Action) -> Result<(), KeyParseError> {
        let key = Key::parse(key)?;
        self.bindings.entry(screen).or_default().insert(key, action);
        Ok(())
    }

    /// キー入力を処理してアクションを返す
    pub fn process_key(&self, screen: Screen, key: &Key) -> KeyProcessResult {
        if let Some(action) = self.bindings.get(&screen).and_then(|table| table.get(key)) {
            return KeyProcessResult::Action(action.clone());
        }

        // 編集画面では通常文字を挿入
        if screen == Screen::Edit && key.is_insertable_char() {
            if let Some(ch) = key.as_char() {
                return KeyProcessResult::Action(Action::InsertChar(ch));
            }
        }

        // マッチしない場合はサイレント無視
        KeyProcessResult::NoMatch
    }

    /// crossterm のイベントを処理（キーリリースは無視）
    pub fn process_event(&self, screen: Screen, event: KeyEvent) -> KeyProcessResult {
        if event.kind == KeyEventKind::Release {
            return KeyProcessResult::NoMatch;
        }
        self.process_key(screen, &Key::from(event))
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new()
    }
}

/// キーパースエラー
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("Invalid key sequence format: {0}")]
    InvalidFormat(String),

    #[error("Unknown key: {0}")]
    UnknownKey(String),

    #[error("Empty key sequence")]
    EmptySequence,
}
