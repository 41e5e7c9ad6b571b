//! メインアプリケーション構造体
//!
//! ノートストアの唯一の所有者。画面遷移スタックと編集中セッションを管理し、
//! キー入力から得たアクションを各画面の操作へ振り分ける

use crate::config::AppConfig;
use crate::editor::{EditSession, SaveOutcome};
use crate::error::{ErrorDisplay, ErrorLevel, MemoError, Result};
use crate::input::{Action, KeyMap, KeyProcessResult, Screen};
use crate::navigation::{Navigator, Route};
use crate::note::{Note, NoteStore};
use crate::ui::{ScreenView, StatusLineInfo};
use crossterm::event::KeyEvent;

/// メインアプリケーション構造体
pub struct App {
    /// アプリケーション実行状態
    running: bool,
    config: AppConfig,
    /// ノートストア（プロセス終了で破棄）
    store: NoteStore,
    navigator: Navigator,
    /// 作成・編集画面の下書き
    session: Option<EditSession>,
    /// 一覧画面の選択行
    selected: Option<usize>,
    keymap: KeyMap,
    /// ステータスラインのメッセージ
    status: Option<ErrorDisplay>,
}

impl App {
    /// 既定設定でアプリケーションを作成
    pub fn new() -> Result<Self> {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Result<Self> {
        log::info!("memocho {} starting", env!("CARGO_PKG_VERSION"));
        Ok(Self {
            running: true,
            config,
            store: NoteStore::new(),
            navigator: Navigator::new(),
            session: None,
            selected: None,
            keymap: KeyMap::new(),
            status: None,
        })
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// アプリケーションを終了状態にする
    pub fn shutdown(&mut self) {
        log::info!("shutting down with {} notes discarded", self.store.len());
        self.running = false;
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn current_route(&self) -> Route {
        self.navigator.current()
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn status_message(&self) -> Option<&ErrorDisplay> {
        self.status.as_ref()
    }

    /// 現在の画面種別
    pub fn screen(&self) -> Screen {
        match self.navigator.current() {
            Route::NoteList => Screen::List,
            Route::NoteDetail { .. } => Screen::Detail,
            Route::EditNote { .. } => Screen::Edit,
        }
    }

    /// 描画用のビュー
    pub fn screen_view(&self) -> ScreenView<'_> {
        let list = ScreenView::List {
            notes: &self.store,
            selected: self.selected,
        };
        match self.navigator.current() {
            Route::NoteList => list,
            Route::NoteDetail { index } => match self.store.get(index) {
                Ok(note) => ScreenView::Detail { index, note },
                Err(err) => {
                    log::error!("detail route points at missing note: {}", err);
                    list
                }
            },
            Route::EditNote { .. } => match &self.session {
                Some(session) => ScreenView::Edit { session },
                None => list,
            },
        }
    }

    pub fn status_info(&self) -> StatusLineInfo<'_> {
        StatusLineInfo {
            route: self.navigator.current().to_string(),
            note_count: self.store.len(),
            message: self.status.as_ref(),
        }
    }

    /// 期限切れのメッセージを消去
    pub fn process_status_timer(&mut self) {
        if self.status.as_ref().is_some_and(ErrorDisplay::is_expired) {
            self.status = None;
        }
    }

    /// キーイベントを処理
    pub fn handle_key_event(&mut self, event: KeyEvent) -> Result<()> {
        match self.keymap.process_event(self.screen(), event) {
            KeyProcessResult::Action(action) => self.handle_action(action),
            KeyProcessResult::NoMatch => Ok(()),
        }
    }

    /// アクションを実行
    ///
    /// 範囲外インデックス・検証失敗・遷移失敗はステータスに表示して処理を続ける
    pub fn handle_action(&mut self, action: Action) -> Result<()> {
        match self.dispatch(action) {
            Ok(()) => Ok(()),
            Err(err @ (MemoError::Store(_) | MemoError::ValidationFailed(_) | MemoError::Navigation(_))) => {
                self.report_error(err);
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    fn dispatch(&mut self, action: Action) -> Result<()> {
        match action {
            Action::SelectPrevious => self.move_selection(-1),
            Action::SelectNext => self.move_selection(1),
            Action::OpenSelected => {
                if let Some(index) = self.selected {
                    self.open_detail(index)?;
                }
            }
            Action::CreateNote => self.open_create()?,
            Action::EditNote => {
                if let Route::NoteDetail { index } = self.navigator.current() {
                    self.open_edit(index)?;
                }
            }
            Action::Back => self.back(),
            Action::InsertChar(ch) => self.with_session(|session| session.insert_char(ch)),
            Action::DeleteBackward => self.with_session(EditSession::delete_backward),
            Action::DeleteForward => self.with_session(EditSession::delete_forward),
            Action::CursorLeft => self.with_session(EditSession::move_cursor_left),
            Action::CursorRight => self.with_session(EditSession::move_cursor_right),
            Action::CursorHome => self.with_session(EditSession::move_cursor_home),
            Action::CursorEnd => self.with_session(EditSession::move_cursor_end),
            Action::NextField | Action::PreviousField => self.with_session(EditSession::focus_next),
            Action::Save => {
                self.save()?;
            }
            Action::DeleteNote => self.delete()?,
            Action::Cancel => self.cancel(),
            Action::Quit => self.shutdown(),
        }
        Ok(())
    }

    /// ルート文字列で遷移
    pub fn navigate_to(&mut self, route: &str) -> Result<()> {
        let route = Route::parse(route)?;
        self.navigate(route)
    }

    /// ルートへ遷移する。ノート位置は遷移前に検証する
    pub fn navigate(&mut self, route: Route) -> Result<()> {
        match route {
            Route::NoteList => {}
            Route::NoteDetail { index } => {
                self.store.get(index)?;
                log::debug!("Navigating to note detail with index: {}", index);
            }
            Route::EditNote { index } => {
                self.session = Some(EditSession::for_index(&self.store, index)?);
                match index {
                    None => log::debug!("Navigating to create note screen"),
                    Some(index) => log::debug!("Navigating to edit note screen with index: {}", index),
                }
            }
        }
        self.navigator.navigate(route);
        Ok(())
    }

    /// 作成画面を開く
    pub fn open_create(&mut self) -> Result<()> {
        self.navigate(Route::EditNote { index: None })
    }

    /// 詳細画面を開く
    pub fn open_detail(&mut self, index: usize) -> Result<()> {
        self.navigate(Route::NoteDetail { index })
    }

    /// 編集画面を開く
    pub fn open_edit(&mut self, index: usize) -> Result<()> {
        self.navigate(Route::EditNote { index: Some(index) })
    }

    /// 前の画面へ戻る。一覧画面では何もしない
    pub fn back(&mut self) {
        if self.navigator.pop_back_stack().is_ok() {
            self.session = None;
            self.restore_session();
        }
    }

    /// 下書きを保存して前の画面へ戻る
    ///
    /// 保存できない状態ではストアも画面も変わらない
    pub fn save(&mut self) -> Result<Option<SaveOutcome>> {
        let Some(session) = self.session.as_ref() else {
            return Ok(None);
        };

        let outcome = session.save(&mut self.store)?;
        let message = match outcome {
            SaveOutcome::Created { index } => {
                self.selected = Some(index);
                "Note created"
            }
            SaveOutcome::Updated { .. } => "Changes saved",
        };
        self.status = Some(ErrorDisplay::with_level(message, ErrorLevel::Info));
        self.back();
        Ok(Some(outcome))
    }

    /// 編集中のノートを削除して戻る
    pub fn delete(&mut self) -> Result<()> {
        let Some(session) = self.session.as_ref() else {
            return Ok(());
        };

        if let Some(index) = session.delete(&mut self.store)? {
            self.session = None;
            self.navigator.note_removed(index);
            self.selection_after_removal(index);
            self.restore_session();
            self.status = Some(ErrorDisplay::with_level("Note deleted", ErrorLevel::Info));
        }
        Ok(())
    }

    /// 下書きを破棄して戻る
    pub fn cancel(&mut self) {
        if self.session.is_some() {
            log::debug!("edit cancelled, draft discarded");
        }
        self.back();
    }

    /// 入力中フィールドへの操作
    fn with_session(&mut self, edit: impl FnOnce(&mut EditSession)) {
        if let Some(session) = self.session.as_mut() {
            edit(session);
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.store.len();
        if len == 0 {
            self.selected = None;
            return;
        }
        let next = match self.selected {
            None => 0,
            Some(current) => current.saturating_add_signed(delta).min(len - 1),
        };
        self.selected = Some(next);
    }

    /// 削除位置より後ろの選択は1つ前へずらし、範囲内に収める
    fn selection_after_removal(&mut self, removed: usize) {
        let len = self.store.len();
        self.selected = match self.selected {
            _ if len == 0 => None,
            Some(current) if current > removed => Some((current - 1).min(len - 1)),
            Some(current) => Some(current.min(len - 1)),
            None => None,
        };
    }

    /// 戻った先が編集画面ならセッションを作り直す
    fn restore_session(&mut self) {
        if let Route::EditNote { index } = self.navigator.current() {
            if self.session.is_none() {
                match EditSession::for_index(&self.store, index) {
                    Ok(session) => self.session = Some(session),
                    Err(err) => self.report_error(err),
                }
            }
        }
    }

    fn report_error(&mut self, err: MemoError) {
        match &err {
            MemoError::ValidationFailed(errors) => {
                log::warn!("save blocked: {:?}", errors);
            }
            _ => log::error!("{}", err),
        }
        self.status = Some(ErrorDisplay::new(&err));
    }

    /// 一覧に表示されるノート
    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.store.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_app_has_no_notes() {
        let app = App::new().unwrap();
        assert!(app.store().is_empty());
        assert_eq!(app.current_route(), Route::NoteList);
        assert!(app.is_running());
    }

    #[test]
    fn selection_is_clamped() {
        let mut app = App::new().unwrap();
        app.handle_action(Action::SelectNext).unwrap();
        assert_eq!(app.selected(), None);

        app.store.append(Note::new("Tea", "Green"));
        app.store.append(Note::new("Coffee", "Black"));
        app.handle_action(Action::SelectNext).unwrap();
        app.handle_action(Action::SelectNext).unwrap();
        app.handle_action(Action::SelectNext).unwrap();
        assert_eq!(app.selected(), Some(1));

        app.handle_action(Action::SelectPrevious).unwrap();
        app.handle_action(Action::SelectPrevious).unwrap();
        assert_eq!(app.selected(), Some(0));
    }

    #[test]
    fn selection_follows_note_after_earlier_delete() {
        let mut app = App::new().unwrap();
        for title in ["Aaa", "Bbb", "Ccc", "Ddd"] {
            app.store.append(Note::new(title, "body"));
        }
        app.selected = Some(2);

        app.navigate_to("noteDetail/0").unwrap();
        app.handle_action(Action::EditNote).unwrap();
        app.handle_action(Action::DeleteNote).unwrap();

        assert_eq!(app.current_route(), Route::NoteList);
        assert_eq!(app.selected(), Some(1));
        let selected = app.store().get(1).unwrap();
        assert_eq!(selected.title, "Ccc");
    }

    #[test]
    fn selection_is_clamped_when_last_note_is_deleted() {
        let mut app = App::new().unwrap();
        app.store.append(Note::new("Aaa", "body"));
        app.store.append(Note::new("Bbb", "body"));
        app.selected = Some(1);

        app.open_edit(1).unwrap();
        app.handle_action(Action::DeleteNote).unwrap();

        assert_eq!(app.selected(), Some(0));
    }

    #[test]
    fn open_detail_rejects_stale_index() {
        let mut app = App::new().unwrap();
        app.handle_action(Action::CreateNote).unwrap();
        app.handle_action(Action::Cancel).unwrap();

        assert!(app.open_detail(3).is_err());
        assert_eq!(app.current_route(), Route::NoteList);
        assert_eq!(app.navigator().depth(), 1);
    }
}
