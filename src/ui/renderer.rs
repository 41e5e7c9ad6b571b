//! 画面描画
//!
//! 一覧・詳細・作成編集の3画面を ratatui で描画する

use crate::editor::{EditSession, Field};
use crate::error::{ErrorDisplay, ErrorLevel};
use crate::note::{Note, NoteStore};
use crate::ui::layout::{AreaType, LayoutManager};
use crate::ui::theme::{ComponentType, Theme, ThemeType};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;

/// 描画対象の画面
pub enum ScreenView<'a> {
    List {
        notes: &'a NoteStore,
        selected: Option<usize>,
    },
    Detail {
        index: usize,
        note: &'a Note,
    },
    Edit {
        session: &'a EditSession,
    },
}

/// ステータスラインの表示情報
pub struct StatusLineInfo<'a> {
    pub route: String,
    pub note_count: usize,
    pub message: Option<&'a ErrorDisplay>,
}

/// 画面レンダラー
pub struct NoteRenderer {
    layout_manager: LayoutManager,
    theme: Theme,
}

impl NoteRenderer {
    pub fn new(theme_type: ThemeType) -> Self {
        Self {
            layout_manager: LayoutManager::new(),
            theme: Theme::new(theme_type),
        }
    }

    /// メイン描画処理
    pub fn render<B: Backend>(
        &self,
        terminal: &mut Terminal<B>,
        view: ScreenView<'_>,
        status: StatusLineInfo<'_>,
    ) -> io::Result<()> {
        terminal.draw(|frame| self.draw(frame, &view, &status))?;
        Ok(())
    }

    /// フレーム描画
    pub fn draw(&self, frame: &mut Frame<'_>, view: &ScreenView<'_>, status: &StatusLineInfo<'_>) {
        let size = frame.area();
        frame.render_widget(Block::default().style(self.theme.default_style()), size);

        if let Err(err) = self.layout_manager.check_size(size) {
            let (min_w, min_h) = self.layout_manager.min_size();
            let text = format!("{} (minimum {}x{})", err, min_w, min_h);
            let paragraph = Paragraph::new(text)
                .style(self.theme.style(&ComponentType::Error))
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, size);
            return;
        }

        let areas = self.layout_manager.calculate_areas(size);

        if let Some(&header) = areas.get(&AreaType::Header) {
            self.render_header(frame, header, view);
        }
        if let Some(&body) = areas.get(&AreaType::Body) {
            match view {
                ScreenView::List { notes, selected } => {
                    self.render_list(frame, body, notes, *selected)
                }
                ScreenView::Detail { note, .. } => self.render_detail(frame, body, note),
                ScreenView::Edit { session } => self.render_edit(frame, body, session),
            }
        }
        if let Some(&status_area) = areas.get(&AreaType::StatusLine) {
            self.render_status_line(frame, status_area, status);
        }
        if let Some(&help) = areas.get(&AreaType::Help) {
            let paragraph = Paragraph::new(Self::help_text(view))
                .style(self.theme.style(&ComponentType::Help));
            frame.render_widget(paragraph, help);
        }
    }

    fn render_header(&self, frame: &mut Frame<'_>, area: Rect, view: &ScreenView<'_>) {
        let title = match view {
            ScreenView::List { .. } => "Notes".to_string(),
            ScreenView::Detail { index, .. } => format!("Note #{}", index + 1),
            ScreenView::Edit { session } => match session.target_index() {
                None => "New Note".to_string(),
                Some(index) => format!("Edit Note #{}", index + 1),
            },
        };
        let paragraph = Paragraph::new(format!(" {}", title))
            .style(self.theme.style(&ComponentType::Header));
        frame.render_widget(paragraph, area);
    }

    fn render_list(&self, frame: &mut Frame<'_>, area: Rect, notes: &NoteStore, selected: Option<usize>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(area);

        let create_button = Paragraph::new(Line::from(Span::styled(
            " [+] Create New Note ",
            self.theme.style(&ComponentType::Button),
        )));
        frame.render_widget(create_button, chunks[0]);

        if notes.is_empty() {
            let hint = Paragraph::new("No notes yet. Press 'a' to create one.")
                .style(self.theme.style(&ComponentType::Help));
            frame.render_widget(hint, chunks[1]);
            return;
        }

        let items: Vec<ListItem<'_>> = notes
            .iter()
            .map(|note| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        note.title.as_str(),
                        self.theme.style(&ComponentType::NoteTitle),
                    )),
                    Line::from(Span::styled(
                        note.description.as_str(),
                        self.theme.style(&ComponentType::NoteDescription),
                    )),
                    Line::from(""),
                ])
            })
            .collect();

        let list = List::new(items)
            .style(self.theme.style(&ComponentType::ListItem))
            .highlight_style(self.theme.style(&ComponentType::ListSelected))
            .highlight_symbol("> ");
        let mut state = ListState::default().with_selected(selected);
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    fn render_detail(&self, frame: &mut Frame<'_>, area: Rect, note: &Note) {
        let lines = vec![
            Line::from(Span::styled(
                format!("Title: {}", note.title),
                self.theme.style(&ComponentType::NoteTitle),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("Description: {}", note.description),
                self.theme.style(&ComponentType::NoteDescription),
            )),
            Line::from(""),
            Line::from(Span::styled(" [e] Edit Note ", self.theme.style(&ComponentType::Button))),
            Line::from(""),
            Line::from(Span::styled(
                " [Esc] Back to Main Screen ",
                self.theme.style(&ComponentType::DangerButton),
            )),
        ];
        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn render_edit(&self, frame: &mut Frame<'_>, area: Rect, session: &EditSession) {
        let errors = session.errors();
        let has_delete = session.target_index().is_some();

        let mut constraints = vec![
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ];
        if has_delete {
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Min(0));

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let title_cursor = self.render_field(
            frame,
            rows[0],
            "Enter note title",
            session.title().value(),
            session.focus() == Field::Title,
            errors.title_error,
        );
        if errors.title_error {
            self.render_field_error(frame, rows[1], crate::note::TITLE_ERROR_MESSAGE);
        }

        let description_cursor = self.render_field(
            frame,
            rows[2],
            "Enter note description",
            session.description().value(),
            session.focus() == Field::Description,
            errors.description_error,
        );
        if errors.description_error {
            self.render_field_error(frame, rows[3], crate::note::DESCRIPTION_ERROR_MESSAGE);
        }

        let save_style = if session.can_save() {
            self.theme.style(&ComponentType::Button)
        } else {
            self.theme.style(&ComponentType::ButtonDisabled)
        };
        let save = Paragraph::new(Line::from(Span::styled(
            format!(" [C-s] {} ", session.save_label()),
            save_style,
        )));
        frame.render_widget(save, rows[4]);

        let mut next_row = 5;
        if has_delete {
            let delete = Paragraph::new(Line::from(Span::styled(
                " [C-d] Delete Note ",
                self.theme.style(&ComponentType::DangerButton),
            )));
            frame.render_widget(delete, rows[next_row]);
            next_row += 1;
        }

        let cancel = Paragraph::new(Line::from(Span::styled(
            " [Esc] Cancel ",
            self.theme.style(&ComponentType::Button),
        )));
        frame.render_widget(cancel, rows[next_row]);

        let (field_area, field, cursor_base) = match session.focus() {
            Field::Title => (rows[0], session.title(), title_cursor),
            Field::Description => (rows[2], session.description(), description_cursor),
        };
        let max_x = field_area.x + field_area.width.saturating_sub(2);
        let cursor_x = (cursor_base.x + field.display_width_before_cursor() as u16).min(max_x);
        frame.set_cursor_position(Position::new(cursor_x, cursor_base.y));
    }

    /// 入力欄を描画し、テキスト開始位置を返す
    fn render_field(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        label: &str,
        value: &str,
        focused: bool,
        has_error: bool,
    ) -> Position {
        let border_style = if has_error {
            self.theme.style(&ComponentType::Error)
        } else if focused {
            self.theme.style(&ComponentType::FieldActive)
        } else {
            self.theme.style(&ComponentType::FieldInactive)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(label.to_string(), self.theme.style(&ComponentType::FieldLabel)));
        let inner = block.inner(area);

        let paragraph = Paragraph::new(value.to_string())
            .style(self.theme.style(&ComponentType::ListItem))
            .block(block);
        frame.render_widget(paragraph, area);

        Position::new(inner.x, inner.y)
    }

    fn render_field_error(&self, frame: &mut Frame<'_>, area: Rect, message: &str) {
        let paragraph = Paragraph::new(message.to_string())
            .style(self.theme.style(&ComponentType::Error));
        frame.render_widget(paragraph, area);
    }

    fn render_status_line(&self, frame: &mut Frame<'_>, area: Rect, status: &StatusLineInfo<'_>) {
        let (text, style) = match status.message {
            Some(display) => {
                let component = match display.level {
                    ErrorLevel::Info => ComponentType::Info,
                    ErrorLevel::Warning => ComponentType::Warning,
                    ErrorLevel::Error | ErrorLevel::Fatal => ComponentType::Error,
                };
                (format!(" {}", display.message), self.theme.style(&component))
            }
            None => {
                let noun = if status.note_count == 1 { "note" } else { "notes" };
                (
                    format!(" {}  |  {} {}", status.route, status.note_count, noun),
                    self.theme.style(&ComponentType::StatusLine),
                )
            }
        };
        frame.render_widget(Paragraph::new(text).style(style), area);
    }

    fn help_text(view: &ScreenView<'_>) -> &'static str {
        match view {
            ScreenView::List { .. } => " ↑/↓ select  Enter open  a new  q quit",
            ScreenView::Detail { .. } => " e edit  Esc back  q quit",
            ScreenView::Edit { .. } => " Tab next field  C-s save  C-d delete  Esc cancel",
        }
    }
}

impl Default for NoteRenderer {
    fn default() -> Self {
        Self::new(ThemeType::Dark)
    }
}
