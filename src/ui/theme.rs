//! テーマシステム
//!
//! 画面部品ごとのカラー設定とダーク／ライト／ハイコントラストの切り替え

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// テーマの種類
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeType {
    Light,
    Dark,
    HighContrast,
}

/// UIコンポーネントの種類
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// 画面タイトル行
    Header,
    /// 一覧の行
    ListItem,
    /// 選択中の一覧行
    ListSelected,
    /// ノートのタイトル
    NoteTitle,
    /// ノートの説明
    NoteDescription,
    /// 入力欄のラベル
    FieldLabel,
    /// フォーカス中の入力欄
    FieldActive,
    /// フォーカスしていない入力欄
    FieldInactive,
    /// 有効なボタン
    Button,
    /// 無効なボタン
    ButtonDisabled,
    /// 削除などの危険なボタン
    DangerButton,
    /// ステータスライン
    StatusLine,
    /// キー操作ヘルプ
    Help,
    /// エラーメッセージ
    Error,
    /// 警告メッセージ
    Warning,
    /// 情報メッセージ
    Info,
}

/// カラー設定
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub foreground: Color,
    pub background: Color,
    /// 修飾子（太字、下線など）
    pub modifiers: Modifier,
}

impl ColorScheme {
    pub fn new(foreground: Color, background: Color) -> Self {
        Self {
            foreground,
            background,
            modifiers: Modifier::empty(),
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers = modifier;
        self
    }

    pub fn to_style(&self) -> Style {
        Style::default()
            .fg(self.foreground)
            .bg(self.background)
            .add_modifier(self.modifiers)
    }
}

/// テーマ設定
#[derive(Debug, Clone)]
pub struct Theme {
    pub theme_type: ThemeType,
    /// コンポーネント別のカラー設定
    pub colors: HashMap<ComponentType, ColorScheme>,
}

impl Theme {
    pub fn new(theme_type: ThemeType) -> Self {
        let mut theme = Self {
            theme_type: theme_type.clone(),
            colors: HashMap::new(),
        };

        match theme_type {
            ThemeType::Light => theme.set_light_colors(),
            ThemeType::Dark => theme.set_dark_colors(),
            ThemeType::HighContrast => theme.set_high_contrast_colors(),
        }
        theme
    }

    /// 特定のコンポーネントのスタイルを取得
    pub fn style(&self, component: &ComponentType) -> Style {
        self.colors
            .get(component)
            .map(|cs| cs.to_style())
            .unwrap_or_else(|| self.default_style())
    }

    pub fn set_color(&mut self, component: ComponentType, color_scheme: ColorScheme) {
        self.colors.insert(component, color_scheme);
    }

    pub fn default_style(&self) -> Style {
        match self.theme_type {
            ThemeType::Light => Style::default().fg(Color::Black).bg(Color::White),
            ThemeType::Dark | ThemeType::HighContrast => {
                Style::default().fg(Color::White).bg(Color::Black)
            }
        }
    }

    fn set_light_colors(&mut self) {
        let bg = Color::White;
        self.set_color(ComponentType::Header,
            ColorScheme::new(Color::White, Color::Blue).with_modifier(Modifier::BOLD));
        self.set_color(ComponentType::ListItem, ColorScheme::new(Color::Black, bg));
        self.set_color(ComponentType::ListSelected,
            ColorScheme::new(Color::White, Color::Blue).with_modifier(Modifier::BOLD));
        self.set_color(ComponentType::NoteTitle,
            ColorScheme::new(Color::Black, bg).with_modifier(Modifier::BOLD));
        self.set_color(ComponentType::NoteDescription, ColorScheme::new(Color::DarkGray, bg));
        self.set_color(ComponentType::FieldLabel, ColorScheme::new(Color::DarkGray, bg));
        self.set_color(ComponentType::FieldActive, ColorScheme::new(Color::Blue, bg));
        self.set_color(ComponentType::FieldInactive, ColorScheme::new(Color::Gray, bg));
        self.set_color(ComponentType::Button,
            ColorScheme::new(Color::White, Color::Blue).with_modifier(Modifier::BOLD));
        self.set_color(ComponentType::ButtonDisabled, ColorScheme::new(Color::Gray, Color::White));
        self.set_color(ComponentType::DangerButton,
            ColorScheme::new(Color::White, Color::Red).with_modifier(Modifier::BOLD));
        self.set_color(ComponentType::StatusLine, ColorScheme::new(Color::White, Color::Blue));
        self.set_color(ComponentType::Help, ColorScheme::new(Color::DarkGray, bg));
        self.set_color(ComponentType::Error,
            ColorScheme::new(Color::Red, bg).with_modifier(Modifier::BOLD));
        self.set_color(ComponentType::Warning,
            ColorScheme::new(Color::Yellow, bg).with_modifier(Modifier::BOLD));
        self.set_color(ComponentType::Info, ColorScheme::new(Color::Green, bg));
    }

    fn set_dark_colors(&mut self) {
        let bg = Color::Black;
        self.set_color(ComponentType::Header,
            ColorScheme::new(Color::Black, Color::Cyan).with_modifier(Modifier::BOLD));
        self.set_color(ComponentType::ListItem, ColorScheme::new(Color::White, bg));
        self.set_color(ComponentType::ListSelected,
            ColorScheme::new(Color::Black, Color::White).with_modifier(Modifier::BOLD));
        self.set_color(ComponentType::NoteTitle,
            ColorScheme::new(Color::White, bg).with_modifier(Modifier::BOLD));
        self.set_color(ComponentType::NoteDescription, ColorScheme::new(Color::Gray, bg));
        self.set_color(ComponentType::FieldLabel, ColorScheme::new(Color::Gray, bg));
        self.set_color(ComponentType::FieldActive, ColorScheme::new(Color::Cyan, bg));
        self.set_color(ComponentType::FieldInactive, ColorScheme::new(Color::DarkGray, bg));
        self.set_color(ComponentType::Button,
            ColorScheme::new(Color::Black, Color::Cyan).with_modifier(Modifier::BOLD));
        self.set_color(ComponentType::ButtonDisabled, ColorScheme::new(Color::DarkGray, bg));
        self.set_color(ComponentType::DangerButton,
            ColorScheme::new(Color::White, Color::Red).with_modifier(Modifier::BOLD));
        self.set_color(ComponentType::StatusLine, ColorScheme::new(Color::Black, Color::Gray));
        self.set_color(ComponentType::Help, ColorScheme::new(Color::DarkGray, bg));
        self.set_color(ComponentType::Error,
            ColorScheme::new(Color::LightRed, bg).with_modifier(Modifier::BOLD));
        self.set_color(ComponentType::Warning,
            ColorScheme::new(Color::LightYellow, bg).with_modifier(Modifier::BOLD));
        self.set_color(ComponentType::Info, ColorScheme::new(Color::LightGreen, bg));
    }

    fn set_high_contrast_colors(&mut self) {
        let bg = Color::Black;
        let bold = Modifier::BOLD;
        self.set_color(ComponentType::Header,
            ColorScheme::new(Color::Black, Color::White).with_modifier(bold));
        self.set_color(ComponentType::ListItem, ColorScheme::new(Color::White, bg));
        self.set_color(ComponentType::ListSelected,
            ColorScheme::new(Color::Black, Color::White).with_modifier(bold));
        self.set_color(ComponentType::NoteTitle, ColorScheme::new(Color::White, bg).with_modifier(bold));
        self.set_color(ComponentType::NoteDescription, ColorScheme::new(Color::White, bg));
        self.set_color(ComponentType::FieldLabel, ColorScheme::new(Color::White, bg));
        self.set_color(ComponentType::FieldActive,
            ColorScheme::new(Color::White, bg).with_modifier(bold));
        self.set_color(ComponentType::FieldInactive, ColorScheme::new(Color::White, bg));
        self.set_color(ComponentType::Button,
            ColorScheme::new(Color::Black, Color::White).with_modifier(bold));
        self.set_color(ComponentType::ButtonDisabled,
            ColorScheme::new(Color::White, bg).with_modifier(Modifier::CROSSED_OUT));
        self.set_color(ComponentType::DangerButton,
            ColorScheme::new(Color::White, Color::Red).with_modifier(bold));
        self.set_color(ComponentType::StatusLine,
            ColorScheme::new(Color::Black, Color::White).with_modifier(bold));
        self.set_color(ComponentType::Help, ColorScheme::new(Color::White, bg));
        self.set_color(ComponentType::Error, ColorScheme::new(Color::White, Color::Red).with_modifier(bold));
        self.set_color(ComponentType::Warning,
            ColorScheme::new(Color::Black, Color::Yellow).with_modifier(bold));
        self.set_color(ComponentType::Info,
            ColorScheme::new(Color::Black, Color::Green).with_modifier(bold));
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeType::Dark)
    }
}
