//! エラーハンドリングシステム
//!
//! memocho 全体で使用される統一されたエラー型とユーティリティを定義
//! 範囲外インデックスは呼び出し側のバグ、検証エラーは常に回復可能として扱う

use std::time::{Duration, Instant};
use thiserror::Error;

use crate::note::FieldErrors;

/// アプリケーション全体のエラー型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MemoError {
    /// ノートストア操作エラー
    #[error("Note store operation failed: {0}")]
    Store(#[from] StoreError),

    /// 入力値の検証エラー（回復可能）
    #[error("Validation failed")]
    ValidationFailed(FieldErrors),

    /// 画面遷移エラー
    #[error("Navigation failed: {0}")]
    Navigation(#[from] NavigationError),

    /// UI操作エラー
    #[error("UI operation failed: {0}")]
    Ui(#[from] UiError),

    /// 設定エラー
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// ロガー初期化エラー
    #[error("Logger initialization failed: {0}")]
    Logging(String),

    /// IOエラー
    #[error("IO error: {message}")]
    Io { message: String },
}

/// ノートストア固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Index {index} is out of range for {len} notes")]
    OutOfRange { index: usize, len: usize },
}

/// 画面遷移固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Unknown route: {route}")]
    UnknownRoute { route: String },

    #[error("Invalid note index in route: {route}")]
    InvalidIndex { route: String },

    #[error("Navigation stack is empty")]
    EmptyStack,
}

/// UI操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    #[error("Terminal initialization failed")]
    TerminalInit,

    #[error("Screen size too small: {width}x{height}")]
    ScreenTooSmall { width: u16, height: u16 },

    #[error("Rendering failed: {component}")]
    RenderingFailed { component: String },
}

/// 設定固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration file: {path}: {message}")]
    InvalidFile { path: String, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing value for option {option}")]
    MissingArgument { option: String },

    #[error("Unknown option: {option}")]
    UnknownOption { option: String },
}

/// エラーレベル分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorLevel {
    Info,
    Warning,
    Error,
    Fatal,
}

/// ステータスラインに表示するエラー情報
#[derive(Debug, Clone)]
pub struct ErrorDisplay {
    /// エラーメッセージ
    pub message: String,
    /// エラーレベル
    pub level: ErrorLevel,
    /// 表示開始時刻
    pub start_time: Instant,
    /// 表示持続時間
    pub duration: Duration,
}

impl ErrorDisplay {
    pub fn new(error: &MemoError) -> Self {
        let (message, level) = Self::format_error(error);
        Self::with_level(message, level)
    }

    /// 任意のメッセージから表示情報を作成
    pub fn with_level(message: impl Into<String>, level: ErrorLevel) -> Self {
        Self {
            message: message.into(),
            level,
            start_time: Instant::now(),
            duration: Duration::from_secs(5),
        }
    }

    fn format_error(error: &MemoError) -> (String, ErrorLevel) {
        match error {
            MemoError::Store(StoreError::OutOfRange { index, len }) => (
                format!("Note {} no longer exists ({} notes)", index, len),
                ErrorLevel::Error,
            ),
            MemoError::ValidationFailed(errors) => {
                let message = errors
                    .messages()
                    .first()
                    .copied()
                    .unwrap_or("Title and description are required");
                (message.to_string(), ErrorLevel::Warning)
            }
            MemoError::Ui(UiError::ScreenTooSmall { width, height }) => {
                (format!("Screen too small: {}x{}", width, height), ErrorLevel::Error)
            }
            MemoError::Ui(UiError::TerminalInit) => {
                ("Terminal initialization failed".to_string(), ErrorLevel::Fatal)
            }
            _ => (format!("Error: {}", error), ErrorLevel::Error),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.start_time.elapsed() >= self.duration
    }
}

/// パニックハンドラの設定
///
/// 端末を通常モードへ戻してから位置とメッセージを出力する
pub fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen);

        let payload = panic_info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("Unknown panic payload");

        match panic_info.location() {
            Some(location) => {
                log::error!("panic at {}:{}: {}", location.file(), location.line(), message);
                eprintln!("PANIC at {}:{}: {}", location.file(), location.line(), message);
            }
            None => {
                log::error!("panic: {}", message);
                eprintln!("PANIC: {}", message);
            }
        }

        default_hook(panic_info);
    }));
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, MemoError>;

/// 各モジュール固有のResult型
pub mod store {
    pub type Result<T> = std::result::Result<T, super::StoreError>;
}

impl From<std::io::Error> for MemoError {
    fn from(error: std::io::Error) -> Self {
        MemoError::Io { message: error.to_string() }
    }
}
