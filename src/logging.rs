//! ロギングシステム
//!
//! `log` ファサードの実装。端末は UI が占有するので出力先はファイルのみ

use crate::config::ensure_parent_dir;
use crate::error::{MemoError, Result};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// ログレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    #[serde(alias = "warn")]
    Warning,
    Error,
}

impl LogLevel {
    fn tag(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }

    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }

    fn from_log_level(level: log::Level) -> Self {
        match level {
            log::Level::Error => LogLevel::Error,
            log::Level::Warn => LogLevel::Warning,
            log::Level::Info => LogLevel::Info,
            log::Level::Debug | log::Level::Trace => LogLevel::Debug,
        }
    }
}

/// ファイル出力ロガー
#[derive(Debug, Clone)]
pub struct Logger {
    level: LogLevel,
    output_file: Option<PathBuf>,
}

impl Logger {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            output_file: None,
        }
    }

    /// 開発者向けロガー
    pub fn for_development() -> Self {
        Self::new(LogLevel::Debug)
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_file_output<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_file = Some(path.into());
        self
    }

    fn should_log(&self, level: LogLevel) -> bool {
        self.output_file.is_some() && level >= self.level
    }

    fn format_line(level: LogLevel, target: &str, message: &str) -> String {
        format!("{} {} [{}] {}", timestamp_ms(), level.tag(), target, message)
    }

    fn write_line(&self, line: &str) {
        if let Some(path) = &self.output_file {
            if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
                let _ = writeln!(file, "{}", line);
            }
        }
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        self.should_log(LogLevel::from_log_level(metadata.level()))
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = LogLevel::from_log_level(record.level());
        let line = Self::format_line(level, record.target(), &record.args().to_string());
        self.write_line(&line);
    }

    fn flush(&self) {}
}

/// グローバルロガーを設定する（プロセスで1回のみ）
pub fn init(level: LogLevel, log_file: Option<&Path>) -> Result<()> {
    let mut logger = Logger::new(level);
    let max_level = match log_file {
        Some(path) => {
            ensure_parent_dir(path)?;
            logger = logger.with_file_output(path);
            level.to_level_filter()
        }
        None => log::LevelFilter::Off,
    };

    log::set_boxed_logger(Box::new(logger))
        .map_err(|err| MemoError::Logging(err.to_string()))?;
    log::set_max_level(max_level);
    Ok(())
}

fn timestamp_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|dur| dur.as_millis())
        .unwrap_or_default()
}
