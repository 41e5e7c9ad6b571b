//! 設定
//!
//! JSON 設定ファイルとコマンドライン引数からアプリケーション設定を組み立てる

use crate::error::ConfigError;
use crate::logging::LogLevel;
use crate::ui::theme::ThemeType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR_NAME: &str = "memocho";
const CONFIG_FILE_NAME: &str = "config.json";
const DEFAULT_TICK_RATE_MS: u64 = 16;

/// アプリケーション設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case", deny_unknown_fields)]
pub struct AppConfig {
    /// 配色テーマ
    pub theme: ThemeType,
    /// ログレベル
    pub log_level: LogLevel,
    /// ログ出力先（未指定ならファイル出力しない）
    pub log_file: Option<PathBuf>,
    /// イベントポーリング間隔（ミリ秒）
    pub tick_rate_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: ThemeType::Dark,
            log_level: LogLevel::Info,
            log_file: None,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
        }
    }
}

impl AppConfig {
    /// 設定ファイルを読み込む
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|err| ConfigError::InvalidFile {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        Self::from_json(&content, path)
    }

    /// 明示パス、既定パスの順に読み込む。既定パスにファイルが無ければ既定値
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    fn from_json(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: AppConfig =
            serde_json::from_str(content).map_err(|err| ConfigError::InvalidFile {
                path: path.display().to_string(),
                message: err.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "tick_rate_ms".to_string(),
                value: self.tick_rate_ms.to_string(),
            });
        }
        Ok(())
    }

    /// コマンドライン指定を上書き適用
    pub fn merged_with(&self, overrides: &CliOptions) -> AppConfig {
        AppConfig {
            theme: self.theme.clone(),
            log_level: overrides.log_level.unwrap_or(self.log_level),
            log_file: overrides
                .debug_log
                .clone()
                .or_else(|| self.log_file.clone()),
            tick_rate_ms: self.tick_rate_ms,
        }
    }
}

/// コマンドライン引数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    /// 設定ファイルのパス
    pub config_path: Option<PathBuf>,
    /// デバッグログ出力先
    pub debug_log: Option<PathBuf>,
    /// ログレベルの上書き
    pub log_level: Option<LogLevel>,
    pub show_help: bool,
    pub show_version: bool,
}

impl CliOptions {
    /// 引数を解析（プログラム名は含めない）
    pub fn parse(args: &[String]) -> Result<Self, ConfigError> {
        let mut options = CliOptions::default();
        let mut iter = args.iter().peekable();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--config" => {
                    let value = iter.next().ok_or_else(|| ConfigError::MissingArgument {
                        option: arg.clone(),
                    })?;
                    options.config_path = Some(expand_path(value));
                }
                "--debug-log" => {
                    // 値を省略した場合は既定のログファイル
                    let path = match iter.peek() {
                        Some(next) if !next.starts_with('-') => {
                            let path = expand_path(next);
                            iter.next();
                            Some(path)
                        }
                        _ => default_log_path(),
                    };
                    options.debug_log = path;
                    options.log_level = Some(LogLevel::Debug);
                }
                "--help" | "-h" => options.show_help = true,
                "--version" | "-V" => options.show_version = true,
                other => {
                    return Err(ConfigError::UnknownOption {
                        option: other.to_string(),
                    })
                }
            }
        }

        Ok(options)
    }
}

/// `~` や環境変数を展開
pub fn expand_path(input: &str) -> PathBuf {
    match shellexpand::full(input) {
        Ok(expanded) => PathBuf::from(expanded.into_owned()),
        Err(_) => PathBuf::from(input),
    }
}

/// 既定の設定ファイルパス
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// 既定のデバッグログパス
pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join("debug.log"))
}

/// 親ディレクトリを作成
pub(crate) fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn partial_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "theme": "light" }}"#).unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.theme, ThemeType::Light);
        assert_eq!(config.tick_rate_ms, DEFAULT_TICK_RATE_MS);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "thme": "light" }}"#).unwrap();

        assert!(matches!(
            AppConfig::load(file.path()),
            Err(ConfigError::InvalidFile { .. })
        ));
    }

    #[test]
    fn zero_tick_rate_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "tick_rate_ms": 0 }}"#).unwrap();

        assert!(matches!(
            AppConfig::load(file.path()),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn cli_overrides_win() {
        let options = CliOptions::parse(&args(&["--debug-log", "/tmp/memocho.log"])).unwrap();
        let config = AppConfig::default().merged_with(&options);

        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/memocho.log")));
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn cli_rejects_unknown_and_incomplete_options() {
        assert_eq!(
            CliOptions::parse(&args(&["--config"])),
            Err(ConfigError::MissingArgument {
                option: "--config".to_string()
            })
        );
        assert_eq!(
            CliOptions::parse(&args(&["--tui"])),
            Err(ConfigError::UnknownOption {
                option: "--tui".to_string()
            })
        );
    }

    #[test]
    fn debug_log_without_value_uses_default_path() {
        let options = CliOptions::parse(&args(&["--debug-log", "--version"])).unwrap();
        assert_eq!(options.debug_log, default_log_path());
        assert!(options.show_version);
    }
}
