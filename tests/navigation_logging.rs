// navigation_logging.rs - 画面遷移時のデバッグログ出力テスト
//
// グローバルロガーはプロセスで1回しか設定できないため、このファイルのテストは1つだけ

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use memocho::logging::{self, LogLevel};
use memocho::App;

#[test]
fn navigation_emits_debug_lines_to_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs").join("debug.log");
    logging::init(LogLevel::Debug, Some(&path)).unwrap();

    let mut app = App::new().unwrap();
    app.open_create().unwrap();
    for ch in "Groceries".chars() {
        app.handle_key_event(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE))
            .unwrap();
    }
    app.handle_key_event(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE))
        .unwrap();
    for ch in "Milk, eggs".chars() {
        app.handle_key_event(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE))
            .unwrap();
    }
    app.handle_key_event(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL))
        .unwrap();
    assert_eq!(app.store().len(), 1);

    app.open_detail(0).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("Navigating to create note screen"));
    assert!(content.contains("Navigating to note detail with index: 0"));

    // 2回目の初期化は失敗する
    assert!(logging::init(LogLevel::Info, None).is_err());
}
