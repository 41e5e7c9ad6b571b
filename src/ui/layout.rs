//! TUIレイアウト管理
//!
//! 画面を タイトル行 / 本文 / ステータスライン / ヘルプ行 に分割する

use crate::error::UiError;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use std::collections::HashMap;

/// 画面領域の種類
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AreaType {
    /// 画面タイトル（上部、1行）
    Header,
    /// 各画面の本文（可変）
    Body,
    /// ステータスライン（1行）
    StatusLine,
    /// キー操作ヘルプ（下部、1行）
    Help,
}

/// レイアウトマネージャー
#[derive(Debug, Clone)]
pub struct LayoutManager {
    min_width: u16,
    min_height: u16,
}

impl LayoutManager {
    pub fn new() -> Self {
        Self {
            min_width: 40,
            min_height: 12,
        }
    }

    pub fn min_size(&self) -> (u16, u16) {
        (self.min_width, self.min_height)
    }

    /// 最小サイズを満たしているか
    pub fn check_size(&self, size: Rect) -> Result<(), UiError> {
        if size.width < self.min_width || size.height < self.min_height {
            return Err(UiError::ScreenTooSmall {
                width: size.width,
                height: size.height,
            });
        }
        Ok(())
    }

    /// 各領域の矩形を計算
    pub fn calculate_areas(&self, size: Rect) -> HashMap<AreaType, Rect> {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(size);

        let mut areas = HashMap::with_capacity(4);
        areas.insert(AreaType::Header, chunks[0]);
        areas.insert(AreaType::Body, chunks[1]);
        areas.insert(AreaType::StatusLine, chunks[2]);
        areas.insert(AreaType::Help, chunks[3]);
        areas
    }
}

impl Default for LayoutManager {
    fn default() -> Self {
        Self::new()
    }
}
