//! 画面遷移
//!
//! 名前付きルートのスタック。ルートが保持するノート位置はストアの削除に合わせて補正する

use crate::error::NavigationError;
use std::fmt;

/// 画面ルート
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// ノート一覧（`main`）
    NoteList,
    /// ノート詳細（`noteDetail/{index}`）
    NoteDetail { index: usize },
    /// 作成・編集（`editNote` / `editNote/{noteIndex}`）
    EditNote { index: Option<usize> },
}

impl Route {
    /// ルート文字列を解析
    ///
    /// 詳細画面で数値でない位置は拒否し、編集画面では新規作成として扱う
    pub fn parse(route: &str) -> Result<Self, NavigationError> {
        if route == "main" {
            return Ok(Route::NoteList);
        }
        if route == "editNote" {
            return Ok(Route::EditNote { index: None });
        }
        if let Some(arg) = route.strip_prefix("noteDetail/") {
            return arg
                .parse::<usize>()
                .map(|index| Route::NoteDetail { index })
                .map_err(|_| NavigationError::InvalidIndex {
                    route: route.to_string(),
                });
        }
        if let Some(arg) = route.strip_prefix("editNote/") {
            return Ok(Route::EditNote {
                index: arg.parse::<usize>().ok(),
            });
        }

        Err(NavigationError::UnknownRoute {
            route: route.to_string(),
        })
    }

    /// ルートが参照するノート位置
    pub fn note_index(&self) -> Option<usize> {
        match self {
            Route::NoteList => None,
            Route::NoteDetail { index } => Some(*index),
            Route::EditNote { index } => *index,
        }
    }

    fn with_index(self, new_index: usize) -> Self {
        match self {
            Route::NoteList => Route::NoteList,
            Route::NoteDetail { .. } => Route::NoteDetail { index: new_index },
            Route::EditNote { .. } => Route::EditNote {
                index: Some(new_index),
            },
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::NoteList => write!(f, "main"),
            Route::NoteDetail { index } => write!(f, "noteDetail/{}", index),
            Route::EditNote { index: None } => write!(f, "editNote"),
            Route::EditNote { index: Some(index) } => write!(f, "editNote/{}", index),
        }
    }
}

/// ルートスタック
///
/// 先頭は常に一覧画面で、ポップできない
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            stack: vec![Route::NoteList],
        }
    }

    /// 現在の画面
    pub fn current(&self) -> Route {
        self.stack.last().copied().unwrap_or(Route::NoteList)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn routes(&self) -> &[Route] {
        &self.stack
    }

    pub fn navigate(&mut self, route: Route) {
        log::debug!("navigate {} -> {}", self.current(), route);
        self.stack.push(route);
    }

    /// ルート文字列で遷移
    pub fn navigate_to(&mut self, route: &str) -> Result<Route, NavigationError> {
        let parsed = Route::parse(route)?;
        self.navigate(parsed);
        Ok(parsed)
    }

    /// 前の画面へ戻る
    pub fn pop_back_stack(&mut self) -> Result<Route, NavigationError> {
        if self.stack.len() <= 1 {
            return Err(NavigationError::EmptyStack);
        }
        let popped = self.stack.pop().ok_or(NavigationError::EmptyStack)?;
        log::debug!("pop {} -> {}", popped, self.current());
        Ok(popped)
    }

    /// ノート削除後にスタック上の位置を補正する
    ///
    /// 削除されたノートを指すルートは取り除き、後続のノートを指すルートは1つ前へずらす
    pub fn note_removed(&mut self, removed: usize) {
        let before = self.stack.len();
        self.stack = self
            .stack
            .iter()
            .filter_map(|route| match route.note_index() {
                Some(index) if index == removed => None,
                Some(index) if index > removed => Some(route.with_index(index - 1)),
                _ => Some(*route),
            })
            .collect();

        if self.stack.is_empty() {
            self.stack.push(Route::NoteList);
        }
        log::debug!(
            "dropped {} routes for removed note {}",
            before - self.stack.len(),
            removed
        );
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_named_routes() {
        assert_eq!(Route::parse("main"), Ok(Route::NoteList));
        assert_eq!(Route::parse("noteDetail/2"), Ok(Route::NoteDetail { index: 2 }));
        assert_eq!(Route::parse("editNote"), Ok(Route::EditNote { index: None }));
        assert_eq!(
            Route::parse("editNote/7"),
            Ok(Route::EditNote { index: Some(7) })
        );
    }

    #[test]
    fn display_matches_parse() {
        for route in ["main", "noteDetail/0", "editNote", "editNote/12"] {
            assert_eq!(Route::parse(route).unwrap().to_string(), route);
        }
    }

    #[test]
    fn bad_detail_index_is_rejected() {
        assert!(matches!(
            Route::parse("noteDetail/abc"),
            Err(NavigationError::InvalidIndex { .. })
        ));
        assert!(matches!(
            Route::parse("noteDetail/-1"),
            Err(NavigationError::InvalidIndex { .. })
        ));
    }

    #[test]
    fn bad_edit_index_falls_back_to_create() {
        assert_eq!(
            Route::parse("editNote/abc"),
            Ok(Route::EditNote { index: None })
        );
    }

    #[test]
    fn unknown_route() {
        assert!(matches!(
            Route::parse("settings"),
            Err(NavigationError::UnknownRoute { .. })
        ));
    }

    #[test]
    fn root_cannot_be_popped() {
        let mut navigator = Navigator::new();
        assert_eq!(navigator.pop_back_stack(), Err(NavigationError::EmptyStack));

        navigator.navigate_to("editNote").unwrap();
        assert_eq!(navigator.pop_back_stack(), Ok(Route::EditNote { index: None }));
        assert_eq!(navigator.current(), Route::NoteList);
    }

    #[test]
    fn removal_drops_and_shifts_routes() {
        let mut navigator = Navigator::new();
        navigator.navigate(Route::NoteDetail { index: 3 });
        navigator.navigate(Route::NoteDetail { index: 1 });
        navigator.navigate(Route::EditNote { index: Some(1) });

        navigator.note_removed(1);

        assert_eq!(
            navigator.routes(),
            &[Route::NoteList, Route::NoteDetail { index: 2 }]
        );
    }
}
