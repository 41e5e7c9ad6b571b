//! ノートストア
//!
//! 挿入順を表示順とする可変リスト。すべての位置指定操作は 0 <= index < len を要求する

use super::Note;
use crate::error::store::Result;
use crate::error::StoreError;

/// 順序付きノートコレクション
///
/// プロセス終了とともに破棄される（永続化しない）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteStore {
    notes: Vec<Note>,
}

impl NoteStore {
    /// 空のストアを作成
    pub fn new() -> Self {
        Self { notes: Vec::new() }
    }

    /// 末尾に追加
    pub fn append(&mut self, note: Note) {
        self.notes.push(note);
        log::debug!("note appended at index {}", self.notes.len() - 1);
    }

    /// 指定位置のノートを置き換える
    pub fn replace_at(&mut self, index: usize, note: Note) -> Result<()> {
        let len = self.notes.len();
        let slot = self
            .notes
            .get_mut(index)
            .ok_or(StoreError::OutOfRange { index, len })?;
        *slot = note;
        log::debug!("note replaced at index {}", index);
        Ok(())
    }

    /// 指定位置のノートを削除し、後続を1つ前へ詰める
    ///
    /// 削除位置以降を指していた既存のインデックスはすべて無効になる
    pub fn remove_at(&mut self, index: usize) -> Result<Note> {
        self.check_index(index)?;
        let removed = self.notes.remove(index);
        log::debug!("note removed at index {} ({} remaining)", index, self.notes.len());
        Ok(removed)
    }

    /// 指定位置のノートを取得
    pub fn get(&self, index: usize) -> Result<&Note> {
        self.notes.get(index).ok_or(StoreError::OutOfRange {
            index,
            len: self.notes.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// 表示順に列挙
    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.notes.len() {
            Ok(())
        } else {
            Err(StoreError::OutOfRange {
                index,
                len: self.notes.len(),
            })
        }
    }
}

impl<'a> IntoIterator for &'a NoteStore {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
