use serde::{Deserialize, Serialize};

use super::id::BookId;

/// 蔵書レコード。Libraryが所有し、Libraryを通じて操作する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    id: BookId,
    title: String,
    author: String,
    is_borrowed: bool,
    /// 貸出回数の累計。返却では減らない。
    borrow_count: u32,
}

impl BookRecord {
    pub(crate) fn new(id: BookId, title: String, author: String) -> Self {
        Self {
            id,
            title,
            author,
            is_borrowed: false,
            borrow_count: 0,
        }
    }

    /// 永続化済みの値からレコードを復元する（検証なし）。
    pub fn restore(
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        is_borrowed: bool,
        borrow_count: u32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            is_borrowed,
            borrow_count,
        }
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn is_borrowed(&self) -> bool {
        self.is_borrowed
    }

    pub fn borrow_count(&self) -> u32 {
        self.borrow_count
    }

    // --- 内部操作（Library経由でのみ呼ばれる） ---

    pub(crate) fn mark_borrowed(&mut self) {
        self.is_borrowed = true;
        self.borrow_count = self.borrow_count.saturating_add(1);
    }

    pub(crate) fn mark_returned(&mut self) {
        self.is_borrowed = false;
    }
}
