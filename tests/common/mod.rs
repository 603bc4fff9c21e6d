//! Shared test harness for integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use library_mcp::application::service::LibraryService;
use library_mcp::domain::model::record::BookRecord;
use library_mcp::domain::repository::LibraryRepository;

// =============================================================================
// InMemoryRepo — テスト用リポジトリ
// =============================================================================

#[derive(Debug, thiserror::Error)]
#[error("in-memory store error: disk full")]
pub struct InMemoryError;

/// ファイルI/O不要のインメモリリポジトリ。cloneは同じ保存領域を共有する。
/// `set_failing(true)` 以降のsaveは失敗する。
#[derive(Clone, Default)]
pub struct InMemoryRepo {
    inner: Rc<Inner>,
}

#[derive(Default)]
struct Inner {
    store: RefCell<Option<String>>,
    saves: Cell<usize>,
    fail_saves: Cell<bool>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: &[BookRecord]) -> Self {
        let repo = Self::new();
        repo.save(records).unwrap();
        repo.inner.saves.set(0);
        repo
    }

    /// 成功したsaveの回数。
    pub fn save_count(&self) -> usize {
        self.inner.saves.get()
    }

    pub fn set_failing(&self, failing: bool) {
        self.inner.fail_saves.set(failing);
    }

    pub fn stored(&self) -> Vec<BookRecord> {
        match self.inner.store.borrow().as_deref() {
            Some(json) => serde_json::from_str(json).unwrap(),
            None => Vec::new(),
        }
    }
}

impl LibraryRepository for InMemoryRepo {
    type Error = InMemoryError;

    fn load(&self) -> Result<Vec<BookRecord>, Self::Error> {
        Ok(self.stored())
    }

    fn save(&self, records: &[BookRecord]) -> Result<(), Self::Error> {
        if self.inner.fail_saves.get() {
            return Err(InMemoryError);
        }
        let json = serde_json::to_string(records).unwrap();
        *self.inner.store.borrow_mut() = Some(json);
        self.inner.saves.set(self.inner.saves.get() + 1);
        Ok(())
    }
}

/// repoを共有するServiceを返す（repo側から保存内容を覗ける）。
pub fn open_service(repo: &InMemoryRepo) -> LibraryService<InMemoryRepo> {
    LibraryService::open(repo.clone()).unwrap()
}

// =============================================================================
// Assertion helpers
// =============================================================================

/// 結果がErrで、メッセージに指定文字列を含むことをassert。
pub fn assert_error_contains<T: std::fmt::Debug>(
    result: Result<T, impl std::fmt::Display>,
    expected: &str,
) {
    match result {
        Err(e) => {
            let msg = e.to_string();
            assert!(
                msg.contains(expected),
                "Expected error containing '{expected}', got: '{msg}'"
            );
        }
        Ok(v) => panic!("Expected error containing '{expected}', got Ok({v:?})"),
    }
}
