use tracing::{info, warn};

use crate::domain::error::DomainError;
use crate::domain::model::id::BookId;
use crate::domain::model::library::Library;
use crate::domain::model::record::BookRecord;
use crate::domain::repository::LibraryRepository;

use super::error::AppError;

/// 蔵書に対するユースケース。
/// 起動時に一度loadし、以降は mutate → save のパターンで操作する。
/// saveに失敗した変更はメモリにも反映しない。
pub struct LibraryService<R: LibraryRepository> {
    repo: R,
    library: Library,
}

impl<R: LibraryRepository> LibraryService<R> {
    /// 保存先から蔵書を読み込んでServiceを作る。
    pub fn open(repo: R) -> Result<Self, AppError> {
        let mut svc = Self {
            repo,
            library: Library::new(),
        };
        svc.reload()?;
        Ok(svc)
    }

    /// 保存先から読み直し、メモリ上の状態を置き換える。
    pub fn reload(&mut self) -> Result<usize, AppError> {
        let records = self
            .repo
            .load()
            .map_err(|e| AppError::Storage(Box::new(e)))?;
        self.library = Library::from_records(records);
        info!(books = self.library.len(), "loaded library");
        Ok(self.library.len())
    }

    /// 蔵書を追加して永続化する。
    pub fn add_book(&mut self, title: &str, author: &str) -> Result<BookRecord, AppError> {
        self.mutate(|lib| lib.add(title, author).cloned())
    }

    /// 貸し出して永続化する。
    pub fn borrow_book(&mut self, id: BookId) -> Result<BookRecord, AppError> {
        self.mutate(|lib| lib.borrow(id).cloned())
    }

    /// 返却して永続化する。
    pub fn return_book(&mut self, id: BookId) -> Result<BookRecord, AppError> {
        self.mutate(|lib| lib.return_book(id).cloned())
    }

    /// 全蔵書を追加順で返す。
    pub fn list_all(&self) -> &[BookRecord] {
        self.library.records()
    }

    /// タイトルで検索する。
    pub fn search(&self, term: &str) -> Vec<&BookRecord> {
        self.library.find_by_title(term)
    }

    pub fn get(&self, id: BookId) -> Option<&BookRecord> {
        self.library.get(id)
    }

    pub fn len(&self) -> usize {
        self.library.len()
    }

    pub fn is_empty(&self) -> bool {
        self.library.is_empty()
    }

    // --- private ---

    /// 作業用コピーに変更を適用し、保存できた場合のみ確定する。
    fn mutate<F>(&mut self, op: F) -> Result<BookRecord, AppError>
    where
        F: FnOnce(&mut Library) -> Result<BookRecord, DomainError>,
    {
        let mut draft = self.library.clone();
        let record = op(&mut draft)?;
        self.persist(&draft)?;
        self.library = draft;
        Ok(record)
    }

    fn persist(&self, library: &Library) -> Result<(), AppError> {
        self.repo.save(library.records()).map_err(|e| {
            warn!(error = %e, "failed to flush library");
            AppError::Storage(Box::new(e))
        })
    }
}
