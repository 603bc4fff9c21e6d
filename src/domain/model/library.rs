use super::id::BookId;
use super::record::BookRecord;
use crate::domain::error::DomainError;

/// ファイル形式の区切り文字。タイトル・著者には含められない。
pub const DELIMITER: char = ',';

/// 蔵書 — 集約ルート。全レコード操作はここを経由する。
/// 並び順は追加順。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    records: Vec<BookRecord>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// 読み込み済みレコードから復元する。順序はそのまま保持する。
    pub fn from_records(records: Vec<BookRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[BookRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: BookId) -> Option<&BookRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// 次に採番されるID（空なら1）。
    pub fn next_id(&self) -> Result<BookId, DomainError> {
        let max = self
            .records
            .iter()
            .map(BookRecord::id)
            .fold(BookId::new(0), Ord::max);
        max.next().ok_or(DomainError::IdSpaceExhausted(max))
    }

    /// 蔵書を追加する。
    pub fn add(&mut self, title: &str, author: &str) -> Result<&BookRecord, DomainError> {
        let title = validate_text("title", title)?;
        let author = validate_text("author", author)?;

        let record = BookRecord::new(self.next_id()?, title, author);
        self.records.push(record);

        let last = self.records.len() - 1;
        Ok(&self.records[last])
    }

    /// 貸し出す。貸出中なら状態を変えずにエラー。
    pub fn borrow(&mut self, id: BookId) -> Result<&BookRecord, DomainError> {
        let record = self.get_mut(id)?;
        if record.is_borrowed() {
            return Err(DomainError::AlreadyBorrowed {
                id,
                title: record.title().to_string(),
            });
        }
        record.mark_borrowed();
        Ok(&*record)
    }

    /// 返却する。貸出中でなければ状態を変えずにエラー。
    pub fn return_book(&mut self, id: BookId) -> Result<&BookRecord, DomainError> {
        let record = self.get_mut(id)?;
        if !record.is_borrowed() {
            return Err(DomainError::NotBorrowed {
                id,
                title: record.title().to_string(),
            });
        }
        record.mark_returned();
        Ok(&*record)
    }

    /// タイトルの部分一致検索（大文字小文字を区別しない）。
    pub fn find_by_title(&self, term: &str) -> Vec<&BookRecord> {
        let query = term.to_lowercase();
        self.records
            .iter()
            .filter(|r| r.title().to_lowercase().contains(&query))
            .collect()
    }

    // --- Private helpers ---

    fn get_mut(&mut self, id: BookId) -> Result<&mut BookRecord, DomainError> {
        self.records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(DomainError::BookNotFound(id))
    }
}

/// 空文字列と、行構造を壊す文字（区切り文字・改行）を拒否する。
fn validate_text(field: &'static str, value: &str) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::EmptyField { field });
    }
    if value.contains([DELIMITER, '\n', '\r']) {
        return Err(DomainError::UnsupportedCharacter { field });
    }
    Ok(value.to_string())
}
