use super::model::record::BookRecord;

/// 永続化の抽象。Infra層が実装する。
pub trait LibraryRepository {
    type Error: std::error::Error + Send + Sync + 'static;

    /// 全レコードを読み込む。保存先が無ければ空。
    fn load(&self) -> Result<Vec<BookRecord>, Self::Error>;

    /// 全レコードで保存先を丸ごと書き換える。
    fn save(&self, records: &[BookRecord]) -> Result<(), Self::Error>;
}
