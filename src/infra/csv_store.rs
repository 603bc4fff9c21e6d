use std::ffi::OsString;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use tracing::{debug, info};

use crate::domain::model::id::BookId;
use crate::domain::model::library::DELIMITER;
use crate::domain::model::record::BookRecord;
use crate::domain::repository::LibraryRepository;

/// 1行目に必ず書き出すヘッダ。読み込み時は内容を検証せず読み飛ばす。
pub const HEADER: [&str; 5] = ["id", "title", "author", "isBorrowed", "borrowCount"];

const TRUE_TOKEN: &str = "1";
const FALSE_TOKEN: &str = "0";

#[derive(Debug, thiserror::Error)]
pub enum CsvStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to seed {} from {}: {source}", .target.display(), .seed.display())]
    Seed {
        seed: PathBuf,
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 区切りテキストファイルによるLibraryRepository実装。
/// 変更のたびにファイル全体を書き直す。
#[derive(Debug, Clone)]
pub struct CsvLibraryRepository {
    path: PathBuf,
    /// 初回起動時に同名ファイルをコピーしてくる場所
    seed_dir: Option<PathBuf>,
}

impl CsvLibraryRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            seed_dir: None,
        }
    }

    pub fn with_seed_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.seed_dir = Some(dir.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 書き込み途中のファイル。データファイル名に `.tmp` を足したもの。
    pub fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// seed_dir内の同名ファイルのパス。
    fn seed_path(&self) -> Option<PathBuf> {
        let name = self.path.file_name()?;
        self.seed_dir.as_ref().map(|dir| dir.join(name))
    }

    /// データファイルが無ければseedからコピーする。コピーしたらtrue。
    fn bootstrap(&self) -> Result<bool, CsvStoreError> {
        let Some(seed) = self.seed_path().filter(|p| p.is_file()) else {
            return Ok(false);
        };
        let seed_err = |source| CsvStoreError::Seed {
            seed: seed.clone(),
            target: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(seed_err)?;
        }
        std::fs::copy(&seed, &self.path).map_err(seed_err)?;
        info!(seed = %seed.display(), path = %self.path.display(), "seeded library data file");
        Ok(true)
    }
}

impl LibraryRepository for CsvLibraryRepository {
    type Error = CsvStoreError;

    fn load(&self) -> Result<Vec<BookRecord>, Self::Error> {
        if !self.path.exists() && !self.bootstrap()? {
            debug!(path = %self.path.display(), "no library data file, starting empty");
            return Ok(Vec::new());
        }
        let bytes = std::fs::read(&self.path)?;
        Ok(parse(&String::from_utf8_lossy(&bytes)))
    }

    fn save(&self, records: &[BookRecord]) -> Result<(), Self::Error> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = render(records)?;
        let tmp = self.tmp_path();
        std::fs::write(&tmp, &content)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), records = records.len(), "flushed library");
        Ok(())
    }
}

// =============================================================================
// Format
// =============================================================================

/// ファイル内容をレコード列に変換する。1行目は無条件に捨てる。
/// 列数が5でない行は黙って読み飛ばす。
pub fn parse(content: &str) -> Vec<BookRecord> {
    let body = content.split_once('\n').map_or("", |(_, rest)| rest);
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(DELIMITER as u8)
        .quoting(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    rdr.records()
        .enumerate()
        .filter_map(|(i, row)| {
            let record = row.ok().as_ref().and_then(parse_record);
            if record.is_none() {
                debug!(row = i + 1, "skipping malformed row");
            }
            record
        })
        .collect()
}

/// 1行をレコードに変換する。数値が読めなければ0、真偽値は "1" のみtrue。
fn parse_record(row: &StringRecord) -> Option<BookRecord> {
    if row.len() != HEADER.len() {
        return None;
    }
    Some(BookRecord::restore(
        BookId::parse_lenient(&row[0]),
        &row[1],
        &row[2],
        &row[3] == TRUE_TOKEN,
        row[4].trim().parse().unwrap_or(0),
    ))
}

/// レコード列をファイル内容に変換する。区切り文字のエスケープはしない。
pub fn render(records: &[BookRecord]) -> Result<String, CsvStoreError> {
    let mut wtr = WriterBuilder::new()
        .delimiter(DELIMITER as u8)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(HEADER)?;
    for r in records {
        let borrowed = if r.is_borrowed() {
            TRUE_TOKEN
        } else {
            FALSE_TOKEN
        };
        wtr.write_record([
            r.id().to_string().as_str(),
            r.title(),
            r.author(),
            borrowed,
            r.borrow_count().to_string().as_str(),
        ])?;
    }

    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}
