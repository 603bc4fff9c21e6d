use std::env;
use std::path::PathBuf;

pub const DATA_FILE_NAME: &str = "library_data.csv";
pub const APP_DIR_NAME: &str = "smart-library";

const DATA_PATH_ENV: &str = "LIBRARY_DATA";
const SEED_DIR_ENV: &str = "LIBRARY_SEED_DIR";

/// 起動時設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    /// データファイルのパス
    pub data_path: PathBuf,
    /// 初回起動時のコピー元ディレクトリ（同名ファイルを探す）
    pub seed_dir: Option<PathBuf>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            seed_dir: default_seed_dir(),
        }
    }
}

impl LibraryConfig {
    /// CLI引数 > 環境変数 > 既定値 の順で解決する。
    pub fn from_env(data_path_arg: Option<PathBuf>) -> Self {
        let data_path = data_path_arg
            .or_else(|| non_empty_env(DATA_PATH_ENV).map(PathBuf::from))
            .unwrap_or_else(default_data_path);
        let seed_dir = non_empty_env(SEED_DIR_ENV)
            .map(PathBuf::from)
            .or_else(default_seed_dir);
        Self {
            data_path,
            seed_dir,
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

/// `$XDG_DATA_HOME/smart-library/library_data.csv`、無ければ `~/.local/share` 配下。
fn default_data_path() -> PathBuf {
    let base = non_empty_env("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|| non_empty_env("HOME").map(|h| PathBuf::from(h).join(".local").join("share")));
    match base {
        Some(dir) => dir.join(APP_DIR_NAME).join(DATA_FILE_NAME),
        None => PathBuf::from(DATA_FILE_NAME),
    }
}

fn default_seed_dir() -> Option<PathBuf> {
    non_empty_env("HOME").map(|h| PathBuf::from(h).join("Desktop"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let config = LibraryConfig::from_env(Some(PathBuf::from("/tmp/books.csv")));
        assert_eq!(config.data_path, PathBuf::from("/tmp/books.csv"));
    }

    #[test]
    fn default_path_ends_with_data_file() {
        let config = LibraryConfig::default();
        assert!(config.data_path.ends_with(DATA_FILE_NAME));
    }
}
