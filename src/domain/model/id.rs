use serde::{Deserialize, Serialize};
use std::fmt;

/// 蔵書ID。ストアが `max + 1` で採番する整数。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(i64);

impl BookId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// 次のIDを返す。i64の上限に達していればNone。
    pub(crate) fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// ファイル上の文字列からIDを復元する。解釈できなければ0。
    pub fn parse_lenient(s: &str) -> Self {
        Self(s.trim().parse().unwrap_or(0))
    }
}

impl From<i64> for BookId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
