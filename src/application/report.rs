use crate::domain::model::record::BookRecord;

/// 蔵書一覧・検索結果のテキスト整形。
pub struct Report;

impl Report {
    /// 全蔵書の一覧。空なら案内文を返す。
    pub fn inventory(records: &[BookRecord]) -> String {
        if records.is_empty() {
            return "The library is currently empty.".to_string();
        }
        let mut buf = format!("# Library Inventory ({} books)\n\n", records.len());
        for r in records {
            buf.push_str(&format!(
                "- {} by {} (ID: {}) - {}\n",
                r.title(),
                r.author(),
                r.id(),
                Self::status(r)
            ));
        }
        buf
    }

    /// 検索結果。1件もなければ「見つからない」旨を返す。
    pub fn search_results(matches: &[&BookRecord]) -> String {
        if matches.is_empty() {
            return "Sorry, no matching books found.".to_string();
        }
        matches
            .iter()
            .map(|r| format!("Found: '{}' by {} (ID: {}).", r.title(), r.author(), r.id()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn status(record: &BookRecord) -> String {
        let state = if record.is_borrowed() {
            "Borrowed"
        } else {
            "Available"
        };
        match record.borrow_count() {
            0 => state.to_string(),
            n => format!("{state} (borrowed {n}x)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::id::BookId;

    #[test]
    fn empty_inventory_message() {
        assert_eq!(Report::inventory(&[]), "The library is currently empty.");
    }

    #[test]
    fn no_match_message_differs_from_empty() {
        assert_ne!(Report::search_results(&[]), Report::inventory(&[]));
    }

    #[test]
    fn status_shows_borrow_count() {
        let r = BookRecord::restore(BookId::new(1), "Dune", "Herbert", false, 2);
        assert!(Report::inventory(&[r]).contains("Available (borrowed 2x)"));
    }
}
