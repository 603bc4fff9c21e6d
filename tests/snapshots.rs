//! Snapshot tests — data file format and inventory output regression detection.

mod common;

use common::{open_service, InMemoryRepo};
use insta::{assert_json_snapshot, assert_snapshot};

use library_mcp::application::report::Report;
use library_mcp::application::service::LibraryService;
use library_mcp::domain::repository::LibraryRepository;
use library_mcp::infra::csv_store::CsvLibraryRepository;

/// 3冊登録し、1冊は貸出中・1冊は返却済みにしたService。
fn standard(repo: &InMemoryRepo) -> LibraryService<InMemoryRepo> {
    let mut svc = open_service(repo);
    let dune = svc.add_book("Dune", "Frank Herbert").unwrap().id();
    let gatsby = svc.add_book("The Great Gatsby", "F. Scott Fitzgerald").unwrap().id();
    svc.add_book("Great Expectations", "Charles Dickens").unwrap();
    svc.borrow_book(dune).unwrap();
    svc.borrow_book(gatsby).unwrap();
    svc.return_book(gatsby).unwrap();
    svc
}

// =============================================================================
// Data file
// =============================================================================

#[test]
fn snapshot_data_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library_data.csv");
    let repo = InMemoryRepo::new();
    let svc = standard(&repo);

    let csv = CsvLibraryRepository::new(&path);
    csv.save(svc.list_all()).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_snapshot!("data_file", content);
}

// =============================================================================
// Inventory / search output
// =============================================================================

#[test]
fn snapshot_inventory() {
    let repo = InMemoryRepo::new();
    let svc = standard(&repo);
    assert_snapshot!("inventory", Report::inventory(svc.list_all()));
}

#[test]
fn snapshot_search_great() {
    let repo = InMemoryRepo::new();
    let svc = standard(&repo);
    assert_snapshot!("search_great", Report::search_results(&svc.search("great")));
}

#[test]
fn snapshot_records_json() {
    let repo = InMemoryRepo::new();
    let svc = standard(&repo);
    assert_json_snapshot!("records_json", svc.list_all());
}
