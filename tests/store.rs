//! On-disk behavior of the attendance store.

use attendance_tracker::{
    close_database, delete_all_records, fetch_records, insert_record, open_database,
    search_records, AppPaths,
};
use tempfile::TempDir;

#[test]
fn open_creates_data_dir_and_database_file() {
    let temp = TempDir::new().unwrap();
    let paths = AppPaths::in_dir(temp.path().join("nested").join("data"));

    let conn = open_database(&paths.db_path).unwrap();
    assert!(paths.db_path.exists());
    assert!(fetch_records(&conn).unwrap().is_empty());
    close_database(conn).unwrap();
}

#[test]
fn records_survive_reopen() {
    let temp = TempDir::new().unwrap();
    let paths = AppPaths::in_dir(temp.path());

    let conn = open_database(&paths.db_path).unwrap();
    insert_record(&conn, "A1", "2024-06-10 08:00:00").unwrap();
    insert_record(&conn, "B2", "2024-06-10 08:01:00").unwrap();
    close_database(conn).unwrap();

    let conn = open_database(&paths.db_path).unwrap();
    let records = fetch_records(&conn).unwrap();
    let lines: Vec<_> = records.iter().map(|r| r.display_line()).collect();
    assert_eq!(
        lines,
        [
            "LRN: A1 | 2024-06-10 08:00:00",
            "LRN: B2 | 2024-06-10 08:01:00",
        ]
    );
    close_database(conn).unwrap();
}

#[test]
fn search_then_delete_all() {
    let temp = TempDir::new().unwrap();
    let conn = open_database(&temp.path().join("attendance.db")).unwrap();

    for lrn in ["A1", "B2", "A2"] {
        insert_record(&conn, lrn, "2024-06-10 08:00:00").unwrap();
    }

    let mut found: Vec<_> = search_records(&conn, "A")
        .unwrap()
        .into_iter()
        .map(|r| r.lrn)
        .collect();
    found.sort();
    assert_eq!(found, ["A1", "A2"]);
    assert_eq!(search_records(&conn, "").unwrap().len(), 3);

    assert_eq!(delete_all_records(&conn).unwrap(), 3);
    assert!(fetch_records(&conn).unwrap().is_empty());
    close_database(conn).unwrap();
}
