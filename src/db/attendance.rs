use rusqlite::{params, Connection, Row};
use tracing::{debug, info};

use crate::error::StoreResult;
use crate::models::AttendanceRecord;

/// Escape character used in `LIKE` patterns built from user input.
const LIKE_ESCAPE: char = '\\';

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<AttendanceRecord> {
    Ok(AttendanceRecord {
        id: row.get(0)?,
        lrn: row.get(1)?,
        timestamp: row.get(2)?,
    })
}

/// Append one attendance row. The LRN is stored exactly as given; the entry
/// form is responsible for normalizing it.
pub fn insert_record(conn: &Connection, lrn: &str, timestamp: &str) -> StoreResult<AttendanceRecord> {
    conn.execute(
        "INSERT INTO attendance (lrn, timestamp) VALUES (?1, ?2)",
        params![lrn, timestamp],
    )?;

    let id = conn.last_insert_rowid();
    info!(id, lrn, timestamp, "attendance recorded");
    Ok(AttendanceRecord {
        id,
        lrn: lrn.to_string(),
        timestamp: timestamp.to_string(),
    })
}

/// Every stored record in insertion order.
pub fn fetch_records(conn: &Connection) -> StoreResult<Vec<AttendanceRecord>> {
    let mut stmt = conn.prepare("SELECT id, lrn, timestamp FROM attendance ORDER BY id")?;
    let records = stmt
        .query_map([], record_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

/// Records whose LRN contains `needle` anywhere. Wildcards typed by the user
/// match literally. An empty needle matches every row.
pub fn search_records(conn: &Connection, needle: &str) -> StoreResult<Vec<AttendanceRecord>> {
    let pattern = format!("%{}%", escape_like(needle));
    let mut stmt = conn.prepare(
        "SELECT id, lrn, timestamp FROM attendance
         WHERE lrn LIKE ?1 ESCAPE '\\'
         ORDER BY id",
    )?;
    let records = stmt
        .query_map([pattern], record_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    debug!(needle, matches = records.len(), "attendance search");
    Ok(records)
}

/// Remove every row and report how many were deleted.
pub fn delete_all_records(conn: &Connection) -> StoreResult<usize> {
    let deleted = conn.execute("DELETE FROM attendance", [])?;
    info!(deleted, "all attendance records deleted");
    Ok(deleted)
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_') || ch == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ensure_schema;

    fn store() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        conn
    }

    fn lrns(records: &[AttendanceRecord]) -> Vec<&str> {
        records.iter().map(|r| r.lrn.as_str()).collect()
    }

    #[test]
    fn insert_assigns_increasing_ids() {
        let conn = store();
        let first = insert_record(&conn, "A1", "2024-01-01 08:00:00").unwrap();
        let second = insert_record(&conn, "A1", "2024-01-01 08:00:05").unwrap();
        assert!(second.id > first.id);
        assert_eq!(fetch_records(&conn).unwrap(), vec![first, second]);
    }

    #[test]
    fn fetch_on_empty_table_returns_nothing() {
        let conn = store();
        assert!(fetch_records(&conn).unwrap().is_empty());
    }

    #[test]
    fn search_matches_substring_anywhere() {
        let conn = store();
        for lrn in ["A1", "B2", "A2", "XA9"] {
            insert_record(&conn, lrn, "2024-01-01 08:00:00").unwrap();
        }

        assert_eq!(lrns(&search_records(&conn, "A").unwrap()), ["A1", "A2", "XA9"]);
        assert_eq!(lrns(&search_records(&conn, "2").unwrap()), ["B2", "A2"]);
        assert!(search_records(&conn, "Z").unwrap().is_empty());
    }

    #[test]
    fn search_ignores_ascii_case() {
        let conn = store();
        for lrn in ["A1", "B2", "AB3"] {
            insert_record(&conn, lrn, "2024-01-01 08:00:00").unwrap();
        }
        assert_eq!(lrns(&search_records(&conn, "a").unwrap()), ["A1", "AB3"]);
        assert_eq!(lrns(&search_records(&conn, "aB").unwrap()), ["AB3"]);
    }

    #[test]
    fn empty_search_equals_full_scan() {
        let conn = store();
        for lrn in ["A1", "B2", "A2"] {
            insert_record(&conn, lrn, "2024-01-01 08:00:00").unwrap();
        }
        assert_eq!(search_records(&conn, "").unwrap(), fetch_records(&conn).unwrap());
    }

    #[test]
    fn wildcards_in_the_filter_match_literally() {
        let conn = store();
        for lrn in ["A_1", "AB1", "50%", "500"] {
            insert_record(&conn, lrn, "2024-01-01 08:00:00").unwrap();
        }
        assert_eq!(lrns(&search_records(&conn, "_").unwrap()), ["A_1"]);
        assert_eq!(lrns(&search_records(&conn, "%").unwrap()), ["50%"]);
    }

    #[test]
    fn delete_all_empties_the_table() {
        let conn = store();
        insert_record(&conn, "A1", "2024-01-01 08:00:00").unwrap();
        insert_record(&conn, "B2", "2024-01-01 08:00:00").unwrap();

        assert_eq!(delete_all_records(&conn).unwrap(), 2);
        assert!(fetch_records(&conn).unwrap().is_empty());
        assert_eq!(delete_all_records(&conn).unwrap(), 0);
    }

    #[test]
    fn missing_table_surfaces_storage_failure() {
        let conn = Connection::open_in_memory().unwrap();
        let err = fetch_records(&conn).unwrap_err();
        assert!(err.to_string().starts_with("storage failure"));
    }
}
