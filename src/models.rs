//! Domain model mirroring the `attendance` table, plus the small amount of
//! normalization the entry form applies before anything is persisted.

use std::fmt;

use chrono::{DateTime, Local};

use crate::error::EntryError;

/// Layout of the `timestamp` column. Local time, second precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
/// One row of the `attendance` table.
pub struct AttendanceRecord {
    /// Primary key assigned by SQLite.
    pub id: i64,
    /// Learner Reference Number, already trimmed and uppercased.
    pub lrn: String,
    /// Creation time as stored, see [`TIMESTAMP_FORMAT`].
    pub timestamp: String,
}

impl AttendanceRecord {
    /// The line shown for this record in the records list.
    pub fn display_line(&self) -> String {
        format!("LRN: {} | {}", self.lrn, self.timestamp)
    }
}

impl fmt::Display for AttendanceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_line())
    }
}

/// Trim surrounding whitespace and uppercase the identifier. Blank input is
/// rejected so no empty LRN ever reaches the store.
pub fn normalize_lrn(raw: &str) -> Result<String, EntryError> {
    let lrn = raw.trim().to_uppercase();
    if lrn.is_empty() {
        Err(EntryError::EmptyLrn)
    } else {
        Ok(lrn)
    }
}

/// Format a point in time the way the `timestamp` column expects it.
pub fn format_timestamp(at: DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Current local time, formatted for storage.
pub fn timestamp_now() -> String {
    format_timestamp(Local::now())
}
