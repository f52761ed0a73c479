//! Persistence module split across logical submodules.

mod attendance;
mod connection;

pub use attendance::{delete_all_records, fetch_records, insert_record, search_records};
pub use connection::{close_database, ensure_schema, open_database};
