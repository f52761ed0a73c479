//! Core library surface for the attendance tracker TUI.
//!
//! The binary only wires these pieces together; tests and any other tooling
//! can reuse the store functions directly.
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod ui;

/// Persistence entry points used by `main.rs` and the UI.
pub use db::{
    close_database, delete_all_records, ensure_schema, fetch_records, insert_record,
    open_database, search_records,
};

pub use config::AppPaths;
pub use error::{EntryError, StoreError, StoreResult};
pub use logging::init_logging;
pub use models::AttendanceRecord;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
