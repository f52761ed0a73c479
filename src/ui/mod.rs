//! Ratatui front-end: an entry form for marking attendance and a records list
//! with a live LRN filter, plus the modal dialogs shared by both.

mod app;
mod dialogs;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
