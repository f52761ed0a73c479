//! Binary entry point: resolve paths, start logging, open the attendance
//! database, and drive the Ratatui event loop until the user quits.
use anyhow::Context;
use attendance_tracker::{close_database, init_logging, open_database, run_app, App, AppPaths};
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    let paths = AppPaths::resolve()?;
    init_logging(&paths.log_path)?;
    info!(data_dir = %paths.data_dir.display(), "starting attendance tracker");

    let conn = open_database(&paths.db_path)?;
    let mut app = App::new(conn);
    let result = run_app(&mut app);
    if let Err(err) = &result {
        error!(error = %err, "terminal loop failed");
    }

    close_database(app.into_connection()).context("failed to close attendance database")?;
    info!("attendance tracker stopped");
    result
}
