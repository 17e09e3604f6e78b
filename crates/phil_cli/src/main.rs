//! Headless reminder runner.
//!
//! # Responsibility
//! - Wire configuration, logging, storage and the reminder scheduler together.
//! - Run the tickers for a bounded time and print the resulting feed.
//!
//! Usage: `phil_cli [run-seconds]` (defaults to 60).

use chrono::{Datelike, Local};
use phil_core::db::open_db;
use phil_core::{
    core_version, init_logging, AuthService, ReminderScheduler, RuntimeConfig, Session,
    SqliteKeyValueStore, SystemClock,
};
use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_RUN_SECS: u64 = 60;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("phil_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let run_for = match std::env::args().nth(1) {
        Some(raw) => Duration::from_secs(raw.parse::<u64>()?),
        None => Duration::from_secs(DEFAULT_RUN_SECS),
    };

    let config = RuntimeConfig::from_env()?;
    init_logging(config.log_level, &config.log_dir())?;
    log::info!(
        "event=cli_start module=cli status=ok version={} data_dir={}",
        core_version(),
        config.data_dir.display()
    );

    let mut store = SqliteKeyValueStore::new(open_db(config.db_path())?);
    let user = {
        let mut auth = AuthService::new(&mut store);
        match auth.current_user() {
            Some(user) => user,
            None => auth.google_log_in()?,
        }
    };

    let now = Local::now().naive_local();
    let session = Session::open(store, user, now);
    println!(
        "signed in as {} <{}>, {} task(s) today",
        session.user().name,
        session.user().email,
        session.tasks_on_day(now.day()).len()
    );

    let shared = session.into_shared();
    let mut scheduler =
        ReminderScheduler::new(shared.clone(), Arc::new(SystemClock), config.reminder);
    let mut clock = scheduler.subscribe_clock();
    scheduler.start()?;

    let deadline = tokio::time::sleep(run_for);
    tokio::pin!(deadline);
    loop {
        tokio::select! {
            _ = &mut deadline => break,
            changed = clock.changed() => {
                if changed.is_err() {
                    break;
                }
                if let Some(now) = *clock.borrow_and_update() {
                    log::debug!(
                        "event=clock_tick module=cli status=ok now={}",
                        now.format("%H:%M:%S")
                    );
                }
            }
        }
    }
    scheduler.stop().await?;

    let session = shared.lock().await;
    for event in session.feed().iter() {
        println!("[{}] {}", event.time_label(), event.message);
    }
    Ok(())
}
