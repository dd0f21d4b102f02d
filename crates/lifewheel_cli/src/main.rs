//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `lifewheel_core` linkage.
//! - Optionally print one month's wheel for a SQLite database file.
//!
//! Usage: `lifewheel_cli [DB_PATH [YYYY-MM]]`

use lifewheel_core::db::open_db;
use lifewheel_core::{areas, LoadOutcome, MonthKey, SqliteWheelRepository, WheelStateStore};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("lifewheel_core ping={}", lifewheel_core::ping());
    println!("lifewheel_core version={}", lifewheel_core::core_version());

    let mut args = std::env::args().skip(1);
    let Some(db_path) = args.next() else {
        return ExitCode::SUCCESS;
    };
    let month = match args.next() {
        Some(value) => match parse_month_arg(&value) {
            Some(month) => month,
            None => {
                eprintln!("invalid month `{value}`; expected YYYY-MM");
                return ExitCode::FAILURE;
            }
        },
        None => MonthKey::current(),
    };

    match print_month(&db_path, month) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn parse_month_arg(value: &str) -> Option<MonthKey> {
    MonthKey::parse_storage(&format!("{}-01", value.trim()))
}

fn print_month(db_path: &str, month: MonthKey) -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db(db_path)?;
    let repo = SqliteWheelRepository::try_new(&conn)?;
    let mut store = WheelStateStore::new(repo);
    if store.load_month(month) == LoadOutcome::Failed {
        let description = store
            .take_notices()
            .into_iter()
            .map(|notice| notice.description)
            .next()
            .unwrap_or_else(|| "failed to load month".to_string());
        return Err(description.into());
    }

    println!("{}", month.label());
    for descriptor in areas() {
        let marker = if store.entry_for(descriptor.area).is_some() {
            ""
        } else {
            " (default)"
        };
        println!(
            "  {} {:<16} {:>2}{}",
            descriptor.icon,
            descriptor.name,
            store.score_for(descriptor.area),
            marker
        );
    }
    if let Some(summary) = store.summary() {
        println!(
            "overall={} {}",
            summary.balance_label(),
            summary.coverage_label()
        );
    }
    Ok(())
}
