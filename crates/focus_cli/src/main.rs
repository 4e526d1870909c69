//! CLI smoke entry point.
//!
//! # Responsibility
//! - Open the configured state store and run one activation (audit + streak).
//! - Print the derived dashboard numbers in a stable `key=value` layout.

use focus_core::db::open_db;
use focus_core::{
    core_version, progress_percent, resolve_db_path, FocusService, RolloverOutcome,
    SqliteStateRepository, SystemClock, UuidGenerator,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("focus_core version={}", core_version());

    let db_path = resolve_db_path();
    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open {}: {err}", db_path.display());
            return ExitCode::FAILURE;
        }
    };
    let repo = match SqliteStateRepository::try_new(conn) {
        Ok(repo) => repo,
        Err(err) => {
            eprintln!("failed to prepare state store: {err}");
            return ExitCode::FAILURE;
        }
    };

    let service = match FocusService::start(repo, SystemClock, UuidGenerator) {
        Ok(service) => service,
        Err(err) => {
            eprintln!("failed to start focus session: {err}");
            return ExitCode::FAILURE;
        }
    };
    match service.rollover_outcome() {
        Some(RolloverOutcome::Audited {
            missed_date,
            harvested,
        }) => println!("audit=ran missed_date={missed_date} harvested={harvested}"),
        Some(RolloverOutcome::ClockBehind { last_active_date }) => {
            println!("audit=skipped reason=clock_behind last_active_date={last_active_date}")
        }
        Some(RolloverOutcome::AlreadyAudited) | None => println!("audit=skipped"),
    }

    let summary = service.summary();
    println!("db_path={}", db_path.display());
    println!("last_active_date={}", service.state().last_active_date);
    println!(
        "tasks={}/{} progress={}%",
        summary.completed_tasks,
        summary.total_tasks,
        progress_percent(summary.global_progress)
    );
    for pillar in &summary.pillars {
        println!(
            "pillar={} tasks={}/{} progress={}%",
            pillar.id.as_str(),
            pillar.completed,
            pillar.total,
            progress_percent(pillar.progress)
        );
    }
    println!("overflow={}", summary.overflow_count);
    println!("streak={} celebrate={}", summary.streak, summary.celebrate);
    ExitCode::SUCCESS
}
