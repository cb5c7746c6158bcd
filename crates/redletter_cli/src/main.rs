//! Redletter command-line boundary.
//!
//! # Responsibility
//! - Drive every core use-case (submit, today, month, year) from shell
//!   commands.
//! - Keep rendering at this edge; core hands back data structures.
//!
//! # Invariants
//! - "Today" is read from the local clock here and only here.
//! - Failures print a user-facing message and exit non-zero.

use chrono::Local;
use log::warn;
use redletter_core::db::open_db;
use redletter_core::{
    default_log_level, init_logging, month_view, today_view, year_view, EventService,
    SqliteEventRepository, ViewError,
};
use rusqlite::Connection;
use std::env;
use std::process::ExitCode;

const DB_PATH_ENV: &str = "REDLETTER_DB";
const LOG_DIR_ENV: &str = "REDLETTER_LOG_DIR";
const DEFAULT_DB_PATH: &str = "redletter.sqlite3";

fn main() -> ExitCode {
    init_logging_from_env();

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), String> {
    match args {
        [cmd, date_text, rest @ ..] if cmd == "add" && !rest.is_empty() => {
            cmd_add(date_text, &rest.join(" "))
        }
        [cmd] if cmd == "today" => cmd_today(),
        [cmd, month] if cmd == "month" => cmd_month(month),
        [cmd, year] if cmd == "year" => cmd_year(year),
        [cmd] if cmd == "version" => {
            println!("redletter_core version={}", redletter_core::core_version());
            Ok(())
        }
        _ => Err(usage()),
    }
}

fn cmd_add(date_text: &str, content_text: &str) -> Result<(), String> {
    let conn = open_connection()?;
    let repo = repository(&conn)?;
    let service = EventService::new(repo);

    let receipt = service
        .submit(date_text, content_text)
        .map_err(|err| err.user_message())?;
    println!("{}", receipt.echo_line());
    Ok(())
}

fn cmd_today() -> Result<(), String> {
    let conn = open_connection()?;
    let repo = repository(&conn)?;

    let today = Local::now().date_naive();
    let entries = today_view(&repo, today).map_err(render_view_error)?;
    print_json(&entries)
}

fn cmd_month(raw_month: &str) -> Result<(), String> {
    let month: u32 = raw_month
        .parse()
        .map_err(|_| format!("month must be a number from 1 to 12, got `{raw_month}`"))?;

    let conn = open_connection()?;
    let repo = repository(&conn)?;

    let events = month_view(&repo, month).map_err(render_view_error)?;
    print_json(&events)
}

fn cmd_year(raw_year: &str) -> Result<(), String> {
    let year: i32 = raw_year
        .parse()
        .map_err(|_| format!("year must be a number, got `{raw_year}`"))?;

    let conn = open_connection()?;
    let repo = repository(&conn)?;

    let events = year_view(&repo, year).map_err(render_view_error)?;
    print_json(&events)
}

fn open_connection() -> Result<Connection, String> {
    let path = env::var(DB_PATH_ENV).unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
    open_db(&path).map_err(|err| format!("failed to open database `{path}`: {err}"))
}

fn repository(conn: &Connection) -> Result<SqliteEventRepository<'_>, String> {
    SqliteEventRepository::try_new(conn).map_err(|err| format!("database is not usable: {err}"))
}

fn render_view_error(err: ViewError) -> String {
    match err {
        ViewError::NoMatches => "no events found".to_string(),
        ViewError::MonthOutOfRange { month } => {
            format!("month {month} is out of range (expected 1..=12)")
        }
        ViewError::Repo(_) => "query failed, please try again".to_string(),
    }
}

fn print_json(payload: &impl serde::Serialize) -> Result<(), String> {
    let rendered = serde_json::to_string_pretty(payload)
        .map_err(|err| format!("failed to render output: {err}"))?;
    println!("{rendered}");
    Ok(())
}

fn init_logging_from_env() {
    // Logging is opt-in for the CLI; a missing or broken log setup must not
    // block the command itself.
    let Ok(log_dir) = env::var(LOG_DIR_ENV) else {
        return;
    };
    if let Err(message) = init_logging(default_log_level(), &log_dir) {
        warn!("event=cli_logging_init module=cli status=error detail={message}");
        eprintln!("warning: {message}");
    }
}

fn usage() -> String {
    [
        "usage:",
        "  redletter add <date_text> <event text...>",
        "  redletter today",
        "  redletter month <1-12>",
        "  redletter year <yyyy>",
        "  redletter version",
    ]
    .join("\n")
}
