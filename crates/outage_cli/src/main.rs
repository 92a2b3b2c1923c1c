//! Outage maintenance CLI.
//!
//! # Responsibility
//! - Drive `outage_core` against a SQLite file for local checks and ops.
//! - Keep output deterministic: one line per outage, stable column order.

use clap::{Parser, Subcommand};
use log::error;
use outage_core::{
    default_log_level, init_logging, ActorId, Clock, FixedActor, Outage, OutageAccessPoint,
    RepoError, ScheduleOutageRequest, SystemClock,
};
use std::path::PathBuf;
use std::process::ExitCode;

const ACTOR_ENV: &str = "OUTAGE_ACTOR_ID";
const LOG_DIR_ENV: &str = "OUTAGE_LOG_DIR";
const LOG_LEVEL_ENV: &str = "OUTAGE_LOG_LEVEL";

/// Inspect and schedule maintenance outages stored in a SQLite file.
///
/// Timestamps are unix epoch seconds. Writes are stamped with the user id
/// read from `OUTAGE_ACTOR_ID`. Set `OUTAGE_LOG_DIR` (and optionally
/// `OUTAGE_LOG_LEVEL`) to enable file logging.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// SQLite database file; created and migrated on first use
    db_path: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// List all outages in schedule order
    List,
    /// Show one outage
    Show { id: String },
    /// Delete one outage; unknown ids are not an error
    Delete { id: String },
    /// Schedule a new outage
    #[command(allow_negative_numbers = true)]
    Schedule {
        /// Start time
        start: i64,
        /// Stop time, strictly after start
        stop: i64,
        /// Title words, joined with single spaces
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },
    /// Print the core library version
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.command == Command::Version {
        println!("outage_core version={}", outage_core::core_version());
        return ExitCode::SUCCESS;
    }

    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        let level = std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| default_log_level().into());
        if let Err(err) = init_logging(&level, &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let actor = match actor_from_env(&cli.command) {
        Ok(actor) => actor,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    let access_point = match OutageAccessPoint::init(&cli.db_path) {
        Ok(access_point) => access_point,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    match run(access_point, &FixedActor(actor), cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn actor_from_env(command: &Command) -> Result<ActorId, String> {
    match std::env::var(ACTOR_ENV) {
        Ok(raw) => raw
            .trim()
            .parse::<ActorId>()
            .map_err(|_| format!("{ACTOR_ENV} must be an integer user id, got `{raw}`")),
        // Reads and deletes never stamp audit fields.
        Err(_) if !matches!(command, Command::Schedule { .. }) => Ok(0),
        Err(_) => Err(format!("{ACTOR_ENV} must be set to schedule outages")),
    }
}

fn run(
    access_point: &OutageAccessPoint,
    actor: &FixedActor,
    command: Command,
) -> Result<(), RepoError> {
    let now = SystemClock.now_secs();
    access_point.with_service(actor, |service| match command {
        Command::List => {
            for outage in service.list_outages()? {
                println!("{}", format_outage(&outage, now));
            }
            Ok(())
        }
        Command::Show { id } => {
            match service.get_outage_by_raw_id(&id)? {
                Some(outage) => println!("{}", format_outage(&outage, now)),
                None => println!("outage {} not found", id.trim()),
            }
            Ok(())
        }
        Command::Delete { id } => {
            service.delete_outage_by_raw_id(&id)?;
            println!("outage {} deleted", id.trim());
            Ok(())
        }
        Command::Schedule { start, stop, title } => {
            let id = service.schedule_outage(&ScheduleOutageRequest {
                title: title.join(" "),
                description: String::new(),
                start_time: start,
                stop_time: stop,
                warn_before_secs: None,
            })?;
            println!("outage {id} scheduled");
            Ok(())
        }
        Command::Version => Ok(()),
    })
}

fn format_outage(outage: &Outage, now: i64) -> String {
    format!(
        "id={} status={} starttime={} stoptime={} warntime={} duration_secs={} title={:?}",
        outage.id.unwrap_or_default(),
        outage.status_at(now),
        outage.start_time,
        outage.stop_time,
        outage.warn_time,
        outage.duration_secs(),
        outage.title
    )
}

#[cfg(test)]
mod tests {
    use super::{format_outage, Cli, Command};
    use clap::error::ErrorKind;
    use clap::{CommandFactory, Parser};
    use outage_core::Outage;
    use std::path::Path;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn schedule_joins_title_words() {
        let cli = Cli::try_parse_from([
            "outage_cli",
            "/tmp/o.db",
            "schedule",
            "100",
            "200",
            "db",
            "upgrade",
        ])
        .unwrap();
        assert_eq!(cli.db_path, Path::new("/tmp/o.db"));
        match cli.command {
            Command::Schedule { start, stop, title } => {
                assert_eq!((start, stop), (100, 200));
                assert_eq!(title.join(" "), "db upgrade");
            }
            other => panic!("expected schedule command, got {other:?}"),
        }
    }

    #[test]
    fn schedule_accepts_pre_epoch_timestamps() {
        let cli =
            Cli::try_parse_from(["outage_cli", "o.db", "schedule", "-200", "-100", "old"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Schedule {
                start: -200,
                stop: -100,
                ..
            }
        ));
    }

    #[test]
    fn version_follows_db_path() {
        let cli = Cli::try_parse_from(["outage_cli", "/tmp/o.db", "version"]).unwrap();
        assert_eq!(cli.command, Command::Version);
    }

    #[test]
    fn show_and_delete_keep_raw_ids() {
        let cli = Cli::try_parse_from(["outage_cli", "o.db", "show", "abc"]).unwrap();
        assert_eq!(cli.command, Command::Show { id: "abc".into() });
        let cli = Cli::try_parse_from(["outage_cli", "o.db", "delete", "7"]).unwrap();
        assert_eq!(cli.command, Command::Delete { id: "7".into() });
    }

    #[test]
    fn rejects_unknown_and_incomplete_commands() {
        let kind = |args: &[&str]| Cli::try_parse_from(args).unwrap_err().kind();

        assert!(Cli::try_parse_from(["outage_cli", "o.db"]).is_err());
        assert!(Cli::try_parse_from(["outage_cli", "o.db", "purge"]).is_err());
        assert_eq!(
            kind(&["outage_cli", "o.db", "show"]),
            ErrorKind::MissingRequiredArgument
        );
        assert_eq!(
            kind(&["outage_cli", "o.db", "schedule", "1", "2"]),
            ErrorKind::MissingRequiredArgument
        );
        assert_eq!(
            kind(&["outage_cli", "o.db", "schedule", "x", "2", "t"]),
            ErrorKind::ValueValidation
        );
    }

    #[test]
    fn list_line_reports_status_and_duration() {
        let mut outage = Outage::new(100, 250, "db upgrade");
        outage.id = Some(3);
        outage.warn_time = 40;

        assert_eq!(
            format_outage(&outage, 60),
            "id=3 status=warning starttime=100 stoptime=250 warntime=40 duration_secs=150 title=\"db upgrade\""
        );
        assert!(format_outage(&outage, 250).contains("status=ended"));
    }
}
