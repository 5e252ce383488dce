use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use runlog_core::DATE_FORMAT;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "runlog")]
#[command(
    about = "Log running sessions and review pace, distance and calorie trends",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// SQLite database file holding the run log.
    #[arg(long, env = "RUNLOG_DB", global = true)]
    pub db: Option<PathBuf>,

    /// Absolute directory for rolling log files.
    #[arg(long, env = "RUNLOG_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error (defaults by build mode).
    #[arg(long, env = "RUNLOG_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a new run.
    Add(RunFieldArgs),

    /// Edit an existing run; omitted fields keep their current value.
    Edit {
        id: i64,

        #[command(flatten)]
        fields: RunFieldArgs,
    },

    /// Delete a run.
    Delete {
        id: i64,

        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },

    /// Show one run including its notes.
    Show { id: i64 },

    /// Paginated run history for a date range.
    List(ViewArgs),

    /// Longest runs in a date range.
    Top(ViewArgs),

    /// Distance, pace and calorie series in a date range.
    Chart(ViewArgs),

    /// Write the whole log to running_log_<date>.json.
    Export {
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Replace the whole log with a previously exported file.
    Import {
        file: PathBuf,

        /// Confirm overwriting every stored run.
        #[arg(long)]
        yes: bool,
    },

    /// Print the core library version.
    Version,
}

/// Run form fields. All optional so `edit` can apply partial changes.
#[derive(Args, Default)]
pub struct RunFieldArgs {
    /// Calendar day (YYYY-MM-DD); `add` defaults to today.
    #[arg(long)]
    pub date: Option<String>,

    /// Kilometers.
    #[arg(long)]
    pub distance: Option<String>,

    /// Elapsed time as HH:MM:SS.
    #[arg(long)]
    pub time: Option<String>,

    #[arg(long)]
    pub calories: Option<String>,

    /// Session type, e.g. easy, tempo, long.
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// 1 (bad) to 5 (excellent).
    #[arg(long)]
    pub feeling: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args)]
pub struct ViewArgs {
    /// Range start (YYYY-MM-DD); defaults to three months before `--to`.
    #[arg(long, value_parser = parse_date)]
    pub from: Option<NaiveDate>,

    /// Range end (YYYY-MM-DD); defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub to: Option<NaiveDate>,

    #[arg(long, default_value_t = 1)]
    pub page: usize,

    #[arg(long, default_value_t = runlog_core::DEFAULT_PAGE_SIZE)]
    pub page_size: usize,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| format!("`{value}` is not a YYYY-MM-DD date"))
}
