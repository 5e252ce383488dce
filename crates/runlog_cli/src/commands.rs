use crate::args::{Cli, Commands, RunFieldArgs, ViewArgs};
use crate::render::{Sections, TextRenderer};
use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use log::info;
use runlog_core::db::open_db;
use runlog_core::{
    default_log_level, export_file_name, init_logging, DateRange, RunDraft, RunStore,
    SqliteBlobRepository, ViewCoordinator, DATE_FORMAT,
};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "runlog";
const DB_FILE_NAME: &str = "runlog.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Resolved runtime configuration: flags, then env, then defaults.
struct Settings {
    db_path: PathBuf,
    log_dir: PathBuf,
    log_level: String,
}

impl Settings {
    fn resolve(cli: &Cli) -> Result<Self> {
        let default_path = |name: &str| -> Result<PathBuf> {
            dirs::data_local_dir()
                .map(|dir| dir.join(APP_DIR_NAME).join(name))
                .context("could not determine a local data directory; pass --db and --log-dir")
        };

        Ok(Self {
            db_path: match &cli.db {
                Some(path) => path.clone(),
                None => default_path(DB_FILE_NAME)?,
            },
            log_dir: match &cli.log_dir {
                Some(path) => path.clone(),
                None => default_path(LOG_DIR_NAME)?,
            },
            log_level: cli
                .log_level
                .clone()
                .unwrap_or_else(|| default_log_level().to_string()),
        })
    }
}

pub fn run(cli: Cli) -> Result<()> {
    if let Commands::Version = cli.command {
        println!("runlog_core {}", runlog_core::core_version());
        return Ok(());
    }

    let settings = Settings::resolve(&cli)?;
    start_logging(&settings);
    let conn = open_connection(&settings.db_path)?;
    let repo = SqliteBlobRepository::try_new(&conn).context("database is not ready")?;
    let store = RunStore::open(repo).context("failed to load the run log")?;
    let today = Local::now().date_naive();

    match cli.command {
        Commands::Add(fields) => {
            let draft = fields.into_draft(RunDraft {
                date: today.format(DATE_FORMAT).to_string(),
                ..RunDraft::default()
            });
            let mut view = quiet_view(store, today);
            let record = view.add(&draft).context("run was not added")?;
            println!("Run {} added ({}).", record.id, record.date_label());
        }
        Commands::Edit { id, fields } => {
            let current = store
                .get(id)
                .map(RunDraft::from_record)
                .with_context(|| format!("run {id} does not exist"))?;
            let draft = fields.into_draft(current);
            let mut view = quiet_view(store, today);
            let record = view
                .update(id, &draft)
                .with_context(|| format!("run {id} was not updated"))?;
            println!("Run {} updated ({}).", record.id, record.date_label());
        }
        Commands::Delete { id, yes } => {
            if !yes {
                bail!("deleting run {id} cannot be undone; re-run with --yes to confirm");
            }
            let mut view = quiet_view(store, today);
            if view.delete(id).context("run was not deleted")? {
                println!("Run {id} deleted.");
            } else {
                println!("Run {id} does not exist; nothing deleted.");
            }
        }
        Commands::Show { id } => {
            let record = store
                .get(id)
                .with_context(|| format!("run {id} does not exist"))?;
            let row = runlog_core::run_row(record);
            println!("id:       {}", row.id);
            println!("date:     {}", row.date);
            println!("distance: {}", row.distance);
            println!("time:     {}", row.time);
            println!("pace:     {} min/km", row.pace);
            println!("calories: {}", row.calories);
            println!("type:     {}", row.kind);
            println!("feeling:  {} {}", row.feeling_icon, row.feeling_label);
            println!("notes:    {}", record.notes);
        }
        Commands::List(args) => print_view(store, &args, today, Sections::history()),
        Commands::Top(args) => print_view(store, &args, today, Sections::top_list()),
        Commands::Chart(args) => print_view(store, &args, today, Sections::charts()),
        Commands::Export { out_dir } => {
            let payload = store.export_json().context("export failed")?;
            let path = out_dir.join(export_file_name(today));
            std::fs::write(&path, payload)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(
                "event=store_export module=cli status=ok total={}",
                store.len()
            );
            println!("Exported {} run(s) to {}.", store.len(), path.display());
        }
        Commands::Import { file, yes } => {
            if !yes {
                bail!("importing replaces every stored run; re-run with --yes to confirm");
            }
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let mut view = quiet_view(store, today);
            let imported = view
                .import_json(&text)
                .with_context(|| format!("failed to import {}", file.display()))?;
            println!("Imported {imported} run(s).");
        }
        // Answered before the database is opened.
        Commands::Version => {}
    }

    Ok(())
}

impl RunFieldArgs {
    /// Overlays provided flags on a base draft.
    fn into_draft(self, base: RunDraft) -> RunDraft {
        RunDraft {
            date: self.date.unwrap_or(base.date),
            distance: self.distance.unwrap_or(base.distance),
            time: self.time.unwrap_or(base.time),
            calories: self.calories.unwrap_or(base.calories),
            kind: self.kind.unwrap_or(base.kind),
            feeling: self.feeling.unwrap_or(base.feeling),
            notes: self.notes.unwrap_or(base.notes),
        }
    }
}

fn start_logging(settings: &Settings) {
    let log_dir = settings.log_dir.to_string_lossy();
    if let Err(err) = init_logging(&settings.log_level, &log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }
}

fn open_connection(db_path: &Path) -> Result<Connection> {
    if let Some(parent) = db_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    open_db(db_path).with_context(|| format!("failed to open {}", db_path.display()))
}

fn quiet_view(
    store: RunStore<SqliteBlobRepository<'_>>,
    today: NaiveDate,
) -> ViewCoordinator<SqliteBlobRepository<'_>, TextRenderer> {
    ViewCoordinator::new(
        store,
        TextRenderer::new(Sections::none()),
        DateRange::default_for(today),
    )
}

fn print_view(
    store: RunStore<SqliteBlobRepository<'_>>,
    args: &ViewArgs,
    today: NaiveDate,
    sections: Sections,
) {
    let end = args.to.unwrap_or(today);
    let range = DateRange {
        start: args.from.unwrap_or(DateRange::default_for(end).start),
        end,
    };

    let mut view = ViewCoordinator::new(store, TextRenderer::new(sections), range)
        .with_page_size(args.page_size)
        .with_page(args.page);
    view.recompute();
    print!("{}", view.sink().output());
}
