//! Command-line front end for the notes core.
//!
//! # Responsibility
//! - Wire environment config, logging and the SQLite-backed collection.
//! - Print the notes list (optionally filtered by a search query).
//!
//! # Invariants
//! - The configured database file is only read; sample notes are seeded into
//!   an in-memory database when `--preview` is given.

use log::{error, info};
use notebind_core::config::CoreConfig;
use notebind_core::db::{open_db, open_db_in_memory};
use notebind_core::logging::init_logging_from_config;
use notebind_core::{core_version, NoteService, NotesListModel, SqliteNoteRepository};
use std::process::ExitCode;

const PREVIEW_FLAG: &str = "--preview";

/// Parsed command line: `notebind_cli [--preview] [QUERY]`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliArgs {
    preview: bool,
    query: String,
}

impl CliArgs {
    fn parse(args: impl IntoIterator<Item = String>) -> Self {
        let mut parsed = Self::default();
        for arg in args {
            if arg == PREVIEW_FLAG {
                parsed.preview = true;
            } else if parsed.query.is_empty() {
                parsed.query = arg;
            }
        }
        parsed
    }
}

fn main() -> ExitCode {
    let config = CoreConfig::global();
    if let Err(err) = init_logging_from_config(config) {
        eprintln!("logging disabled: {err}");
    }

    let args = CliArgs::parse(std::env::args().skip(1));
    match run(config, &args) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("notebind: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &CoreConfig, args: &CliArgs) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let (conn, source) = if args.preview {
        (open_db_in_memory()?, "preview".to_string())
    } else {
        (open_db(&config.db_path)?, config.db_path.display().to_string())
    };
    let repo = SqliteNoteRepository::try_new(&conn)?;
    let mut service = NoteService::load(repo)?;
    if args.preview {
        service.seed_preview()?;
    }
    info!(
        "event=cli_run module=cli status=ok preview={} notes={}",
        args.preview,
        service.count()
    );

    let list = NotesListModel::new(service);
    list.search_text().set(args.query.clone());

    let mut lines = vec![format!("notebind {} ({source})", core_version())];
    for handle in list.visible_notes() {
        let note = handle.get();
        lines.push(format!("- {} [{}]", note.title, note.created_label()));
    }
    lines.push(list.footer_label());
    Ok(lines)
}
