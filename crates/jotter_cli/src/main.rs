//! Command-line front end for the note store.
//!
//! # Responsibility
//! - Own the UI-layer duties the core leaves to its caller: the delete
//!   confirmation prompt, the empty-field message before a save, and the
//!   file read/write plumbing around import/export.
//! - Render the list with the active-note marker.

use clap::{Parser, Subcommand};
use jotter_core::{
    default_log_level, init_logging, FileSlot, JsonNoteStore, Note, NoteId, NotesSession,
    StoreError,
};
use log::debug;
use std::io::{BufRead, Write};
use std::path::PathBuf;

const NOTES_FILE_NAME: &str = "notes.json";

#[derive(Parser, Debug)]
#[command(name = "jotter", version, about = "Single-user note taking")]
struct Cli {
    /// Data directory (default: the platform-local app data dir).
    #[arg(long, global = true, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error.
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all notes, most recently updated first.
    List,
    /// Show one note in full (the most recent one when no id is given).
    Show {
        id: Option<NoteId>,
    },
    /// Create a note.
    Add {
        title: String,
        body: String,
    },
    /// Update a note's title and body.
    Edit {
        id: NoteId,
        title: String,
        body: String,
    },
    /// Delete a note after confirmation.
    #[command(alias = "rm")]
    Delete {
        id: NoteId,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Merge notes from an XML document into the store.
    Import {
        file: PathBuf,
    },
    /// Write all stored notes to an XML document.
    Export {
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(message) = run(cli) {
        eprintln!("error: {message}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let data_dir = resolve_data_dir(cli.data_dir)?;
    let level = cli
        .log_level
        .unwrap_or_else(|| default_log_level().to_string());
    init_logging(&level, &data_dir.join("logs").to_string_lossy())?;

    let slot = FileSlot::new(data_dir.join(NOTES_FILE_NAME));
    debug!(
        "event=cli_start module=cli slot={}",
        slot.path().display()
    );
    let mut session =
        NotesSession::open(JsonNoteStore::new(slot)).map_err(|err| err.to_string())?;

    match cli.command {
        Command::List => {
            if session.notes().is_empty() {
                println!("no notes yet");
                return Ok(());
            }
            let active = session.active().map(|note| note.id);
            for note in session.notes() {
                let marker = if active == Some(note.id) { "*" } else { " " };
                println!(
                    "{marker} {:>7}  {}  {}",
                    note.id,
                    note.updated.format("%Y-%m-%d %H:%M"),
                    note.title
                );
            }
        }
        Command::Show { id } => {
            if let Some(id) = id {
                session.select(id);
            }
            match session.active() {
                Some(note) => print_note(note),
                None => println!("no notes yet"),
            }
        }
        Command::Add { title, body } => {
            let saved = session
                .create(&title, &body)
                .map_err(|err| err.to_string())?;
            println!("saved note {}", saved.id);
        }
        Command::Edit { id, title, body } => {
            let saved = session
                .update(id, &title, &body)
                .map_err(|err| err.to_string())?;
            println!("saved note {}", saved.id);
        }
        Command::Delete { id, yes } => {
            if !yes && !confirm(&format!("delete note {id}? [y/N] "))? {
                println!("kept note {id}");
                return Ok(());
            }
            session.remove(id).map_err(|err| err.to_string())?;
            match session.active() {
                Some(note) => println!("deleted; active note is now {} ({})", note.id, note.title),
                None => println!("deleted; no notes left"),
            }
        }
        Command::Import { file } => {
            let document = std::fs::read_to_string(&file)
                .map_err(|err| format!("read `{}`: {err}", file.display()))?;
            let count = session
                .import_xml(&document)
                .map_err(|err| err.to_string())?;
            println!("imported {count} notes ({} stored)", session.notes().len());
        }
        Command::Export { file } => match session.export_xml() {
            Ok(document) => {
                std::fs::write(&file, document)
                    .map_err(|err| format!("write `{}`: {err}", file.display()))?;
                println!(
                    "exported {} notes to {}",
                    session.notes().len(),
                    file.display()
                );
            }
            // Not a fault: there is simply nothing to export.
            Err(StoreError::EmptyCollection) => println!("nothing to export"),
            Err(err) => return Err(err.to_string()),
        },
    }

    Ok(())
}

fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf, String> {
    if let Some(dir) = flag {
        if dir.is_absolute() {
            return Ok(dir);
        }
        // Logging init insists on absolute paths; anchor relative flags to
        // the working directory up front.
        return std::env::current_dir()
            .map(|cwd| cwd.join(dir))
            .map_err(|err| format!("cannot resolve working directory: {err}"));
    }
    dirs::data_local_dir()
        .map(|dir| dir.join("jotter"))
        .ok_or_else(|| "no platform data directory; pass --data-dir".to_string())
}

fn print_note(note: &Note) {
    println!("# {} (id {})", note.title, note.id);
    println!("updated: {}", note.updated.format("%Y-%m-%d %H:%M:%S"));
    println!();
    println!("{}", note.body);
}

fn confirm(prompt: &str) -> Result<bool, String> {
    print!("{prompt}");
    std::io::stdout()
        .flush()
        .map_err(|err| format!("stdout: {err}"))?;
    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|err| format!("stdin: {err}"))?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
