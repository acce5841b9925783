use clap::{Parser, Subcommand};
use std::path::PathBuf;
use thiserror::Error;

use crate::controller::{Clock, ControllerError, NoteController};
use crate::markup;
use crate::models::{Note, TrashedNote};
use crate::notes::NoteDraft;
use crate::storage::KeyValueStore;
use crate::utils::format_timestamp;

#[derive(Parser)]
#[command(name = "noteblock")]
#[command(about = "Short notes with a trash bin, kept in a local key-value store")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Use development mode (uses separate dev config/store)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch interactive TUI (default if no subcommand)
    Tui,
    /// Save a new note
    Add {
        /// Note text
        text: String,
        /// Note title
        #[arg(long, default_value = "")]
        title: String,
    },
    /// List active notes, newest first
    List {
        /// Print the stored records as JSON
        #[arg(long)]
        json: bool,
    },
    /// List trashed notes, newest first
    Trash {
        /// Print the stored records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Move a note to the trash
    Remove {
        /// Note id
        id: String,
    },
    /// Restore a note from the trash
    Restore {
        /// Note id
        id: String,
    },
    /// Delete a trashed note forever
    Purge {
        /// Note id
        id: String,
    },
    /// Delete every note in the trash
    EmptyTrash,
    /// Render both lists as an HTML page
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    ControllerError(#[from] ControllerError),
    #[error("Failed to encode JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Failed to write output: {0}")]
    IoError(#[from] std::io::Error),
}

/// Handle the add command
pub fn handle_add<S: KeyValueStore, C: Clock>(
    title: String,
    text: String,
    controller: &mut NoteController<S, C>,
) -> Result<String, CliError> {
    let note = controller.add(NoteDraft::new(title, text))?;
    Ok(format!("Note saved (ID: {})", note.id))
}

/// Handle the list command
pub fn handle_list<S: KeyValueStore, C: Clock>(
    json: bool,
    date_format: &str,
    controller: &NoteController<S, C>,
) -> Result<String, CliError> {
    let notes = controller.notes();
    if json {
        return Ok(serde_json::to_string_pretty(&notes)?);
    }
    if notes.is_empty() {
        return Ok(markup::EMPTY_NOTES_MESSAGE.to_string());
    }
    Ok(notes
        .iter()
        .map(|note| format_note_line(note, date_format))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Handle the trash command
pub fn handle_trash<S: KeyValueStore, C: Clock>(
    json: bool,
    date_format: &str,
    controller: &NoteController<S, C>,
) -> Result<String, CliError> {
    let trash = controller.trash();
    if json {
        return Ok(serde_json::to_string_pretty(&trash)?);
    }
    if trash.is_empty() {
        return Ok(markup::EMPTY_TRASH_MESSAGE.to_string());
    }
    Ok(trash
        .iter()
        .map(|trashed| format_trashed_line(trashed, date_format))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Handle the remove command
pub fn handle_remove<S: KeyValueStore, C: Clock>(
    id: &str,
    controller: &mut NoteController<S, C>,
) -> Result<String, CliError> {
    let refresh = controller.move_to_trash(id)?;
    Ok(if refresh.is_none() {
        format!("No active note with ID {}", id)
    } else {
        format!("Note moved to trash (ID: {})", id)
    })
}

/// Handle the restore command
pub fn handle_restore<S: KeyValueStore, C: Clock>(
    id: &str,
    controller: &mut NoteController<S, C>,
) -> Result<String, CliError> {
    let refresh = controller.restore_from_trash(id)?;
    Ok(if refresh.is_none() {
        format!("No trashed note with ID {}", id)
    } else {
        format!("Note restored (ID: {})", id)
    })
}

/// Handle the purge command
pub fn handle_purge<S: KeyValueStore, C: Clock>(
    id: &str,
    controller: &mut NoteController<S, C>,
) -> Result<String, CliError> {
    controller.delete_forever(id)?;
    Ok(format!("Note deleted forever (ID: {})", id))
}

/// Handle the empty-trash command
pub fn handle_empty_trash<S: KeyValueStore, C: Clock>(
    controller: &mut NoteController<S, C>,
) -> Result<String, CliError> {
    controller.empty_trash()?;
    Ok("Trash emptied".to_string())
}

/// Handle the export command. Returns the page when no output file is given.
pub fn handle_export<S: KeyValueStore, C: Clock>(
    output: Option<PathBuf>,
    date_format: &str,
    controller: &NoteController<S, C>,
) -> Result<String, CliError> {
    let page = markup::render_page(&controller.notes(), &controller.trash(), date_format);
    match output {
        Some(path) => {
            std::fs::write(&path, page)?;
            Ok(format!("Exported to {}", path.display()))
        }
        None => Ok(page),
    }
}

fn format_note_line(note: &Note, date_format: &str) -> String {
    format!(
        "{}  {}  {}\n    {}",
        note.id,
        format_timestamp(note.created_at, date_format),
        note.display_title(),
        note.text.replace('\n', "\n    ")
    )
}

fn format_trashed_line(trashed: &TrashedNote, date_format: &str) -> String {
    format!(
        "{} (deleted {})",
        format_note_line(&trashed.note, date_format),
        format_timestamp(trashed.deleted_at, date_format)
    )
}
