pub mod cli;
pub mod config;
pub mod controller;
pub mod logging;
pub mod markup;
pub mod models;
pub mod notes;
pub mod storage;
pub mod tui;
pub mod utils;

pub use config::Config;
pub use controller::{Clock, ControllerError, NoteController, Refresh, StoreKeys, SystemClock};
pub use models::{Note, TrashedNote};
pub use notes::{NoteDraft, NoteError, NoteLists};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StorageError};
pub use utils::{IdStrategy, Profile};
