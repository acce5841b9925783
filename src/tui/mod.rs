pub mod app;
pub mod error;
pub mod events;
pub mod layout;
pub mod render;
pub mod widgets;

pub use app::{App, Focus, Mode};
pub use error::TuiError;
pub use events::run_event_loop;
pub use layout::Layout;
pub use render::render;

use crate::Config;
use crate::controller::NoteController;
use crate::storage::SqliteStore;

/// Open the configured store and run the interactive UI until the user quits
pub fn launch(config: Config) -> Result<(), TuiError> {
    let db_path = config.get_database_path();
    let store = SqliteStore::open(&db_path.to_string_lossy())?;
    let controller = NoteController::new(store)
        .keys(config.store_keys())
        .id_strategy(config.id_strategy);

    let app = App::new(config, controller)?;
    run_event_loop(app)
}
