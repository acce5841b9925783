use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use noteblock::cli::{self, Cli, Commands};
use noteblock::{Config, NoteController, Profile, SqliteStore, logging};

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    let cli = Cli::parse();

    // --dev keeps config and notes apart from the real ones
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    let config = match cli.config {
        Some(ref path) => Config::load_from_path(path)?,
        None => Config::load_with_profile(profile)?,
    };

    // Logging is best-effort; a read-only data dir should not stop the app
    if let Err(e) = logging::init_logging(&config.log_level, &config.get_log_dir()) {
        eprintln!("warning: logging disabled: {}", e);
    }

    match cli.command {
        None | Some(Commands::Tui) => noteblock::tui::launch(config)?,
        Some(command) => {
            let output = run_command(command, &config)?;
            println!("{}", output);
        }
    }

    Ok(())
}

fn run_command(command: Commands, config: &Config) -> Result<String> {
    let db_path = config.get_database_path();
    let store = SqliteStore::open(
        db_path
            .to_str()
            .ok_or_else(|| eyre!("Store path contains invalid UTF-8"))?,
    )?;
    let mut controller = NoteController::new(store)
        .keys(config.store_keys())
        .id_strategy(config.id_strategy);
    let date_format = config.date_format.as_str();

    let output = match command {
        Commands::Tui => String::new(),
        Commands::Add { text, title } => cli::handle_add(title, text, &mut controller)?,
        Commands::List { json } => cli::handle_list(json, date_format, &controller)?,
        Commands::Trash { json } => cli::handle_trash(json, date_format, &controller)?,
        Commands::Remove { id } => cli::handle_remove(&id, &mut controller)?,
        Commands::Restore { id } => cli::handle_restore(&id, &mut controller)?,
        Commands::Purge { id } => cli::handle_purge(&id, &mut controller)?,
        Commands::EmptyTrash => cli::handle_empty_trash(&mut controller)?,
        Commands::Export { output } => cli::handle_export(output, date_format, &controller)?,
    };
    Ok(output)
}
