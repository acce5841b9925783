use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::controller::StoreKeys;
use crate::storage::{DEFAULT_NOTES_KEY, DEFAULT_TRASH_KEY};
use crate::utils::{self, IdStrategy};

/// Current configuration version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_config_version")]
    pub config_version: Option<u32>,
    #[serde(default = "default_database_path")]
    pub database_path: String,
    #[serde(default = "default_notes_key")]
    pub notes_key: String,
    #[serde(default = "default_trash_key")]
    pub trash_key: String,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default)]
    pub id_strategy: IdStrategy,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_true")]
    pub show_notes_pane: bool,
    #[serde(default = "default_true")]
    pub show_trash_pane: bool,
    #[serde(default)]
    pub key_bindings: KeyBindings,
    #[serde(default = "default_current_theme")]
    pub current_theme: String,
    #[serde(default)]
    pub themes: HashMap<String, Theme>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(default = "default_quit")]
    pub quit: String,
    #[serde(default = "default_save")]
    pub save: String,
    #[serde(default = "default_trash")]
    pub trash: String,
    #[serde(default = "default_restore")]
    pub restore: String,
    #[serde(default = "default_delete_forever")]
    pub delete_forever: String,
    #[serde(default = "default_empty_trash")]
    pub empty_trash: String,
    #[serde(default = "default_list_up")]
    pub list_up: String,
    #[serde(default = "default_list_down")]
    pub list_down: String,
    #[serde(default = "default_help")]
    pub help: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default = "default_fg")]
    pub fg: String,
    #[serde(default = "default_bg")]
    pub bg: String,
    #[serde(default = "default_highlight_bg")]
    pub highlight_bg: String,
    #[serde(default = "default_highlight_fg")]
    pub highlight_fg: String,
    #[serde(default = "default_muted")]
    pub muted: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_version: Some(CURRENT_CONFIG_VERSION),
            database_path: default_database_path(),
            notes_key: default_notes_key(),
            trash_key: default_trash_key(),
            date_format: default_date_format(),
            id_strategy: IdStrategy::default(),
            log_level: default_log_level(),
            show_notes_pane: true,
            show_trash_pane: true,
            key_bindings: KeyBindings::default(),
            current_theme: default_current_theme(),
            themes: HashMap::new(),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: default_quit(),
            save: default_save(),
            trash: default_trash(),
            restore: default_restore(),
            delete_forever: default_delete_forever(),
            empty_trash: default_empty_trash(),
            list_up: default_list_up(),
            list_down: default_list_down(),
            help: default_help(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: default_fg(),
            bg: default_bg(),
            highlight_bg: default_highlight_bg(),
            highlight_fg: default_highlight_fg(),
            muted: default_muted(),
        }
    }
}

impl Theme {
    /// Get preset themes that are always available
    pub fn get_preset_themes() -> HashMap<String, Theme> {
        let mut themes = HashMap::new();

        themes.insert("default".to_string(), Theme::default());

        themes.insert("light".to_string(), Theme {
            fg: "black".to_string(),
            bg: "white".to_string(),
            highlight_bg: "blue".to_string(),
            highlight_fg: "white".to_string(),
            muted: "darkgray".to_string(),
        });

        themes.insert("green".to_string(), Theme {
            fg: "green".to_string(),
            bg: "black".to_string(),
            highlight_bg: "yellow".to_string(),
            highlight_fg: "black".to_string(),
            muted: "gray".to_string(),
        });

        themes
    }
}

// Default value functions
fn default_config_version() -> Option<u32> {
    Some(CURRENT_CONFIG_VERSION)
}

fn default_database_path() -> String {
    // Fallback only - the profile decides the real path at load time
    Config::default_database_path_for_profile(utils::Profile::Prod)
}

fn default_notes_key() -> String {
    DEFAULT_NOTES_KEY.to_string()
}

fn default_trash_key() -> String {
    DEFAULT_TRASH_KEY.to_string()
}

fn default_date_format() -> String {
    utils::DEFAULT_DATE_FORMAT.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_current_theme() -> String {
    "default".to_string()
}

fn default_quit() -> String {
    "q".to_string()
}

fn default_save() -> String {
    "Ctrl+s".to_string()
}

fn default_trash() -> String {
    "d".to_string()
}

fn default_restore() -> String {
    "r".to_string()
}

fn default_delete_forever() -> String {
    "x".to_string()
}

fn default_empty_trash() -> String {
    "E".to_string()
}

fn default_list_up() -> String {
    "k".to_string()
}

fn default_list_down() -> String {
    "j".to_string()
}

fn default_help() -> String {
    "F1".to_string()
}

fn default_fg() -> String {
    "white".to_string()
}

fn default_bg() -> String {
    "black".to_string()
}

fn default_highlight_bg() -> String {
    "blue".to_string()
}

fn default_highlight_fg() -> String {
    "white".to_string()
}

fn default_muted() -> String {
    "gray".to_string()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config directory: {0}")]
    ConfigDirError(String),
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
}

impl Config {
    /// Load configuration from the profile's config file, or create it with
    /// defaults if missing
    pub fn load_with_profile(profile: utils::Profile) -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path(profile)?;

        if config_path.exists() {
            let mut config = Self::load_from_path(&config_path)?;
            config.apply_profile_store_path(profile);
            Ok(config)
        } else {
            let mut config = Config::default();
            config.database_path = Self::default_database_path_for_profile(profile);
            config.save_to_path(&config_path)?;
            Ok(config)
        }
    }

    /// Load configuration from an explicit file. Missing fields take defaults.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;
        let mut config: Config = toml::from_str(&contents)?;
        config.repair_date_format();
        Ok(config)
    }

    /// Point an unset or prod-default store path at the profile's own store.
    /// Keeps dev and prod data apart when a file is copied between profiles;
    /// a path the user chose is left alone.
    fn apply_profile_store_path(&mut self, profile: utils::Profile) {
        let prod_default = Self::default_database_path_for_profile(utils::Profile::Prod);
        if self.database_path.trim().is_empty() || self.database_path == prod_default {
            self.database_path = Self::default_database_path_for_profile(profile);
        }
    }

    /// Replace a date format chrono cannot render with the default
    fn repair_date_format(&mut self) {
        if !utils::is_valid_date_format(&self.date_format) {
            log::warn!(
                "event=config_date_format_invalid value={:?} fallback={:?}",
                self.date_format,
                utils::DEFAULT_DATE_FORMAT
            );
            self.date_format = utils::DEFAULT_DATE_FORMAT.to_string();
        }
    }

    /// Save configuration to an explicit file
    pub fn save_to_path(&mut self, path: &Path) -> Result<(), ConfigError> {
        // Ensure config version is set before saving
        self.config_version = Some(CURRENT_CONFIG_VERSION);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::WriteError(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, toml_string).map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn get_config_path(profile: utils::Profile) -> Result<PathBuf, ConfigError> {
        let config_dir = utils::get_config_dir(profile)
            .ok_or_else(|| ConfigError::ConfigDirError("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("config.toml"))
    }

    /// Get default store path for a specific profile
    fn default_database_path_for_profile(profile: utils::Profile) -> String {
        if let Some(data_dir) = utils::get_data_dir(profile) {
            data_dir.join("notes.db").to_string_lossy().to_string()
        } else {
            match profile {
                utils::Profile::Dev => "~/.local/share/noteblock-dev/notes.db".to_string(),
                utils::Profile::Prod => "~/.local/share/noteblock/notes.db".to_string(),
            }
        }
    }

    /// Get the expanded store path (with ~ expansion)
    pub fn get_database_path(&self) -> PathBuf {
        utils::expand_path(&self.database_path)
    }

    /// Directory for log files, next to the store
    pub fn get_log_dir(&self) -> PathBuf {
        self.get_database_path()
            .parent()
            .map(|dir| dir.join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs"))
    }

    /// Storage keys for the two note lists
    pub fn store_keys(&self) -> StoreKeys {
        StoreKeys {
            notes: self.notes_key.clone(),
            trash: self.trash_key.clone(),
        }
    }

    /// Get the currently active theme. User-defined themes shadow presets;
    /// unknown names fall back to the default theme.
    pub fn get_active_theme(&self) -> Theme {
        if let Some(theme) = self.themes.get(&self.current_theme) {
            theme.clone()
        } else if let Some(theme) = Theme::get_preset_themes().get(&self.current_theme) {
            theme.clone()
        } else {
            Theme::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_fills_every_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.notes_key, "noteblock_notes");
        assert_eq!(config.trash_key, "noteblock_trash");
        assert_eq!(config.id_strategy, IdStrategy::Uuid);
        assert!(config.show_notes_pane && config.show_trash_pane);
        assert_eq!(config.key_bindings.save, "Ctrl+s");
        assert_eq!(config.config_version, Some(CURRENT_CONFIG_VERSION));
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let config: Config = toml::from_str(
            r#"
            id_strategy = "timestamp"
            show_trash_pane = false

            [key_bindings]
            trash = "Delete"
            "#,
        )
        .unwrap();
        assert_eq!(config.id_strategy, IdStrategy::Timestamp);
        assert!(!config.show_trash_pane);
        assert_eq!(config.key_bindings.trash, "Delete");
        assert_eq!(config.key_bindings.restore, "r");
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.date_format = "%d.%m.%Y".to_string();
        config.current_theme = "light".to_string();
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.date_format, "%d.%m.%Y");
        assert_eq!(loaded.get_active_theme().bg, "white");
    }

    #[test]
    fn invalid_date_format_is_replaced_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "date_format = \"%Q %Y\"\n").unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.date_format, utils::DEFAULT_DATE_FORMAT);
    }

    #[test]
    fn custom_store_path_survives_profile_defaults() {
        let mut config = Config::default();
        config.database_path = "/srv/notes/mine.db".to_string();
        config.apply_profile_store_path(utils::Profile::Dev);
        assert_eq!(config.database_path, "/srv/notes/mine.db");
    }

    #[test]
    fn copied_prod_store_path_moves_to_dev() {
        let mut config = Config::default();
        config.apply_profile_store_path(utils::Profile::Dev);
        assert_eq!(
            config.database_path,
            Config::default_database_path_for_profile(utils::Profile::Dev)
        );

        config.database_path = String::new();
        config.apply_profile_store_path(utils::Profile::Prod);
        assert_eq!(
            config.database_path,
            Config::default_database_path_for_profile(utils::Profile::Prod)
        );
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let mut config = Config::default();
        config.current_theme = "no-such-theme".to_string();
        assert_eq!(config.get_active_theme(), Theme::default());
    }

    #[test]
    fn store_keys_follow_config() {
        let mut config = Config::default();
        config.notes_key = "mine".to_string();
        assert_eq!(config.store_keys().notes, "mine");
        assert_eq!(config.store_keys().trash, "noteblock_trash");
    }
}
