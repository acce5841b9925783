use ratatui::widgets::ListState;
use std::time::Instant;

use crate::Config;
use crate::controller::{NoteController, Refresh};
use crate::models::{Note, TrashedNote};
use crate::notes::NoteDraft;
use crate::storage::KeyValueStore;
use crate::tui::error::TuiError;
use crate::tui::widgets::color::Palette;
use crate::tui::widgets::input::InputField;
use crate::utils::{ParsedKeyBinding, parse_key_binding};

/// Which part of the screen receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Title,
    Text,
    Notes,
    Trash,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Help,
    /// Blocking message; cleared with Enter or Esc
    Alert(String),
}

/// Key bindings from the config, parsed once at startup
#[derive(Debug, Clone)]
pub struct Bindings {
    pub quit: ParsedKeyBinding,
    pub save: ParsedKeyBinding,
    pub trash: ParsedKeyBinding,
    pub restore: ParsedKeyBinding,
    pub delete_forever: ParsedKeyBinding,
    pub empty_trash: ParsedKeyBinding,
    pub list_up: ParsedKeyBinding,
    pub list_down: ParsedKeyBinding,
    pub help: ParsedKeyBinding,
}

impl Bindings {
    pub fn from_config(config: &Config) -> Result<Self, TuiError> {
        let keys = &config.key_bindings;
        let parse = |name: &str, value: &str| {
            parse_key_binding(value)
                .map_err(|e| TuiError::KeyBindingError(format!("{}: {}", name, e)))
        };
        Ok(Self {
            quit: parse("quit", &keys.quit)?,
            save: parse("save", &keys.save)?,
            trash: parse("trash", &keys.trash)?,
            restore: parse("restore", &keys.restore)?,
            delete_forever: parse("delete_forever", &keys.delete_forever)?,
            empty_trash: parse("empty_trash", &keys.empty_trash)?,
            list_up: parse("list_up", &keys.list_up)?,
            list_down: parse("list_down", &keys.list_down)?,
            help: parse("help", &keys.help)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: Option<String>,
    pub message_time: Option<Instant>,
}

pub struct App<S: KeyValueStore> {
    pub config: Config,
    pub palette: Palette,
    pub bindings: Bindings,
    pub controller: NoteController<S>,
    pub focus: Focus,
    pub mode: Mode,
    pub title_input: InputField,
    pub text_input: InputField,
    /// Read copies of the stored lists, refreshed after each operation
    pub notes: Vec<Note>,
    pub trash: Vec<TrashedNote>,
    pub notes_state: ListState,
    pub trash_state: ListState,
    pub status: StatusState,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(config: Config, controller: NoteController<S>) -> Result<Self, TuiError> {
        let bindings = Bindings::from_config(&config)?;
        let palette = Palette::from_theme(&config.get_active_theme());

        let mut app = Self {
            config,
            palette,
            bindings,
            controller,
            focus: Focus::Title,
            mode: Mode::Normal,
            title_input: InputField::single_line(),
            text_input: InputField::multi_line(),
            notes: Vec::new(),
            trash: Vec::new(),
            notes_state: ListState::default(),
            trash_state: ListState::default(),
            status: StatusState::default(),
        };
        app.refresh(Refresh::BOTH);
        Ok(app)
    }

    /// Reload the lists the operation touched. Hidden panes are never loaded.
    pub fn refresh(&mut self, refresh: Refresh) {
        if refresh.active && self.config.show_notes_pane {
            self.notes = self.controller.notes();
            clamp_selection(&mut self.notes_state, self.notes.len());
        }
        if refresh.trash && self.config.show_trash_pane {
            self.trash = self.controller.trash();
            clamp_selection(&mut self.trash_state, self.trash.len());
        }
    }

    /// Focus targets in Tab order, skipping hidden panes
    fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![Focus::Title, Focus::Text];
        if self.config.show_notes_pane {
            order.push(Focus::Notes);
        }
        if self.config.show_trash_pane {
            order.push(Focus::Trash);
        }
        order
    }

    pub fn focus_next(&mut self) {
        let order = self.focus_order();
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(pos + 1) % order.len()];
    }

    pub fn focus_prev(&mut self) {
        let order = self.focus_order();
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(pos + order.len() - 1) % order.len()];
    }

    /// Leave the inputs for the first visible pane, if any
    pub fn focus_panes(&mut self) {
        if self.config.show_notes_pane {
            self.focus = Focus::Notes;
        } else if self.config.show_trash_pane {
            self.focus = Focus::Trash;
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.focus, Focus::Title | Focus::Text)
    }

    pub fn current_input(&mut self) -> Option<&mut InputField> {
        match self.focus {
            Focus::Title => Some(&mut self.title_input),
            Focus::Text => Some(&mut self.text_input),
            _ => None,
        }
    }

    /// Save the inputs as a new note. Empty text raises the blocking alert.
    pub fn save_note(&mut self) {
        let draft = NoteDraft::new(self.title_input.value(), self.text_input.value());
        match self.controller.add(draft) {
            Ok(_) => {
                self.title_input.clear();
                self.text_input.clear();
                self.focus = Focus::Title;
                self.refresh(Refresh::ACTIVE);
                self.notes_state.select(if self.notes.is_empty() { None } else { Some(0) });
                self.set_status_message("Note saved".to_string());
            }
            Err(e) if e.is_empty_text() => {
                self.mode = Mode::Alert(e.to_string());
            }
            Err(e) => {
                self.set_status_message(format!("Failed to save note: {}", e));
            }
        }
    }

    pub fn selected_note_id(&self) -> Option<String> {
        self.notes_state
            .selected()
            .and_then(|i| self.notes.get(i))
            .map(|n| n.id.clone())
    }

    pub fn selected_trash_id(&self) -> Option<String> {
        self.trash_state
            .selected()
            .and_then(|i| self.trash.get(i))
            .map(|t| t.id().to_string())
    }

    pub fn trash_selected(&mut self) {
        if !self.config.show_notes_pane {
            return;
        }
        let Some(id) = self.selected_note_id() else {
            return;
        };
        match self.controller.move_to_trash(&id) {
            Ok(refresh) => {
                self.refresh(refresh);
                if !refresh.is_none() {
                    self.set_status_message("Note moved to trash".to_string());
                }
            }
            Err(e) => self.set_status_message(format!("Failed to move note to trash: {}", e)),
        }
    }

    pub fn restore_selected(&mut self) {
        if !self.config.show_trash_pane {
            return;
        }
        let Some(id) = self.selected_trash_id() else {
            return;
        };
        match self.controller.restore_from_trash(&id) {
            Ok(refresh) => {
                self.refresh(refresh);
                if !refresh.is_none() {
                    self.set_status_message("Note restored".to_string());
                }
            }
            Err(e) => self.set_status_message(format!("Failed to restore note: {}", e)),
        }
    }

    pub fn delete_selected_forever(&mut self) {
        if !self.config.show_trash_pane {
            return;
        }
        let Some(id) = self.selected_trash_id() else {
            return;
        };
        match self.controller.delete_forever(&id) {
            Ok(refresh) => {
                self.refresh(refresh);
                self.set_status_message("Note deleted forever".to_string());
            }
            Err(e) => self.set_status_message(format!("Failed to delete note: {}", e)),
        }
    }

    pub fn empty_trash(&mut self) {
        if !self.config.show_trash_pane {
            return;
        }
        match self.controller.empty_trash() {
            Ok(refresh) => {
                self.refresh(refresh);
                self.set_status_message("Trash emptied".to_string());
            }
            Err(e) => self.set_status_message(format!("Failed to empty trash: {}", e)),
        }
    }

    pub fn move_selection_up(&mut self) {
        match self.focus {
            Focus::Notes => step_selection(&mut self.notes_state, self.notes.len(), false),
            Focus::Trash => step_selection(&mut self.trash_state, self.trash.len(), false),
            _ => {}
        }
    }

    pub fn move_selection_down(&mut self) {
        match self.focus {
            Focus::Notes => step_selection(&mut self.notes_state, self.notes.len(), true),
            Focus::Trash => step_selection(&mut self.trash_state, self.trash.len(), true),
            _ => {}
        }
    }

    pub fn toggle_help(&mut self) {
        self.mode = if self.mode == Mode::Help { Mode::Normal } else { Mode::Help };
    }

    pub fn dismiss_alert(&mut self) {
        if matches!(self.mode, Mode::Alert(_)) {
            self.mode = Mode::Normal;
        }
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status.message = Some(message);
        self.status.message_time = Some(Instant::now());
    }

    pub fn clear_status_message(&mut self) {
        self.status.message = None;
        self.status.message_time = None;
    }

    /// Check if status message should be auto-cleared (after 3 seconds)
    pub fn check_status_message_timeout(&mut self) {
        const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 3;
        if let Some(time) = self.status.message_time {
            if time.elapsed().as_secs() >= STATUS_MESSAGE_TIMEOUT_SECS {
                self.clear_status_message();
            }
        }
    }
}

/// Keep the selection inside the list after it shrank or grew
fn clamp_selection(state: &mut ListState, len: usize) {
    if len == 0 {
        state.select(None);
        return;
    }
    let selected = state.selected().unwrap_or(0).min(len - 1);
    state.select(Some(selected));
}

fn step_selection(state: &mut ListState, len: usize, down: bool) {
    if len == 0 {
        return;
    }
    let current = state.selected().unwrap_or(0);
    let next = if down {
        (current + 1).min(len - 1)
    } else {
        current.saturating_sub(1)
    };
    state.select(Some(next));
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    pub(crate) fn app_with(config: Config) -> App<MemoryStore> {
        App::new(config, NoteController::new(MemoryStore::new())).unwrap()
    }

    fn type_into(field: &mut InputField, text: &str) {
        for ch in text.chars() {
            field.insert_char(ch);
        }
    }

    #[test]
    fn saving_clears_inputs_and_selects_new_note() {
        let mut app = app_with(Config::default());
        type_into(&mut app.title_input, "A");
        type_into(&mut app.text_input, "hello");

        app.save_note();

        assert_eq!(app.notes.len(), 1);
        assert_eq!(app.notes[0].title, "A");
        assert_eq!(app.title_input.value(), "");
        assert_eq!(app.text_input.value(), "");
        assert_eq!(app.notes_state.selected(), Some(0));
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn saving_blank_text_raises_alert_and_keeps_inputs() {
        let mut app = app_with(Config::default());
        type_into(&mut app.title_input, "title only");
        type_into(&mut app.text_input, "   ");

        app.save_note();

        assert_eq!(app.mode, Mode::Alert("Please enter a note.".to_string()));
        assert!(app.notes.is_empty());
        assert_eq!(app.title_input.value(), "title only");

        app.dismiss_alert();
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn trash_restore_and_purge_flow_through_panes() {
        let mut app = app_with(Config::default());
        for text in ["one", "two"] {
            type_into(&mut app.text_input, text);
            app.save_note();
        }

        app.focus = Focus::Notes;
        app.notes_state.select(Some(1));
        app.trash_selected();
        assert_eq!(app.notes.len(), 1);
        assert_eq!(app.trash.len(), 1);
        assert_eq!(app.trash[0].note.text, "one");
        assert_eq!(app.notes_state.selected(), Some(0));

        app.restore_selected();
        assert_eq!(app.notes[0].text, "one");
        assert!(app.trash.is_empty());
        assert_eq!(app.trash_state.selected(), None);

        app.notes_state.select(Some(0));
        app.trash_selected();
        app.delete_selected_forever();
        assert!(app.trash.is_empty());
        assert_eq!(app.notes.len(), 1);
    }

    #[test]
    fn hidden_trash_pane_disables_its_actions() {
        let mut config = Config::default();
        config.show_trash_pane = false;
        let mut app = app_with(config);

        type_into(&mut app.text_input, "note");
        app.save_note();
        app.notes_state.select(Some(0));
        app.trash_selected();

        assert!(app.notes.is_empty());
        assert!(app.trash.is_empty());
        assert_eq!(app.controller.trash().len(), 1);

        app.empty_trash();
        assert_eq!(app.controller.trash().len(), 1);
    }

    #[test]
    fn focus_cycle_skips_hidden_panes() {
        let mut config = Config::default();
        config.show_notes_pane = false;
        let mut app = app_with(config);

        app.focus_next();
        assert_eq!(app.focus, Focus::Text);
        app.focus_next();
        assert_eq!(app.focus, Focus::Trash);
        app.focus_next();
        assert_eq!(app.focus, Focus::Title);
        app.focus_prev();
        assert_eq!(app.focus, Focus::Trash);
    }

    #[test]
    fn bad_key_binding_is_reported() {
        let mut config = Config::default();
        config.key_bindings.trash = "Hyper+d".to_string();
        let result = App::new(config, NoteController::new(MemoryStore::new()));
        assert!(matches!(result, Err(TuiError::KeyBindingError(_))));
    }
}
