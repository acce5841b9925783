use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    size as terminal_size,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use std::io;
use std::time::Duration;

use crate::storage::KeyValueStore;
use crate::tui::app::{App, Focus, Mode};
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;

/// Guard that restores the terminal even on panic.
/// If the terminal is left in raw mode or the alternate screen, the user's
/// shell is unusable.
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut guard = Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: false,
        };
        execute!(io::stdout(), EnterAlternateScreen)?;
        guard.alternate_screen_enabled = true;
        Ok(guard)
    }

    /// Restore terminal state explicitly; drop becomes a no-op afterwards
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Already in a cleanup path; errors are ignored
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

pub fn run_event_loop<S: KeyValueStore>(mut app: App<S>) -> Result<(), TuiError> {
    // Check the size before entering the alternate screen so the error shows in the normal terminal
    let (width, height) = terminal_size()?;
    let min_width = Layout::MIN_WIDTH + 2;
    let min_height = Layout::MIN_HEIGHT + 2;
    if width < min_width || height < min_height {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, Minimum required: {}x{}. Please resize your terminal window.",
            width, height, min_width, min_height
        )));
    }

    let mut guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    loop {
        app.check_status_message_timeout();

        let size = terminal.size()?;
        let terminal_rect = Rect::new(0, 0, size.width, size.height);
        terminal.draw(|f| {
            let layout = Layout::calculate(
                terminal_rect,
                app.config.show_notes_pane,
                app.config.show_trash_pane,
            );
            crate::tui::render::render(f, &mut app, &layout);
        })?;

        if event::poll(Duration::from_millis(16))? {
            // Only Press events; Windows also reports Release
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press && handle_key_event(&mut app, key_event) {
                    break;
                }
            }
        }
    }

    guard.restore()?;
    log::info!("event=tui_exit");
    Ok(())
}

/// Apply one key press. Returns true when the user asked to quit.
pub fn handle_key_event<S: KeyValueStore>(app: &mut App<S>, key_event: KeyEvent) -> bool {
    if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    match app.mode {
        Mode::Alert(_) => {
            if matches!(key_event.code, KeyCode::Enter | KeyCode::Esc) {
                app.dismiss_alert();
            }
            return false;
        }
        Mode::Help => {
            if key_event.code == KeyCode::Esc || app.bindings.help.matches(&key_event) {
                app.toggle_help();
            }
            return false;
        }
        Mode::Normal => {}
    }

    if app.bindings.help.matches(&key_event) {
        app.toggle_help();
        return false;
    }

    match key_event.code {
        KeyCode::Tab => {
            app.focus_next();
            return false;
        }
        KeyCode::BackTab => {
            app.focus_prev();
            return false;
        }
        _ => {}
    }

    if app.is_editing() {
        handle_input_key(app, key_event);
        false
    } else {
        handle_pane_key(app, key_event)
    }
}

fn handle_input_key<S: KeyValueStore>(app: &mut App<S>, key_event: KeyEvent) {
    if app.bindings.save.matches(&key_event) {
        app.save_note();
        return;
    }

    let on_title = app.focus == Focus::Title;
    match key_event.code {
        KeyCode::Enter if on_title => app.save_note(),
        KeyCode::Esc => app.focus_panes(),
        _ => {
            let Some(input) = app.current_input() else {
                return;
            };
            match key_event.code {
                KeyCode::Enter => input.insert_newline(),
                KeyCode::Backspace => input.backspace(),
                KeyCode::Delete => input.delete(),
                KeyCode::Left => input.move_left(),
                KeyCode::Right => input.move_right(),
                KeyCode::Home => input.move_home(),
                KeyCode::End => input.move_end(),
                KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                    input.insert_char(c)
                }
                _ => {}
            }
        }
    }
}

fn handle_pane_key<S: KeyValueStore>(app: &mut App<S>, key_event: KeyEvent) -> bool {
    if app.bindings.quit.matches(&key_event) {
        return true;
    }
    if app.bindings.list_up.matches(&key_event) || key_event.code == KeyCode::Up {
        app.move_selection_up();
        return false;
    }
    if app.bindings.list_down.matches(&key_event) || key_event.code == KeyCode::Down {
        app.move_selection_down();
        return false;
    }

    match app.focus {
        Focus::Notes => {
            if app.bindings.trash.matches(&key_event) {
                app.trash_selected();
            }
        }
        Focus::Trash => {
            if app.bindings.restore.matches(&key_event) {
                app.restore_selected();
            } else if app.bindings.delete_forever.matches(&key_event) {
                app.delete_selected_forever();
            } else if app.bindings.empty_trash.matches(&key_event) {
                app.empty_trash();
            }
        }
        Focus::Title | Focus::Text => {}
    }
    false
}
