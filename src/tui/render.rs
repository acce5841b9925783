use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};

use crate::storage::KeyValueStore;
use crate::tui::app::{App, Focus, Mode};
use crate::tui::layout::Layout;
use crate::tui::widgets::{
    alert::render_alert,
    help::render_help,
    input::render_input,
    note_list::{PaneStyle, render_notes_pane, render_trash_pane},
    status_bar::render_status_bar,
};
use crate::utils::format_key_binding_for_display as display;

pub fn render<S: KeyValueStore>(f: &mut Frame, app: &mut App<S>, layout: &Layout) {
    let palette = app.palette;
    let full_area = f.area();

    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("noteblock")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(palette.fg).bg(palette.bg));
    f.render_widget(outer_block, full_area);

    // Inputs first; the focused one places the cursor
    let editing = app.mode == Mode::Normal;
    render_input(
        f,
        layout.title_area,
        &app.title_input,
        "Title",
        editing && app.focus == Focus::Title,
        &palette,
    );
    render_input(
        f,
        layout.text_area,
        &app.text_input,
        "Note",
        editing && app.focus == Focus::Text,
        &palette,
    );

    let date_format = app.config.date_format.clone();
    if let Some(area) = layout.notes_area {
        let style = PaneStyle {
            palette: &palette,
            date_format: &date_format,
            focused: app.focus == Focus::Notes,
        };
        render_notes_pane(f, area, &app.notes, &mut app.notes_state, &style);
    }
    if let Some(area) = layout.trash_area {
        let style = PaneStyle {
            palette: &palette,
            date_format: &date_format,
            focused: app.focus == Focus::Trash,
        };
        render_trash_pane(f, area, &app.trash, &mut app.trash_state, &style);
    }

    let key_hints = get_key_hints(app);
    render_status_bar(
        f,
        layout.status_area,
        app.status.message.as_ref(),
        &key_hints,
        &palette,
    );

    // Overlays last so they sit on top
    match &app.mode {
        Mode::Help => render_help(f, full_area, &app.config, &palette),
        Mode::Alert(message) => render_alert(f, full_area, message, &palette),
        Mode::Normal => {}
    }
}

pub fn get_key_hints<S: KeyValueStore>(app: &App<S>) -> Vec<String> {
    let keys = &app.config.key_bindings;
    match app.mode {
        Mode::Help => vec![format!("Esc or {}: Exit help", display(&keys.help))],
        Mode::Alert(_) => vec!["Enter/Esc: Dismiss".to_string()],
        Mode::Normal => {
            let mut hints = match app.focus {
                Focus::Title => vec![
                    "Enter: Save".to_string(),
                    "Tab: Next field".to_string(),
                    "Esc: Leave inputs".to_string(),
                ],
                Focus::Text => vec![
                    format!("{}: Save", display(&keys.save)),
                    "Enter: New line".to_string(),
                    "Tab: Next field".to_string(),
                    "Esc: Leave inputs".to_string(),
                ],
                Focus::Notes => vec![
                    format!("{}: Move to trash", display(&keys.trash)),
                    "Tab: Next pane".to_string(),
                    format!("{}: Quit", display(&keys.quit)),
                ],
                Focus::Trash => vec![
                    format!("{}: Restore", display(&keys.restore)),
                    format!("{}: Delete forever", display(&keys.delete_forever)),
                    format!("{}: Empty trash", display(&keys.empty_trash)),
                    format!("{}: Quit", display(&keys.quit)),
                ],
            };
            hints.push(format!("{}: Help", display(&keys.help)));
            hints
        }
    }
}
