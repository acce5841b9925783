use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::Config;
use crate::tui::widgets::color::Palette;
use crate::tui::widgets::popup_area;
use crate::utils::format_key_binding_for_display as display;

pub fn render_help(f: &mut Frame, area: Rect, config: &Config, palette: &Palette) {
    let popup_area = popup_area(area, 60, 70);

    // Clear the background first so the panes don't show through
    f.render_widget(Clear, popup_area);

    let paragraph = Paragraph::new(build_help_text(config))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help - Key Bindings")
                .title_alignment(Alignment::Center),
        )
        .style(Style::default().fg(palette.fg).bg(palette.bg))
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, popup_area);
}

pub fn build_help_text(config: &Config) -> String {
    let keys = &config.key_bindings;
    let mut text = String::new();

    text.push_str("Writing:\n");
    text.push_str("  Enter (title field): Save note\n");
    text.push_str(&format!("  {}: Save note\n", display(&keys.save)));
    text.push_str("  Enter (text field): New line\n");
    text.push_str("  Tab / Shift+Tab: Next / previous field or pane\n");
    text.push_str("  Esc: Leave the inputs\n");
    text.push('\n');

    if config.show_notes_pane {
        text.push_str("Notes:\n");
        text.push_str(&format!("  {}: Move to trash\n", display(&keys.trash)));
        text.push('\n');
    }

    if config.show_trash_pane {
        text.push_str("Trash:\n");
        text.push_str(&format!("  {}: Restore\n", display(&keys.restore)));
        text.push_str(&format!("  {}: Delete forever\n", display(&keys.delete_forever)));
        text.push_str(&format!("  {}: Empty trash\n", display(&keys.empty_trash)));
        text.push('\n');
    }

    text.push_str("General:\n");
    text.push_str(&format!(
        "  {} / {}: Move selection\n",
        display(&keys.list_up),
        display(&keys.list_down)
    ));
    text.push_str(&format!("  {}: Quit (from a pane)\n", display(&keys.quit)));
    text.push_str("  Ctrl+c: Quit\n");
    text.push_str(&format!("  {}: Show/hide help\n", display(&keys.help)));

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_trash_pane_drops_its_section() {
        let mut config = Config::default();
        assert!(build_help_text(&config).contains("Empty trash"));

        config.show_trash_pane = false;
        let text = build_help_text(&config);
        assert!(!text.contains("Empty trash"));
        assert!(text.contains("Move to trash"));
    }
}
