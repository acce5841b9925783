use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::widgets::color::Palette;

/// Editable text buffer for the title and text inputs.
/// The cursor is a char index, so multi-byte input is safe to edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    value: String,
    cursor: usize,
    multiline: bool,
}

impl InputField {
    pub fn single_line() -> Self {
        Self::default()
    }

    pub fn multi_line() -> Self {
        Self {
            multiline: true,
            ..Self::default()
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' && !self.multiline {
            return;
        }
        let idx = self.byte_index(self.cursor);
        self.value.insert(idx, ch);
        self.cursor += 1;
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = self.byte_index(self.cursor);
        self.value.remove(idx);
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.char_count() {
            return;
        }
        let idx = self.byte_index(self.cursor);
        self.value.remove(idx);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    /// Start of the current line
    pub fn move_home(&mut self) {
        let (_, col) = self.cursor_line_col();
        self.cursor -= col;
    }

    /// End of the current line
    pub fn move_end(&mut self) {
        let rest = self.value.chars().skip(self.cursor).take_while(|c| *c != '\n').count();
        self.cursor += rest;
    }

    /// (line, column) of the cursor, both zero-based and counted in chars
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let mut line = 0;
        let mut col = 0;
        for ch in self.value.chars().take(self.cursor) {
            if ch == '\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        (line, col)
    }
}

pub fn render_input(
    f: &mut Frame,
    area: Rect,
    field: &InputField,
    label: &str,
    focused: bool,
    palette: &Palette,
) {
    let border_style = if focused {
        Style::default().fg(palette.highlight_bg).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.muted)
    };

    let inner_height = area.height.saturating_sub(2) as usize;
    let inner_width = area.width.saturating_sub(2) as usize;
    let (line, col) = field.cursor_line_col();

    // Keep the cursor in view
    let scroll_y = line.saturating_sub(inner_height.saturating_sub(1));
    let scroll_x = if field.is_multiline() {
        0
    } else {
        col.saturating_sub(inner_width.saturating_sub(1))
    };

    let paragraph = Paragraph::new(field.value())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(label)
                .border_style(border_style),
        )
        .style(Style::default().fg(palette.fg).bg(palette.bg))
        .scroll((scroll_y as u16, scroll_x as u16));

    f.render_widget(paragraph, area);

    if focused && inner_width > 0 && inner_height > 0 {
        let x = area.x + 1 + (col - scroll_x).min(inner_width - 1) as u16;
        let y = area.y + 1 + (line - scroll_y).min(inner_height - 1) as u16;
        f.set_cursor_position((x, y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(field: &mut InputField, text: &str) {
        for ch in text.chars() {
            field.insert_char(ch);
        }
    }

    #[test]
    fn edits_multibyte_text_by_char() {
        let mut field = InputField::single_line();
        typed(&mut field, "Grüße");
        field.move_left();
        field.backspace();
        assert_eq!(field.value(), "Grüe");
        field.move_home();
        field.delete();
        assert_eq!(field.value(), "rüe");
    }

    #[test]
    fn single_line_ignores_newlines() {
        let mut field = InputField::single_line();
        typed(&mut field, "a\nb");
        assert_eq!(field.value(), "ab");
    }

    #[test]
    fn multi_line_tracks_line_and_column() {
        let mut field = InputField::multi_line();
        typed(&mut field, "one");
        field.insert_newline();
        typed(&mut field, "tw");
        assert_eq!(field.cursor_line_col(), (1, 2));

        field.move_home();
        assert_eq!(field.cursor_line_col(), (1, 0));
        field.move_left();
        assert_eq!(field.cursor_line_col(), (0, 3));
        field.move_home();
        field.move_end();
        assert_eq!(field.cursor_line_col(), (0, 3));
    }

    #[test]
    fn clear_resets_cursor() {
        let mut field = InputField::multi_line();
        typed(&mut field, "text");
        field.clear();
        assert_eq!(field.value(), "");
        assert_eq!(field.cursor_line_col(), (0, 0));
        field.backspace();
        assert_eq!(field.value(), "");
    }
}
