use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::markup::{EMPTY_NOTES_MESSAGE, EMPTY_TRASH_MESSAGE};
use crate::models::{Note, TrashedNote};
use crate::tui::widgets::color::Palette;
use crate::utils::format_timestamp;

/// Styling shared by both panes
pub struct PaneStyle<'a> {
    pub palette: &'a Palette,
    pub date_format: &'a str,
    pub focused: bool,
}

impl PaneStyle<'_> {
    fn block<'b>(&self, title: String) -> Block<'b> {
        let border_style = if self.focused {
            Style::default().fg(self.palette.highlight_bg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.palette.muted)
        };
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border_style)
    }

    fn list<'b>(&self, items: Vec<ListItem<'b>>, title: String) -> List<'b> {
        List::new(items)
            .block(self.block(title))
            .style(Style::default().fg(self.palette.fg).bg(self.palette.bg))
            .highlight_style(
                Style::default()
                    .fg(self.palette.highlight_fg)
                    .bg(self.palette.highlight_bg),
            )
            .highlight_symbol("> ")
    }

    fn placeholder(&self, f: &mut Frame, area: Rect, title: String, message: &str) {
        let paragraph = Paragraph::new(message)
            .block(self.block(title))
            .style(Style::default().fg(self.palette.muted).bg(self.palette.bg))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }
}

/// Title line, text lines, then a dimmed meta line
fn card<'a>(note: &Note, meta: String, palette: &Palette) -> ListItem<'a> {
    let mut lines = vec![Line::from(Span::styled(
        note.display_title().to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    lines.extend(note.text.lines().map(|line| Line::from(line.to_string())));
    lines.push(Line::from(Span::styled(meta, Style::default().fg(palette.muted))));
    lines.push(Line::from(""));
    ListItem::new(Text::from(lines))
}

pub fn render_notes_pane(
    f: &mut Frame,
    area: Rect,
    notes: &[Note],
    list_state: &mut ListState,
    style: &PaneStyle,
) {
    let title = format!("Notes ({})", notes.len());
    if notes.is_empty() {
        style.placeholder(f, area, title, EMPTY_NOTES_MESSAGE);
        return;
    }

    let items: Vec<ListItem> = notes
        .iter()
        .map(|note| {
            card(
                note,
                format_timestamp(note.created_at, style.date_format),
                style.palette,
            )
        })
        .collect();

    f.render_stateful_widget(style.list(items, title), area, list_state);
}

pub fn render_trash_pane(
    f: &mut Frame,
    area: Rect,
    trash: &[TrashedNote],
    list_state: &mut ListState,
    style: &PaneStyle,
) {
    let title = format!("Trash ({})", trash.len());
    if trash.is_empty() {
        style.placeholder(f, area, title, EMPTY_TRASH_MESSAGE);
        return;
    }

    let items: Vec<ListItem> = trash
        .iter()
        .map(|trashed| {
            let meta = format!(
                "Created: {} · Deleted: {}",
                format_timestamp(trashed.note.created_at, style.date_format),
                format_timestamp(trashed.deleted_at, style.date_format)
            );
            card(&trashed.note, meta, style.palette)
        })
        .collect();

    f.render_stateful_widget(style.list(items, title), area, list_state);
}
