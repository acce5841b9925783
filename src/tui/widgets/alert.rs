use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::tui::widgets::color::Palette;
use crate::tui::widgets::popup_area;

/// Blocking message box; input is swallowed until it is dismissed
pub fn render_alert(f: &mut Frame, area: Rect, message: &str, palette: &Palette) {
    let popup_area = popup_area(area, 40, 25);
    f.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter or Esc to continue",
            Style::default().fg(palette.muted),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Notice")
                .title_alignment(Alignment::Center)
                .border_style(Style::default().fg(palette.highlight_bg)),
        )
        .style(Style::default().fg(palette.fg).bg(palette.bg))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, popup_area);
}
