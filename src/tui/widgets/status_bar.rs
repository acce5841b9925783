use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;

use crate::tui::widgets::color::Palette;

const SEPARATOR: &str = " • ";
const ELLIPSIS: &str = "...";

/// Join as many hints as fit in `max_width`, ending with "..." if some were dropped
pub fn fit_hints(key_hints: &[String], max_width: usize) -> String {
    let mut hints_text = String::new();
    for hint in key_hints {
        let current_len = hints_text.chars().count();
        let would_be_len = if hints_text.is_empty() {
            hint.chars().count()
        } else {
            current_len + SEPARATOR.chars().count() + hint.chars().count()
        };

        if would_be_len > max_width {
            if current_len + ELLIPSIS.len() > max_width {
                let keep = max_width.saturating_sub(ELLIPSIS.len());
                hints_text = hints_text.chars().take(keep).collect();
            }
            hints_text.push_str(ELLIPSIS);
            break;
        }

        if !hints_text.is_empty() {
            hints_text.push_str(SEPARATOR);
        }
        hints_text.push_str(hint);
    }
    hints_text
}

pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    message: Option<&String>,
    key_hints: &[String],
    palette: &Palette,
) {
    let max_width = area.width as usize;

    let (content, style) = match message {
        // Status messages get a highlighted background for visibility
        Some(msg) => {
            let mut content = msg.clone();
            if content.chars().count() > max_width {
                content = content.chars().take(max_width.saturating_sub(3)).collect::<String>() + ELLIPSIS;
            }
            (
                content,
                Style::default()
                    .fg(palette.highlight_fg)
                    .bg(palette.highlight_bg)
                    .add_modifier(Modifier::BOLD),
            )
        }
        None => (
            fit_hints(key_hints, max_width),
            Style::default().fg(palette.fg).bg(palette.bg),
        ),
    };

    f.render_widget(Paragraph::new(content).style(style), area);
}
