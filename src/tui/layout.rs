use ratatui::layout::{Constraint, Direction, Layout as RatLayout, Rect};

pub struct Layout {
    pub inner_area: Rect, // Area inside the outer border
    pub title_area: Rect,
    pub text_area: Rect,
    pub notes_area: Option<Rect>,
    pub trash_area: Option<Rect>,
    pub status_area: Rect,
}

impl Layout {
    /// Minimum terminal dimensions required for the application
    /// Height: 3 (title) + 6 (text) + 3 (panes) + 1 (status) inside the border
    pub const MIN_WIDTH: u16 = 40;
    pub const MIN_HEIGHT: u16 = 13;

    /// Height of the text input including its border
    const TEXT_INPUT_HEIGHT: u16 = 6;

    pub fn calculate(size: Rect, show_notes: bool, show_trash: bool) -> Self {
        let width = size.width.max(Self::MIN_WIDTH + 2);
        let height = size.height.max(Self::MIN_HEIGHT + 2);
        let size = Rect::new(size.x, size.y, width, height);

        // Account for the outer border: 1 char on each side
        let inner_area = Rect::new(
            size.x + 1,
            size.y + 1,
            size.width.saturating_sub(2),
            size.height.saturating_sub(2),
        );

        let vertical = RatLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),                       // Title input
                Constraint::Length(Self::TEXT_INPUT_HEIGHT), // Text input
                Constraint::Min(3),                          // Notes + trash
                Constraint::Length(1),                       // Status
            ])
            .split(inner_area);

        let panes_area = vertical[2];
        let (notes_area, trash_area) = match (show_notes, show_trash) {
            (true, true) => {
                let horizontal = RatLayout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(panes_area);
                (Some(horizontal[0]), Some(horizontal[1]))
            }
            (true, false) => (Some(panes_area), None),
            (false, true) => (None, Some(panes_area)),
            (false, false) => (None, None),
        };

        Self {
            inner_area,
            title_area: vertical[0],
            text_area: vertical[1],
            notes_area,
            trash_area,
            status_area: vertical[3],
        }
    }
}
