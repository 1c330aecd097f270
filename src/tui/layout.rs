use ratatui::layout::{Constraint, Direction, Layout as RatLayout, Rect};

pub struct Layout {
    pub card: Rect,        // Outer rect of the card, border included
    pub header: Rect,      // Title and date
    pub input: Rect,       // Text field, border included
    pub add_button: Rect,
    pub alert: Rect,       // Zero height unless an error is shown
    pub list: Rect,
    pub status: Rect,
}

impl Layout {
    /// Minimum terminal dimensions required for the application
    /// Width: card border (2) + padding (2) + input (at least 16) + gap (1) + button (9)
    /// Height: status (1) + margins (2) + card border (2) + header (2) + gaps (2) + input (3) + alert (3) + list (2)
    pub const MIN_WIDTH: u16 = 30;
    pub const MIN_HEIGHT: u16 = 17;

    const BUTTON_WIDTH: u16 = 9; // "│ + Add │"
    const ALERT_HEIGHT: u16 = 3;

    pub fn calculate(size: Rect, card_width: u16, has_error: bool) -> Self {
        let width = size.width.max(Self::MIN_WIDTH);
        let height = size.height.max(Self::MIN_HEIGHT);
        let size = Rect::new(size.x, size.y, width, height);

        // Status bar takes the bottom line of the screen, the card floats above it
        let screen = RatLayout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(size);
        let body = screen[0];

        // One blank row above and below the card, two columns each side when there is room
        let card_width = card_width
            .max(Self::MIN_WIDTH)
            .min(body.width.saturating_sub(4).max(Self::MIN_WIDTH));
        let card = Rect::new(
            body.x + body.width.saturating_sub(card_width) / 2,
            body.y + 1,
            card_width.min(body.width),
            body.height.saturating_sub(2),
        );

        // Inside the border with one column of padding on each side
        let inner = Rect::new(
            card.x + 2,
            card.y + 1,
            card.width.saturating_sub(4),
            card.height.saturating_sub(2),
        );

        let alert_height = if has_error { Self::ALERT_HEIGHT } else { 0 };
        let rows = RatLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),            // Header
                Constraint::Length(1),            // Gap
                Constraint::Length(3),            // Input row
                Constraint::Length(alert_height), // Alert
                Constraint::Length(1),            // Gap
                Constraint::Min(2),               // List
            ])
            .split(inner);

        let input_row = RatLayout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(10),
                Constraint::Length(1),
                Constraint::Length(Self::BUTTON_WIDTH),
            ])
            .split(rows[2]);

        Self {
            card,
            header: rows[0],
            input: input_row[0],
            add_button: input_row[2],
            alert: rows[3],
            list: rows[5],
            status: screen[1],
        }
    }
}
