use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::tui::widgets::color::parse_color;

pub const TITLE: &str = "Todo App";

/// Card title with today's date underneath
pub fn render_header(f: &mut Frame, area: Rect, today: &str, theme: &Theme) {
    let fg_color = parse_color(&theme.fg);
    let muted = parse_color(&theme.muted);

    let lines = vec![
        Line::from(Span::styled(
            TITLE,
            Style::default().fg(fg_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(today.to_string(), Style::default().fg(muted))),
    ];

    f.render_widget(Paragraph::new(lines), area);
}
