use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::config::Theme;
use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::truncate_with_ellipsis;

/// Inline validation alert shown under the input row
pub fn render_error_alert(f: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    if area.height == 0 {
        return;
    }
    let error_color = parse_color(&theme.error);

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(error_color));
    let max_width = block.inner(area).width.saturating_sub(2) as usize;

    let line = Line::from(vec![
        Span::styled("! ", Style::default().fg(error_color).add_modifier(Modifier::BOLD)),
        Span::styled(truncate_with_ellipsis(message, max_width), Style::default().fg(error_color)),
    ]);

    f.render_widget(Paragraph::new(line).block(block), area);
}
