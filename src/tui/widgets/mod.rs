pub mod color;
pub mod error_alert;
pub mod header;
pub mod help;
pub mod input_row;
pub mod status_bar;
pub mod todo_list;

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use unicode_width::UnicodeWidthStr;

/// Centered rect using a percentage of the available rect
/// Based on ratatui popup example: https://ratatui.rs/examples/apps/popup/
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

/// Longest prefix of `text` that fits in `max_width` terminal cells
pub fn fit_prefix(text: &str, max_width: usize) -> &str {
    let mut end = 0;
    for (i, ch) in text.char_indices() {
        let next = i + ch.len_utf8();
        if text[..next].width() > max_width {
            break;
        }
        end = next;
    }
    &text[..end]
}

/// Cut `text` to `max_width` cells, ending in "..." when shortened
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 3 {
        return fit_prefix(text, max_width).to_string();
    }
    format!("{}...", fit_prefix(text, max_width - 3))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation() {
        assert_eq!(truncate_with_ellipsis("Buy milk", 8), "Buy milk");
        assert_eq!(truncate_with_ellipsis("Buy oat milk", 8), "Buy o...");
        assert_eq!(truncate_with_ellipsis("Buy", 2), "Bu");
    }

    #[test]
    fn truncation_counts_wide_characters_as_two_cells() {
        assert_eq!(truncate_with_ellipsis("牛乳を買う", 10), "牛乳を買う");
        assert_eq!(truncate_with_ellipsis("牛乳を買う", 9), "牛乳を...");
        // A wide character never straddles the limit
        assert_eq!(truncate_with_ellipsis("牛乳を買う", 8), "牛乳...");
        assert_eq!(fit_prefix("牛乳", 3), "牛");
        assert_eq!(truncate_with_ellipsis("牛乳を買う", 8).width(), 7);
    }

    #[test]
    fn popup_is_centered() {
        let area = popup_area(Rect::new(0, 0, 100, 40), 60, 70);
        assert_eq!(area, Rect::new(20, 6, 60, 28));
    }
}
