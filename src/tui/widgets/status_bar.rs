use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::tui::widgets::{fit_prefix, truncate_with_ellipsis};
use unicode_width::UnicodeWidthStr;

const SEPARATOR: &str = " • ";
const ELLIPSIS: &str = "...";

/// One-line bar: a transient status message if set, otherwise key hints
pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    message: Option<&str>,
    key_hints: &[String],
    theme: &Theme,
) {
    let max_width = area.width as usize;

    let (content, style) = match message {
        Some(msg) => {
            let highlight_bg = parse_color(&theme.highlight_bg);
            let msg_fg = get_contrast_text_color(highlight_bg);
            (
                truncate_with_ellipsis(msg, max_width),
                Style::default().fg(msg_fg).bg(highlight_bg).add_modifier(Modifier::BOLD),
            )
        }
        None => {
            let fg_color = parse_color(&theme.fg);
            let backdrop = parse_color(&theme.backdrop);
            (fit_hints(key_hints, max_width), Style::default().fg(fg_color).bg(backdrop))
        }
    };

    f.render_widget(Paragraph::new(content).style(style), area);
}

/// Join as many hints as fit in `max_width`, marking dropped ones with an ellipsis
pub fn fit_hints(key_hints: &[String], max_width: usize) -> String {
    let mut text = String::new();
    let mut used = 0;

    for (i, hint) in key_hints.iter().enumerate() {
        let sep_len = if i == 0 { 0 } else { SEPARATOR.width() };
        let hint_len = hint.width();

        if used + sep_len + hint_len > max_width {
            if i == 0 {
                return truncate_with_ellipsis(hint, max_width);
            }
            if used + ELLIPSIS.len() > max_width {
                text = fit_prefix(&text, max_width.saturating_sub(ELLIPSIS.len())).to_string();
            }
            text.push_str(ELLIPSIS);
            return text;
        }

        if i > 0 {
            text.push_str(SEPARATOR);
        }
        text.push_str(hint);
        used += sep_len + hint_len;
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hints() -> Vec<String> {
        vec!["Tab: Focus".to_string(), "F1: Help".to_string(), "Ctrl+q: Quit".to_string()]
    }

    #[test]
    fn all_hints_fit() {
        assert_eq!(fit_hints(&hints(), 80), "Tab: Focus • F1: Help • Ctrl+q: Quit");
    }

    #[test]
    fn overflow_gets_ellipsis() {
        assert_eq!(fit_hints(&hints(), 24), "Tab: Focus • F1: Help...");
    }

    #[test]
    fn wide_key_labels_are_measured_in_cells() {
        let hints = vec!["追加: 確定".to_string(), "F1: Help".to_string()];
        // "追加: 確定" is 10 cells wide, not 6
        assert_eq!(fit_hints(&hints, 13), "追加: 確定...");
        assert_eq!(fit_hints(&hints, 12), "追加: 確...");
        assert_eq!(fit_hints(&hints, 21), "追加: 確定 • F1: Help");
        assert_eq!(fit_hints(&hints, 8), "追加:...");
    }

    #[test]
    fn first_hint_too_long_is_truncated() {
        assert_eq!(fit_hints(&hints(), 6), "Tab...");
    }
}
