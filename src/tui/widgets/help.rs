use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::Config;
use crate::config::Theme;
use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::popup_area;
use crate::utils::format_key_binding_for_display as key;

pub fn render_help(f: &mut Frame, area: Rect, config: &Config, theme: &Theme) {
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);

    let popup_area = popup_area(area, 60, 70);

    // Clear the background first so the card doesn't show through
    f.render_widget(Clear, popup_area);

    let paragraph = Paragraph::new(build_help_text(config))
        .block(Block::default()
            .borders(Borders::ALL)
            .title("Help - Key Bindings")
            .title_alignment(Alignment::Center)
            .style(Style::default().fg(fg_color).bg(bg_color)))
        .style(Style::default().fg(fg_color).bg(bg_color))
        .wrap(ratatui::widgets::Wrap { trim: false });

    f.render_widget(paragraph, popup_area);
}

pub fn build_help_text(config: &Config) -> String {
    let bindings = &config.key_bindings;
    let mut text = String::new();

    text.push_str("Focus:\n");
    text.push_str(&format!("  {} / Shift+Tab: Next / previous control\n", key(&bindings.next_focus)));
    text.push_str("\n");

    text.push_str("Input:\n");
    text.push_str(&format!("  {}: Add task\n", key(&bindings.submit)));
    text.push_str("  Left/Right, Home/End: Move cursor\n");
    text.push_str("  Ctrl+Left/Ctrl+Right: Move by word\n");
    text.push_str("  Backspace/Delete: Erase\n");
    text.push_str("  Ctrl+u: Clear input\n");
    text.push_str("  Esc: Go to list\n");
    text.push_str("\n");

    text.push_str("List:\n");
    text.push_str(&format!("  {} / {} or Up/Down: Select task\n", key(&bindings.list_up), key(&bindings.list_down)));
    text.push_str(&format!("  {}: Toggle complete\n", key(&bindings.toggle_complete)));
    text.push_str(&format!("  {} / Delete: Delete task\n", key(&bindings.delete)));
    text.push_str("\n");

    text.push_str("Mouse:\n");
    text.push_str("  Click checkbox, + Add or ✕; scroll to select\n");
    text.push_str("\n");

    text.push_str("Theme:\n");
    text.push_str(&format!("  {} (available: {})\n", config.current_theme, config.get_available_themes().join(", ")));
    text.push_str("\n");

    text.push_str("General:\n");
    text.push_str(&format!("  {}: Show/hide help\n", key(&bindings.help)));
    text.push_str(&format!("  {} or Ctrl+c: Quit\n", key(&bindings.quit)));

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_lists_configured_keys() {
        let mut config = Config::default();
        config.key_bindings.delete = "x".to_string();
        let text = build_help_text(&config);
        assert!(text.contains("  x / Delete: Delete task"));
        assert!(text.contains("Toggle complete"));
        assert!(text.contains("rose (available: dark, light, monochrome, rose)"));
    }
}
