use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::config::Theme;
use crate::editor::LineEditor;
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};

pub const PLACEHOLDER: &str = "Add your todo";
pub const ADD_LABEL: &str = "+ Add";

/// Text field for the pending todo. Places the terminal cursor when `show_cursor` is set.
pub fn render_input(
    f: &mut Frame,
    area: Rect,
    editor: &mut LineEditor,
    focused: bool,
    show_cursor: bool,
    theme: &Theme,
) {
    let fg_color = parse_color(&theme.fg);
    let muted = parse_color(&theme.muted);
    let border_color = if focused { parse_color(&theme.accent) } else { muted };

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);

    // Measured in cells; the editor reserves a cell for the cursor past the end
    let viewport_width = inner.width as usize;
    editor.update_horizontal_scroll(viewport_width);

    let (content, cursor_offset) = if editor.is_empty() {
        (Span::styled(PLACEHOLDER, Style::default().fg(muted)), 0)
    } else {
        let (visible, cursor) = editor.visible(viewport_width);
        (Span::styled(visible, Style::default().fg(fg_color)), cursor)
    };

    f.render_widget(Paragraph::new(content).block(block), area);

    if focused && show_cursor && inner.width > 0 && inner.height > 0 {
        let x = inner.x + (cursor_offset as u16).min(inner.width - 1);
        f.set_cursor_position((x, inner.y));
    }
}

/// The add control, filled with the accent colour
pub fn render_add_button(f: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
    let accent = parse_color(&theme.accent);
    let label_color = get_contrast_text_color(accent);

    let mut style = Style::default().fg(label_color).bg(accent);
    let mut border_type = BorderType::Rounded;
    if focused {
        style = style.add_modifier(Modifier::BOLD);
        border_type = BorderType::Thick;
    }

    let block = Block::bordered().border_type(border_type).style(style);
    let paragraph = Paragraph::new(ADD_LABEL)
        .alignment(Alignment::Center)
        .block(block)
        .style(style);

    f.render_widget(paragraph, area);
}
