use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;
use crate::models::TodoItem;
use crate::tui::app::HitTarget;
use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::truncate_with_ellipsis;
use crate::utils::format_timestamp;

pub const EMPTY_PLACEHOLDER: &str = "No todos yet. Add one to get started!";

/// Lines per rendered item: text row, then time and priority
pub const ITEM_HEIGHT: u16 = 2;

const CHECKBOX_WIDTH: usize = 4; // "[x] "
const DELETE_WIDTH: usize = 2; // " ✕"

/// Draw the items (or the empty placeholder) and return the clickable regions of visible rows
pub fn render_todo_list(
    f: &mut Frame,
    area: Rect,
    items: &[TodoItem],
    list_state: &mut ListState,
    focused: bool,
    time_format: &str,
    theme: &Theme,
) -> Vec<(Rect, HitTarget)> {
    let fg_color = parse_color(&theme.fg);
    let muted = parse_color(&theme.muted);

    if items.is_empty() {
        // Leave a blank line above the message, like the padding around it in a card
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(EMPTY_PLACEHOLDER, Style::default().fg(muted))),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(ratatui::widgets::Wrap { trim: true });
        f.render_widget(paragraph, area);
        return Vec::new();
    }

    let width = area.width as usize;
    let text_width = width.saturating_sub(CHECKBOX_WIDTH + DELETE_WIDTH);

    let list_items: Vec<ListItem> = items
        .iter()
        .map(|item| {
            let (checkbox, text_style) = if item.completed {
                ("[x] ", Style::default().fg(muted).add_modifier(Modifier::CROSSED_OUT))
            } else {
                ("[ ] ", Style::default().fg(fg_color))
            };

            let text = truncate_with_ellipsis(&item.text, text_width);
            // Pad by cells so the delete glyph always lands in the last columns
            let padding = " ".repeat(text_width.saturating_sub(text.width()));

            let first_line = Line::from(vec![
                Span::styled(checkbox, Style::default().fg(fg_color)),
                Span::styled(text, text_style),
                Span::raw(padding),
                Span::styled(" ✕", Style::default().fg(muted)),
            ]);

            let meta = format!(
                "    ◷ {}  ⚑ {}",
                format_timestamp(&item.timestamp, time_format),
                item.priority
            );
            let second_line = Line::from(Span::styled(
                truncate_with_ellipsis(&meta, width),
                Style::default().fg(muted),
            ));

            ListItem::new(vec![first_line, second_line])
        })
        .collect();

    let highlight_style = if focused {
        Style::default()
            .fg(parse_color(&theme.highlight_fg))
            .bg(parse_color(&theme.highlight_bg))
    } else {
        Style::default()
    };

    let list = List::new(list_items).highlight_style(highlight_style);
    f.render_stateful_widget(list, area, list_state);

    visible_regions(area, items, list_state.offset())
}

/// Hit regions for the rows drawn from `offset` downwards. Specific targets come before the row itself.
pub fn visible_regions(area: Rect, items: &[TodoItem], offset: usize) -> Vec<(Rect, HitTarget)> {
    let mut regions = Vec::new();
    let mut y = area.y;

    for (index, item) in items.iter().enumerate().skip(offset) {
        if y + ITEM_HEIGHT > area.bottom() {
            break;
        }
        let checkbox = Rect::new(area.x, y, (CHECKBOX_WIDTH as u16 - 1).min(area.width), 1);
        let delete = Rect::new(
            area.right().saturating_sub(DELETE_WIDTH as u16),
            y,
            (DELETE_WIDTH as u16).min(area.width),
            1,
        );
        regions.push((checkbox, HitTarget::Checkbox(item.id)));
        regions.push((delete, HitTarget::Delete(item.id)));
        regions.push((Rect::new(area.x, y, area.width, ITEM_HEIGHT), HitTarget::Row(index)));
        y += ITEM_HEIGHT;
    }

    regions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TodoId;
    use chrono::{Local, TimeZone};

    fn items(n: usize) -> Vec<TodoItem> {
        let now = Local.with_ymd_and_hms(2026, 10, 18, 15, 7, 0).earliest().unwrap();
        (0..n)
            .map(|i| TodoItem::new(TodoId(i as i64), format!("item {}", i), now))
            .collect()
    }

    #[test]
    fn regions_cover_only_fully_visible_rows() {
        let area = Rect::new(10, 5, 30, 5);
        let regions = visible_regions(area, &items(4), 0);
        // Two rows fit in five lines
        assert_eq!(regions.len(), 6);
        assert_eq!(regions[0], (Rect::new(10, 5, 3, 1), HitTarget::Checkbox(TodoId(0))));
        assert_eq!(regions[1], (Rect::new(38, 5, 2, 1), HitTarget::Delete(TodoId(0))));
        assert_eq!(regions[5], (Rect::new(10, 7, 30, 2), HitTarget::Row(1)));
    }

    #[test]
    fn regions_follow_scroll_offset() {
        let area = Rect::new(0, 0, 30, 4);
        let regions = visible_regions(area, &items(5), 3);
        assert_eq!(regions[2].1, HitTarget::Row(3));
        assert_eq!(regions[5].1, HitTarget::Row(4));
    }
}
