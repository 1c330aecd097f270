use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::style::Style;
use ratatui::widgets::{Block, BorderType, Clear};

use crate::tui::app::{App, Focus, HitTarget, Mode};
use crate::tui::Layout;
use crate::tui::widgets::{
    color::parse_color,
    error_alert::render_error_alert,
    header::render_header,
    help::render_help,
    input_row::{render_add_button, render_input},
    status_bar::render_status_bar,
    todo_list::render_todo_list,
};
use crate::utils::{format_key_binding_for_display as key, format_timestamp};

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    render_at(f, app, layout, Local::now());
}

/// Draw the whole screen as of `now` and record the clickable regions
pub fn render_at(f: &mut Frame, app: &mut App, layout: &Layout, now: DateTime<Local>) {
    let theme = app.config.get_active_theme();
    let fg_color = parse_color(&theme.fg);
    let bg_color = parse_color(&theme.bg);
    let backdrop = parse_color(&theme.backdrop);
    let screen = f.area();

    f.render_widget(Block::default().style(Style::default().bg(backdrop)), screen);

    f.render_widget(Clear, layout.card);
    let card = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(parse_color(&theme.muted)))
        .style(Style::default().fg(fg_color).bg(bg_color));
    f.render_widget(card, layout.card);

    let today = format_timestamp(&now, &app.config.date_format);
    render_header(f, layout.header, &today, &theme);

    let show_cursor = app.mode == Mode::Normal;
    render_input(
        f,
        layout.input,
        app.todos.input_mut(),
        app.focus == Focus::Input,
        show_cursor,
        &theme,
    );
    render_add_button(f, layout.add_button, app.focus == Focus::AddButton, &theme);

    if let Some(message) = app.todos.error() {
        render_error_alert(f, layout.alert, message, &theme);
    }

    let list_regions = render_todo_list(
        f,
        layout.list,
        app.todos.items(),
        &mut app.list_state,
        app.focus == Focus::List,
        &app.config.time_format,
        &theme,
    );

    app.hit_regions.clear();
    app.hit_regions.push((layout.input, HitTarget::Input));
    app.hit_regions.push((layout.add_button, HitTarget::AddButton));
    app.hit_regions.extend(list_regions);

    if app.mode == Mode::Help {
        render_help(f, screen, &app.config, &theme);
    }

    let key_hints = get_key_hints(app);
    render_status_bar(f, layout.status, app.status.message.as_deref(), &key_hints, &theme);
}

fn get_key_hints(app: &App) -> Vec<String> {
    let bindings = &app.config.key_bindings;

    if app.mode == Mode::Help {
        return vec![format!("Esc or {}: Exit help", key(&bindings.help))];
    }

    let mut hints = match app.focus {
        Focus::Input => vec![
            format!("{}: Add", key(&bindings.submit)),
            format!("{}: Next", key(&bindings.next_focus)),
            "Esc: List".to_string(),
        ],
        Focus::AddButton => vec![
            format!("{}/Space: Add", key(&bindings.submit)),
            format!("{}: Next", key(&bindings.next_focus)),
        ],
        Focus::List => vec![
            format!("{}: Toggle", key(&bindings.toggle_complete)),
            format!("{}: Delete", key(&bindings.delete)),
            format!("{}/{}: Move", key(&bindings.list_up), key(&bindings.list_down)),
            format!("{}: Next", key(&bindings.next_focus)),
        ],
    };

    hints.push(format!("{}: Help", key(&bindings.help)));
    hints.push(format!("{}: Quit", key(&bindings.quit)));
    hints
}
