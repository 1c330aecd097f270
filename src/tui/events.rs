use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, size as terminal_size, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use log::info;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io;
use std::time::Duration;

use crate::editor::InputEdit;
use crate::tui::app::{App, Focus, Mode};
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::utils::has_primary_modifier;

/// Guard that ensures terminal state is restored even on panic
/// If the terminal is left in raw mode or the alternate screen, the user's shell is unusable.
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
    mouse_capture_enabled: bool,
}

impl TerminalGuard {
    /// Initialize terminal state and return a guard
    /// The guard will restore terminal state when dropped (even on panic)
    fn new(mouse: bool) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut guard = Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: false,
            mouse_capture_enabled: false,
        };

        execute!(io::stdout(), EnterAlternateScreen)?;
        guard.alternate_screen_enabled = true;

        if mouse {
            execute!(io::stdout(), EnableMouseCapture)?;
            guard.mouse_capture_enabled = true;
        }

        Ok(guard)
    }

    /// Restore terminal state on normal exit; the guard does nothing on drop afterwards
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.mouse_capture_enabled {
            execute!(io::stdout(), DisableMouseCapture)?;
            self.mouse_capture_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Errors are ignored here, we're already on a cleanup path
        if self.mouse_capture_enabled {
            let _ = execute!(io::stdout(), DisableMouseCapture);
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
    }
}

pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    // Check terminal size before entering alternate screen so the error shows in the normal terminal
    let (width, height) = terminal_size()?;
    if width < Layout::MIN_WIDTH || height < Layout::MIN_HEIGHT {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, Minimum required: {}x{}. Please resize your terminal window.",
            width, height, Layout::MIN_WIDTH, Layout::MIN_HEIGHT
        )));
    }

    let mut guard = TerminalGuard::new(app.config.mouse)?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    loop {
        app.check_status_message_timeout();

        let size = terminal.size()?;
        let terminal_rect = Rect::new(0, 0, size.width, size.height);
        terminal.draw(|f| {
            let layout = Layout::calculate(
                terminal_rect,
                app.config.card_width,
                app.todos.error().is_some(),
            );
            crate::tui::render::render(f, &mut app, &layout);
        })?;

        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                // Only Press events, Windows also reports Release
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    if handle_key_event(&mut app, key_event)? {
                        break;
                    }
                }
                Event::Mouse(mouse_event) => handle_mouse_event(&mut app, mouse_event),
                _ => {}
            }
        }
    }

    info!("event=app_exit status=ok items={}", app.todos.len());
    guard.restore()?;

    Ok(())
}

/// Handle one key press. Returns true when the user asked to quit.
pub fn handle_key_event(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let code = key_event.code;
    let modifiers = key_event.modifiers;

    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }
    // A bare-letter quit binding would swallow typing, so it only applies outside the input
    if app.keys.quit.matches(code, modifiers)
        && (app.keys.quit.requires_ctrl || app.focus != Focus::Input)
    {
        return Ok(true);
    }

    if app.mode == Mode::Help {
        if code == KeyCode::Esc || app.keys.help.matches(code, modifiers) {
            app.exit_help_mode();
        }
        return Ok(false);
    }

    if app.keys.help.matches(code, modifiers) {
        app.enter_help_mode();
        return Ok(false);
    }

    if code == KeyCode::BackTab {
        app.cycle_focus(false);
        return Ok(false);
    }
    if app.keys.next_focus.matches(code, modifiers) {
        app.cycle_focus(true);
        return Ok(false);
    }

    match app.focus {
        Focus::Input => handle_input_focus(app, key_event),
        Focus::AddButton => handle_add_button_focus(app, key_event),
        Focus::List => handle_list_focus(app, key_event),
    }

    Ok(false)
}

fn handle_input_focus(app: &mut App, key_event: KeyEvent) {
    let code = key_event.code;
    let modifiers = key_event.modifiers;

    if app.keys.submit.matches(code, modifiers) {
        app.submit();
        return;
    }

    let word = has_primary_modifier(modifiers);
    let edit = match code {
        KeyCode::Esc => {
            app.focus = Focus::List;
            app.clamp_selection();
            None
        }
        KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => Some(InputEdit::Clear),
        KeyCode::Char(ch) if !modifiers.contains(KeyModifiers::CONTROL) && !modifiers.contains(KeyModifiers::ALT) => {
            Some(InputEdit::Insert(ch))
        }
        KeyCode::Backspace => Some(InputEdit::Backspace),
        KeyCode::Delete => Some(InputEdit::Delete),
        KeyCode::Left if word => Some(InputEdit::WordLeft),
        KeyCode::Right if word => Some(InputEdit::WordRight),
        KeyCode::Left => Some(InputEdit::Left),
        KeyCode::Right => Some(InputEdit::Right),
        KeyCode::Home => Some(InputEdit::Home),
        KeyCode::End => Some(InputEdit::End),
        _ => None,
    };

    if let Some(edit) = edit {
        app.edit(edit);
    }
}

fn handle_add_button_focus(app: &mut App, key_event: KeyEvent) {
    if app.keys.submit.matches(key_event.code, key_event.modifiers)
        || key_event.code == KeyCode::Char(' ')
    {
        app.submit();
    }
}

fn handle_list_focus(app: &mut App, key_event: KeyEvent) {
    let code = key_event.code;
    let modifiers = key_event.modifiers;

    if code == KeyCode::Up || app.keys.list_up.matches(code, modifiers) {
        app.move_selection_up();
    } else if code == KeyCode::Down || app.keys.list_down.matches(code, modifiers) {
        app.move_selection_down();
    } else if code == KeyCode::Home {
        app.select_first();
    } else if code == KeyCode::End {
        app.select_last();
    } else if app.keys.toggle_complete.matches(code, modifiers) {
        app.toggle_selected();
    } else if code == KeyCode::Delete || app.keys.delete.matches(code, modifiers) {
        app.delete_selected();
    } else if code == KeyCode::Esc {
        app.focus = Focus::Input;
    }
}

pub fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => app.click(mouse_event.column, mouse_event.row),
        MouseEventKind::ScrollUp if app.mode == Mode::Normal => app.move_selection_up(),
        MouseEventKind::ScrollDown if app.mode == Mode::Normal => app.move_selection_down(),
        _ => {}
    }
}
