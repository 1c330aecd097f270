use log::{debug, info};
use ratatui::layout::{Position, Rect};
use ratatui::widgets::ListState;
use std::time::Instant;

use crate::Config;
use crate::config::KeyBindings;
use crate::editor::InputEdit;
use crate::models::TodoId;
use crate::todo::{Action, Change, TodoError, TodoState};
use crate::tui::error::TuiError;
use crate::utils::{parse_key_binding, ParsedKeyBinding};

const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 3;

/// Which control receives key input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    AddButton,
    List,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Input => Focus::AddButton,
            Focus::AddButton => Focus::List,
            Focus::List => Focus::Input,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Focus::Input => Focus::List,
            Focus::AddButton => Focus::Input,
            Focus::List => Focus::AddButton,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Help,
}

/// Clickable region recorded during the last render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Input,
    AddButton,
    Checkbox(TodoId),
    Delete(TodoId),
    Row(usize),
}

/// Key bindings parsed once from config
#[derive(Debug, Clone)]
pub struct KeyMap {
    pub quit: ParsedKeyBinding,
    pub next_focus: ParsedKeyBinding,
    pub submit: ParsedKeyBinding,
    pub toggle_complete: ParsedKeyBinding,
    pub delete: ParsedKeyBinding,
    pub list_up: ParsedKeyBinding,
    pub list_down: ParsedKeyBinding,
    pub help: ParsedKeyBinding,
}

impl KeyMap {
    pub fn from_config(bindings: &KeyBindings) -> Result<Self, TuiError> {
        let parse = |s: &str| parse_key_binding(s).map_err(TuiError::KeyBindingError);
        Ok(Self {
            quit: parse(&bindings.quit)?,
            next_focus: parse(&bindings.next_focus)?,
            submit: parse(&bindings.submit)?,
            toggle_complete: parse(&bindings.toggle_complete)?,
            delete: parse(&bindings.delete)?,
            list_up: parse(&bindings.list_up)?,
            list_down: parse(&bindings.list_down)?,
            help: parse(&bindings.help)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: Option<String>,
    pub message_time: Option<Instant>,
}

pub struct App {
    pub config: Config,
    pub keys: KeyMap,
    pub todos: TodoState,
    pub focus: Focus,
    pub mode: Mode,
    pub list_state: ListState,
    pub status: StatusState,
    pub hit_regions: Vec<(Rect, HitTarget)>,
}

impl App {
    pub fn new(config: Config) -> Result<Self, TuiError> {
        let keys = KeyMap::from_config(&config.key_bindings)?;
        Ok(Self {
            config,
            keys,
            todos: TodoState::new(),
            focus: Focus::Input,
            mode: Mode::Normal,
            list_state: ListState::default(),
            status: StatusState::default(),
            hit_regions: Vec::new(),
        })
    }

    /// Run an action through the reducer and react to the outcome
    pub fn dispatch(&mut self, action: Action) {
        match self.todos.dispatch(action) {
            Ok(Change::Added(id)) => {
                info!("event=todo_added id={} count={}", id, self.todos.len());
                self.set_status_message("Task added".to_string());
            }
            Ok(Change::Toggled { id, completed }) => {
                info!("event=todo_toggled id={} completed={}", id, completed);
                let msg = if completed { "Task marked as done" } else { "Task marked as todo" };
                self.set_status_message(msg.to_string());
            }
            Ok(Change::Deleted(id)) => {
                info!("event=todo_deleted id={} count={}", id, self.todos.len());
                self.set_status_message("Task deleted".to_string());
            }
            Ok(Change::Edited) | Ok(Change::Unchanged) => {}
            Err(TodoError::EmptySubmission) => {
                debug!("event=empty_submission");
            }
        }
        self.clamp_selection();
    }

    pub fn submit(&mut self) {
        self.dispatch(Action::Add);
    }

    pub fn edit(&mut self, edit: InputEdit) {
        self.dispatch(Action::Edit(edit));
    }

    pub fn selected_id(&self) -> Option<TodoId> {
        self.list_state
            .selected()
            .and_then(|index| self.todos.items().get(index))
            .map(|item| item.id)
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.dispatch(Action::Toggle(id));
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.dispatch(Action::Delete(id));
        }
    }

    /// Keep the list selection pointing at an existing row
    pub fn clamp_selection(&mut self) {
        let len = self.todos.len();
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let index = self.list_state.selected().unwrap_or(0).min(len - 1);
        self.list_state.select(Some(index));
    }

    pub fn select_index(&mut self, index: usize) {
        if index < self.todos.len() {
            self.list_state.select(Some(index));
        }
    }

    pub fn move_selection_up(&mut self) {
        if let Some(index) = self.list_state.selected() {
            self.list_state.select(Some(index.saturating_sub(1)));
        }
        self.clamp_selection();
    }

    pub fn move_selection_down(&mut self) {
        match self.list_state.selected() {
            Some(index) => self.list_state.select(Some(index + 1)),
            None => self.list_state.select(Some(0)),
        }
        self.clamp_selection();
    }

    pub fn select_first(&mut self) {
        self.list_state.select(Some(0));
        self.clamp_selection();
    }

    pub fn select_last(&mut self) {
        self.list_state.select(Some(self.todos.len().saturating_sub(1)));
        self.clamp_selection();
    }

    pub fn cycle_focus(&mut self, forward: bool) {
        self.focus = if forward { self.focus.next() } else { self.focus.previous() };
        if self.focus == Focus::List {
            self.clamp_selection();
        }
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status.message = Some(message);
        self.status.message_time = Some(Instant::now());
    }

    pub fn clear_status_message(&mut self) {
        self.status.message = None;
        self.status.message_time = None;
    }

    /// Clear the status message once it has been shown long enough
    pub fn check_status_message_timeout(&mut self) {
        if let Some(time) = self.status.message_time {
            if time.elapsed().as_secs() >= STATUS_MESSAGE_TIMEOUT_SECS {
                self.clear_status_message();
            }
        }
    }

    pub fn enter_help_mode(&mut self) {
        self.mode = Mode::Help;
    }

    pub fn exit_help_mode(&mut self) {
        self.mode = Mode::Normal;
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<HitTarget> {
        let position = Position::new(column, row);
        self.hit_regions
            .iter()
            .find(|(rect, _)| rect.contains(position))
            .map(|(_, target)| *target)
    }

    /// Left click at a terminal cell
    pub fn click(&mut self, column: u16, row: u16) {
        if self.mode == Mode::Help {
            self.exit_help_mode();
            return;
        }
        match self.hit_test(column, row) {
            Some(HitTarget::Input) => self.focus = Focus::Input,
            Some(HitTarget::AddButton) => {
                self.focus = Focus::AddButton;
                self.submit();
            }
            Some(HitTarget::Checkbox(id)) => {
                self.focus = Focus::List;
                if let Some(index) = self.todos.position(id) {
                    self.select_index(index);
                }
                self.dispatch(Action::Toggle(id));
            }
            Some(HitTarget::Delete(id)) => {
                self.focus = Focus::List;
                self.dispatch(Action::Delete(id));
            }
            Some(HitTarget::Row(index)) => {
                self.focus = Focus::List;
                self.select_index(index);
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with(texts: &[&str]) -> App {
        let mut app = App::new(Config::default()).unwrap();
        for text in texts {
            for ch in text.chars() {
                app.edit(InputEdit::Insert(ch));
            }
            app.submit();
        }
        app
    }

    #[test]
    fn bad_binding_fails_construction() {
        let mut config = Config::default();
        config.key_bindings.delete = "Hyper+d".to_string();
        assert!(matches!(App::new(config), Err(TuiError::KeyBindingError(_))));
    }

    #[test]
    fn focus_ring_cycles_both_ways() {
        let mut app = app_with(&[]);
        assert_eq!(app.focus, Focus::Input);
        app.cycle_focus(true);
        assert_eq!(app.focus, Focus::AddButton);
        app.cycle_focus(true);
        assert_eq!(app.focus, Focus::List);
        app.cycle_focus(true);
        assert_eq!(app.focus, Focus::Input);
        app.cycle_focus(false);
        assert_eq!(app.focus, Focus::List);
    }

    #[test]
    fn first_add_selects_it_and_sets_status() {
        let app = app_with(&["Buy milk"]);
        assert_eq!(app.list_state.selected(), Some(0));
        assert_eq!(app.status.message.as_deref(), Some("Task added"));
    }

    #[test]
    fn empty_submit_shows_error_not_status() {
        let mut app = app_with(&[]);
        app.submit();
        assert_eq!(app.todos.error(), Some("Please enter a task description"));
        assert!(app.status.message.is_none());
        assert_eq!(app.list_state.selected(), None);
    }

    #[test]
    fn selection_moves_within_bounds() {
        let mut app = app_with(&["a", "b", "c"]);
        app.move_selection_up();
        assert_eq!(app.list_state.selected(), Some(0));
        app.move_selection_down();
        app.move_selection_down();
        app.move_selection_down();
        assert_eq!(app.list_state.selected(), Some(2));
        app.select_first();
        assert_eq!(app.list_state.selected(), Some(0));
        app.select_last();
        assert_eq!(app.list_state.selected(), Some(2));
    }

    #[test]
    fn delete_last_selected_clamps() {
        let mut app = app_with(&["a", "b"]);
        app.select_last();
        app.delete_selected();
        assert_eq!(app.todos.len(), 1);
        assert_eq!(app.list_state.selected(), Some(0));
        app.delete_selected();
        assert!(app.todos.is_empty());
        assert_eq!(app.list_state.selected(), None);
        assert_eq!(app.status.message.as_deref(), Some("Task deleted"));
    }

    #[test]
    fn toggle_selected_reports_status() {
        let mut app = app_with(&["a"]);
        app.toggle_selected();
        assert!(app.todos.items()[0].completed);
        assert_eq!(app.status.message.as_deref(), Some("Task marked as done"));
        app.toggle_selected();
        assert_eq!(app.status.message.as_deref(), Some("Task marked as todo"));
    }

    #[test]
    fn clicks_route_to_recorded_targets() {
        let mut app = app_with(&["a", "b"]);
        let second = app.todos.items()[1].id;
        app.hit_regions = vec![
            (Rect::new(0, 0, 10, 1), HitTarget::Input),
            (Rect::new(12, 0, 5, 1), HitTarget::AddButton),
            (Rect::new(0, 3, 3, 1), HitTarget::Checkbox(second)),
            (Rect::new(20, 3, 3, 1), HitTarget::Delete(second)),
            (Rect::new(0, 3, 23, 2), HitTarget::Row(1)),
        ];

        app.click(5, 4);
        assert_eq!(app.focus, Focus::List);
        assert_eq!(app.list_state.selected(), Some(1));

        app.click(1, 3);
        assert!(app.todos.get(second).unwrap().completed);

        app.click(21, 3);
        assert!(app.todos.get(second).is_none());
        assert_eq!(app.list_state.selected(), Some(0));

        app.click(2, 0);
        assert_eq!(app.focus, Focus::Input);
        app.click(13, 0);
        assert_eq!(app.focus, Focus::AddButton);
        assert!(app.todos.error().is_some());
    }

    #[test]
    fn click_closes_help() {
        let mut app = app_with(&[]);
        app.enter_help_mode();
        app.click(0, 0);
        assert_eq!(app.mode, Mode::Normal);
    }
}
