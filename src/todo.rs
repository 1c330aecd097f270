//! Todo list state and the reducer that mutates it.
//!
//! All user intent arrives as an [`Action`]; [`TodoState::dispatch`] applies it
//! synchronously and reports what changed.

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::editor::{InputEdit, LineEditor};
use crate::models::{IdGenerator, TodoId, TodoItem};

pub const EMPTY_SUBMISSION_MESSAGE: &str = "Please enter a task description";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    #[error("Please enter a task description")]
    EmptySubmission,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Submit the pending input as a new item
    Add,
    Toggle(TodoId),
    Delete(TodoId),
    Edit(InputEdit),
}

/// What a dispatched action did to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Added(TodoId),
    Toggled { id: TodoId, completed: bool },
    Deleted(TodoId),
    Edited,
    Unchanged,
}

#[derive(Debug, Clone, Default)]
pub struct TodoState {
    items: Vec<TodoItem>,
    input: LineEditor,
    error: Option<String>,
    ids: IdGenerator,
}

impl TodoState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn position(&self, id: TodoId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Mutable access for view bookkeeping (horizontal scroll) only
    pub fn input_mut(&mut self) -> &mut LineEditor {
        &mut self.input
    }

    pub fn pending_input(&self) -> String {
        self.input.value()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dispatch(&mut self, action: Action) -> Result<Change, TodoError> {
        self.dispatch_at(action, Local::now())
    }

    /// Apply `action` as if it happened at `now`
    pub fn dispatch_at(&mut self, action: Action, now: DateTime<Local>) -> Result<Change, TodoError> {
        match action {
            Action::Add => self.add(now),
            Action::Toggle(id) => Ok(self.toggle(id)),
            Action::Delete(id) => Ok(self.delete(id)),
            Action::Edit(edit) => {
                self.input.apply(edit);
                Ok(Change::Edited)
            }
        }
    }

    fn add(&mut self, now: DateTime<Local>) -> Result<Change, TodoError> {
        let pending = self.input.value();
        let text = pending.trim();
        if text.is_empty() {
            self.error = Some(EMPTY_SUBMISSION_MESSAGE.to_string());
            return Err(TodoError::EmptySubmission);
        }

        let id = self.ids.next_id(&now);
        self.items.push(TodoItem::new(id, text.to_string(), now));
        self.input.clear();
        self.error = None;
        Ok(Change::Added(id))
    }

    fn toggle(&mut self, id: TodoId) -> Change {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.completed = !item.completed;
                Change::Toggled {
                    id,
                    completed: item.completed,
                }
            }
            None => Change::Unchanged,
        }
    }

    fn delete(&mut self, id: TodoId) -> Change {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() < before {
            Change::Deleted(id)
        } else {
            Change::Unchanged
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 18, 15, 7, 0).earliest().unwrap()
    }

    fn type_text(state: &mut TodoState, text: &str) {
        for ch in text.chars() {
            state.dispatch_at(Action::Edit(InputEdit::Insert(ch)), start()).unwrap();
        }
    }

    fn submit(state: &mut TodoState, text: &str, now: DateTime<Local>) -> Result<Change, TodoError> {
        type_text(state, text);
        state.dispatch_at(Action::Add, now)
    }

    fn added_id(change: Change) -> TodoId {
        match change {
            Change::Added(id) => id,
            other => panic!("expected Added, got {:?}", other),
        }
    }

    #[test]
    fn empty_submit_sets_error_and_keeps_list() {
        let mut state = TodoState::new();
        for text in ["", "   ", "\t "] {
            let result = submit(&mut state, text, start());
            assert_eq!(result, Err(TodoError::EmptySubmission));
            assert_eq!(state.len(), 0);
            assert_eq!(state.error(), Some("Please enter a task description"));
        }
    }

    #[test]
    fn empty_submit_leaves_whitespace_input_alone() {
        let mut state = TodoState::new();
        let _ = submit(&mut state, "  ", start());
        assert_eq!(state.pending_input(), "  ");
    }

    #[test]
    fn submit_appends_trimmed_item_and_clears_slots() {
        let mut state = TodoState::new();
        let _ = submit(&mut state, "", start());
        assert!(state.error().is_some());

        let id = added_id(submit(&mut state, "  Buy milk  ", start()).unwrap());
        assert_eq!(state.len(), 1);
        assert_eq!(state.pending_input(), "");
        assert_eq!(state.error(), None);

        let item = state.get(id).unwrap();
        assert_eq!(item.text, "Buy milk");
        assert!(!item.completed);
        assert_eq!(item.priority, Priority::Medium);
        assert_eq!(item.timestamp, start());
    }

    #[test]
    fn items_keep_insertion_order() {
        let mut state = TodoState::new();
        for (i, text) in ["one", "two", "three"].iter().enumerate() {
            submit(&mut state, text, start() + Duration::seconds(i as i64)).unwrap();
        }
        let texts: Vec<&str> = state.items().iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, ["one", "two", "three"]);
    }

    #[test]
    fn rapid_submits_get_distinct_ids() {
        let mut state = TodoState::new();
        let a = added_id(submit(&mut state, "a", start()).unwrap());
        let b = added_id(submit(&mut state, "b", start()).unwrap());
        assert_ne!(a, b);
    }

    #[test]
    fn toggle_flips_only_the_target() {
        let mut state = TodoState::new();
        let a = added_id(submit(&mut state, "a", start()).unwrap());
        let b = added_id(submit(&mut state, "b", start()).unwrap());

        let change = state.dispatch_at(Action::Toggle(b), start()).unwrap();
        assert_eq!(change, Change::Toggled { id: b, completed: true });
        assert!(!state.get(a).unwrap().completed);
        assert!(state.get(b).unwrap().completed);
        assert_eq!(state.position(a), Some(0));
        assert_eq!(state.position(b), Some(1));
    }

    #[test]
    fn toggle_twice_restores() {
        let mut state = TodoState::new();
        let id = added_id(submit(&mut state, "a", start()).unwrap());
        state.dispatch_at(Action::Toggle(id), start()).unwrap();
        state.dispatch_at(Action::Toggle(id), start()).unwrap();
        assert!(!state.get(id).unwrap().completed);
    }

    #[test]
    fn unknown_ids_are_noops() {
        let mut state = TodoState::new();
        submit(&mut state, "a", start()).unwrap();
        assert_eq!(state.dispatch_at(Action::Toggle(TodoId(-1)), start()), Ok(Change::Unchanged));
        assert_eq!(state.dispatch_at(Action::Delete(TodoId(-1)), start()), Ok(Change::Unchanged));
        assert_eq!(state.len(), 1);
        assert!(!state.items()[0].completed);
    }

    #[test]
    fn delete_preserves_order_of_the_rest() {
        let mut state = TodoState::new();
        let ids: Vec<TodoId> = ["one", "two", "three"]
            .iter()
            .map(|text| added_id(submit(&mut state, text, start()).unwrap()))
            .collect();

        let change = state.dispatch_at(Action::Delete(ids[1]), start()).unwrap();
        assert_eq!(change, Change::Deleted(ids[1]));
        assert_eq!(state.len(), 2);
        assert!(state.get(ids[1]).is_none());
        let texts: Vec<&str> = state.items().iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, ["one", "three"]);
    }

    #[test]
    fn buy_milk_walkthrough() {
        let mut state = TodoState::new();
        assert!(state.is_empty());

        let id = added_id(submit(&mut state, "Buy milk", start()).unwrap());
        assert_eq!(state.len(), 1);
        assert_eq!(state.items()[0].text, "Buy milk");

        assert!(submit(&mut state, "", start()).is_err());
        assert_eq!(state.error(), Some(EMPTY_SUBMISSION_MESSAGE));
        assert_eq!(state.len(), 1);

        state.dispatch_at(Action::Toggle(id), start()).unwrap();
        assert!(state.get(id).unwrap().completed);

        state.dispatch_at(Action::Delete(id), start()).unwrap();
        assert!(state.is_empty());
    }
}
