use chrono::{DateTime, Local};
use std::fmt;

/// Identity of a todo item, derived from its creation time in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TodoId(pub i64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TodoItem {
    pub id: TodoId,
    pub text: String,
    pub timestamp: DateTime<Local>,
    pub completed: bool,
    pub priority: Priority, // Always Medium, nothing in the UI changes it
}

impl TodoItem {
    /// Build a fresh, not-yet-completed item. `text` must already be trimmed and non-empty.
    pub fn new(id: TodoId, text: String, timestamp: DateTime<Local>) -> Self {
        Self {
            id,
            text,
            timestamp,
            completed: false,
            priority: Priority::Medium,
        }
    }
}

/// Hands out clock-derived ids that never repeat within one list
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: Option<i64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Millisecond timestamp of `now`, bumped past the previous id if the clock hasn't moved
    pub fn next_id(&mut self, now: &DateTime<Local>) -> TodoId {
        let millis = now.timestamp_millis();
        let id = match self.last {
            Some(last) if millis <= last => last + 1,
            _ => millis,
        };
        self.last = Some(id);
        TodoId(id)
    }
}
