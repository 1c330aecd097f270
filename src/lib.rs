pub mod cli;
pub mod config;
pub mod editor;
pub mod logging;
pub mod models;
pub mod todo;
pub mod tui;
pub mod utils;

pub use config::Config;
pub use models::{Priority, TodoId, TodoItem};
pub use todo::{Action, Change, TodoError, TodoState};
pub use utils::Profile;
