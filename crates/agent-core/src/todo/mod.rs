//! Session-scoped checklist the model plans and works through.

mod item;
mod store;

pub use item::{TodoItem, TodoStatus};
pub use store::{TaskError, TaskStore};
