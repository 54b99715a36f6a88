use chrono::Utc;
use thiserror::Error;
use tokio::sync::Mutex;

use super::TodoItem;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{}", out_of_range_message(.index, .count))]
    IndexOutOfRange { index: i64, count: usize },

    #[error("{0}")]
    InvalidState(String),
}

fn out_of_range_message(index: &i64, count: &usize) -> String {
    if *index < 1 {
        "Index must be 1 or greater.".to_string()
    } else {
        format!("Index {index} is out of range. Only {count} todos exist.")
    }
}

#[derive(Debug)]
struct TaskState {
    items: Vec<TodoItem>,
    next_id: u32,
}

impl Default for TaskState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }
}

impl TaskState {
    fn slot(&mut self, index: i64) -> Result<&mut TodoItem, TaskError> {
        let count = self.items.len();
        if index < 1 || index as u64 > count as u64 {
            return Err(TaskError::IndexOutOfRange { index, count });
        }
        Ok(&mut self.items[(index - 1) as usize])
    }
}

/// Ordered todo list for one session.
///
/// Every operation runs inside a single critical section, so concurrent
/// callers never observe a half-applied change. Indices are 1-based.
#[derive(Debug, Default)]
pub struct TaskStore {
    state: Mutex<TaskState>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one item per non-blank description and return the full list.
    pub async fn create_tasks(&self, descriptions: &[String]) -> Result<Vec<TodoItem>, TaskError> {
        if descriptions.is_empty() {
            return Err(TaskError::InvalidArgument(
                "Descriptions cannot be empty.".to_string(),
            ));
        }

        let mut state = self.state.lock().await;
        for description in descriptions {
            let description = description.trim();
            if description.is_empty() {
                continue;
            }
            let id = state.next_id;
            state.next_id += 1;
            state.items.push(TodoItem::new(id, description));
        }
        log::debug!("Todo list now holds {} item(s)", state.items.len());
        Ok(state.items.clone())
    }

    pub async fn mark_active(&self, index: i64, actor_label: &str) -> Result<TodoItem, TaskError> {
        let mut state = self.state.lock().await;
        let item = state.slot(index)?;
        if item.is_completed {
            return Err(TaskError::InvalidState(
                "Cannot mark a completed todo as active.".to_string(),
            ));
        }

        item.is_active = true;
        item.tool_used = Some(actor_label.to_string());
        if item.start_time.is_none() {
            item.start_time = Some(Utc::now());
        }
        log::debug!("Todo {} active ({})", item.id, actor_label);
        Ok(item.clone())
    }

    pub async fn mark_complete(&self, index: i64, notes: &str) -> Result<TodoItem, TaskError> {
        if notes.trim().is_empty() {
            return Err(TaskError::InvalidArgument(
                "Completion notes cannot be empty.".to_string(),
            ));
        }

        let mut state = self.state.lock().await;
        let item = state.slot(index)?;
        if item.is_completed {
            return Err(TaskError::InvalidState(format!(
                "Todo {index} is already completed."
            )));
        }

        item.is_completed = true;
        item.is_active = false;
        item.completion_notes = Some(notes.to_string());
        item.end_time = Some(Utc::now());
        log::debug!("Todo {} completed", item.id);
        Ok(item.clone())
    }

    pub async fn get_all(&self) -> Vec<TodoItem> {
        self.state.lock().await.items.clone()
    }

    /// Drop every item and restart ids at 1.
    pub async fn clear(&self) {
        *self.state.lock().await = TaskState::default();
        log::debug!("Todo list cleared");
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.items.is_empty()
    }
}
