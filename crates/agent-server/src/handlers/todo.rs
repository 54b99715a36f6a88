use actix_web::{web, HttpResponse, Result};
use agent_core::{TodoItem, TodoStatus};
use serde::Serialize;

use super::error_response;
use crate::state::AppState;

/// Todo item with its display strings.
#[derive(Debug, Serialize)]
pub struct TodoItemResponse {
    #[serde(flatten)]
    pub item: TodoItem,
    pub status: TodoStatus,
    pub status_badge: String,
    pub duration_display: String,
}

impl From<TodoItem> for TodoItemResponse {
    fn from(item: TodoItem) -> Self {
        Self {
            status: item.status(),
            status_badge: item.status_badge().to_string(),
            duration_display: item.duration_display(),
            item,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TodoProgress {
    pub completed: usize,
    pub total: usize,
    pub percentage: u8,
}

#[derive(Debug, Serialize)]
pub struct TodoListResponse {
    pub session_id: String,
    pub items: Vec<TodoItemResponse>,
    pub progress: TodoProgress,
}

pub async fn get_todo_list(
    state: web::Data<AppState>,
    session_id: web::Path<String>,
) -> Result<HttpResponse> {
    let session_id = session_id.into_inner();

    let session = match state.session(&session_id).await {
        Ok(session) => session,
        Err(e) => return Ok(error_response(&e)),
    };

    let items: Vec<TodoItemResponse> = session
        .todos()
        .await
        .into_iter()
        .map(TodoItemResponse::from)
        .collect();

    let completed = items.iter().filter(|i| i.item.is_completed).count();
    let total = items.len();
    let percentage = if total > 0 {
        ((completed as f32 / total as f32) * 100.0) as u8
    } else {
        0
    };

    Ok(HttpResponse::Ok().json(TodoListResponse {
        session_id,
        items,
        progress: TodoProgress {
            completed,
            total,
            percentage,
        },
    }))
}
