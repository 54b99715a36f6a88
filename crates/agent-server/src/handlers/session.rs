use actix_web::{web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
}

pub async fn create(state: web::Data<AppState>) -> impl Responder {
    let session = state.create_session().await;

    HttpResponse::Created().json(CreateSessionResponse {
        session_id: session.id().to_string(),
        created_at: session.created_at(),
    })
}
