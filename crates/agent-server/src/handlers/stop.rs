use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

use super::error_response;
use crate::state::AppState;

#[derive(Serialize)]
struct StopResponse {
    success: bool,
    message: String,
}

pub async fn handler(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let session_id = path.into_inner();
    log::info!("[{}] Stop request received", session_id);

    let session = match state.session(&session_id).await {
        Ok(session) => session,
        Err(e) => return error_response(&e),
    };

    if session.cancel() {
        HttpResponse::Ok().json(StopResponse {
            success: true,
            message: "Prompt processing stopped".to_string(),
        })
    } else {
        log::warn!("[{}] No prompt in flight", session_id);
        HttpResponse::NotFound().json(StopResponse {
            success: false,
            message: "No prompt is being processed".to_string(),
        })
    }
}
