use actix_web::{web, HttpResponse, Result};

use super::error_response;
use crate::state::AppState;

/// Clear the session's checklist and conversation. The session itself
/// stays registered and can take new prompts.
pub async fn handler(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse> {
    let session_id = path.into_inner();

    let session = match state.session(&session_id).await {
        Ok(session) => session,
        Err(e) => return Ok(error_response(&e)),
    };

    let was_processing = session.is_processing();
    session.clear().await;
    log::info!(
        "[{}] Session cleared (cancelled in-flight prompt: {})",
        session_id,
        was_processing
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "session_id": session_id,
        "cleared": true
    })))
}
