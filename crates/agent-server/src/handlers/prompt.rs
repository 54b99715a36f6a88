use actix_web::{web, HttpResponse, Result};
use agent_tools::strip_image_markers;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::error_response;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PromptStatus {
    Completed,
    Cancelled,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PromptResponse {
    pub session_id: String,
    pub status: PromptStatus,
    /// Report text with inline image markers removed.
    pub report: Option<String>,
    /// Data URLs of images generated while answering.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

/// Run a prompt and answer once it has finished or been stopped.
pub async fn handler(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<PromptRequest>,
) -> Result<HttpResponse> {
    let session_id = path.into_inner();

    let session = match state.session(&session_id).await {
        Ok(session) => session,
        Err(e) => return Ok(error_response(&e)),
    };

    log::info!("[{}] Prompt received", session_id);
    let result = session
        .process_prompt(&req.prompt, None, CancellationToken::new())
        .await;

    match result {
        Ok(report) => Ok(HttpResponse::Ok().json(PromptResponse {
            session_id,
            status: PromptStatus::Completed,
            report: Some(strip_image_markers(&report)),
            images: session.current_images().await,
        })),
        Err(e) if e.is_cancelled() => Ok(HttpResponse::Ok().json(PromptResponse {
            session_id,
            status: PromptStatus::Cancelled,
            report: None,
            images: Vec::new(),
        })),
        Err(e) => {
            log::warn!("[{}] Prompt rejected: {}", session_id, e);
            Ok(error_response(&e))
        }
    }
}
