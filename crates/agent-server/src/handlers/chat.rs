use actix_web::{web, HttpResponse, Result};
use agent_core::{ChatMessage, ChatRole};
use serde::Deserialize;

use super::error_response;
use crate::session::SessionError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddMessageRequest {
    pub role: ChatRole,
    pub content: String,
}

pub async fn get_messages(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let session_id = path.into_inner();

    match state.session(&session_id).await {
        Ok(session) => Ok(HttpResponse::Ok().json(session.messages().await)),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn add_message(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<AddMessageRequest>,
) -> Result<HttpResponse> {
    let session_id = path.into_inner();

    let session = match state.session(&session_id).await {
        Ok(session) => session,
        Err(e) => return Ok(error_response(&e)),
    };

    let AddMessageRequest { role, content } = req.into_inner();
    let message = match ChatMessage::new(role, content) {
        Ok(message) => message,
        Err(e) => return Ok(error_response(&SessionError::from(e))),
    };

    session.add_message(message.clone()).await;
    Ok(HttpResponse::Created().json(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_message_request_uses_lowercase_roles() {
        let request: AddMessageRequest =
            serde_json::from_str(r#"{"role":"assistant","content":"hi"}"#).unwrap();
        assert_eq!(request.role, ChatRole::Assistant);

        let unknown = serde_json::from_str::<AddMessageRequest>(r#"{"role":"tool","content":"x"}"#);
        assert!(unknown.is_err());
    }
}
