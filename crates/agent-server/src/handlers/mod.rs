pub mod chat;
pub mod delete;
pub mod health;
pub mod prompt;
pub mod session;
pub mod stop;
pub mod todo;

use actix_web::HttpResponse;

use crate::session::SessionError;

pub(crate) fn error_response(error: &SessionError) -> HttpResponse {
    let body = serde_json::json!({ "error": error.to_string() });
    match error {
        SessionError::NotFound(_) => HttpResponse::NotFound().json(body),
        SessionError::Busy => HttpResponse::Conflict().json(body),
        SessionError::Chat(_) => HttpResponse::BadRequest().json(body),
        SessionError::Agent(agent_core::AgentError::InvalidArgument(_)) => {
            HttpResponse::BadRequest().json(body)
        }
        SessionError::Agent(_) => HttpResponse::InternalServerError().json(body),
    }
}
