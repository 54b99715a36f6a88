use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use std::io;

use crate::handlers;
use crate::state::AppState;

/// Register every route under `/api/v1`.
pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(handlers::health::handler))
            .route("/sessions", web::post().to(handlers::session::create))
            .route(
                "/sessions/{session_id}",
                web::delete().to(handlers::delete::handler),
            )
            .route(
                "/sessions/{session_id}/messages",
                web::get().to(handlers::chat::get_messages),
            )
            .route(
                "/sessions/{session_id}/messages",
                web::post().to(handlers::chat::add_message),
            )
            .route(
                "/sessions/{session_id}/todos",
                web::get().to(handlers::todo::get_todo_list),
            )
            .route(
                "/sessions/{session_id}/prompt",
                web::post().to(handlers::prompt::handler),
            )
            .route(
                "/sessions/{session_id}/stop",
                web::post().to(handlers::stop::handler),
            ),
    );
}

pub async fn run_server(state: AppState, port: u16) -> io::Result<()> {
    let state = web::Data::new(state);
    log::info!("Listening on 0.0.0.0:{}", port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .configure(app_config)
    })
    .bind(format!("0.0.0.0:{}", port))?
    .run()
    .await
}
