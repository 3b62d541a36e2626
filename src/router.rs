use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::routes;
use crate::transport::MessageTransport;

#[derive(Clone)]
pub struct AppState {
    pub transport: Arc<dyn MessageTransport>,
}

pub fn init_router(transport: Arc<dyn MessageTransport>) -> Router {
    let serve_assets = ServeDir::new("assets");

    Router::new()
        .route("/", get(routes::home))
        .route("/index.html", get(routes::home))
        .route(
            "/message",
            get(routes::message_page)
                .post(routes::submit_message)
                .fallback(routes::not_found),
        )
        .route("/message.html", get(routes::message_page))
        .route("/send_message", post(routes::submit_message))
        .route("/style.css", get(routes::styles))
        .route("/script.js", get(routes::script))
        .nest_service("/static", serve_assets)
        .fallback(routes::not_found)
        .with_state(AppState { transport })
}
