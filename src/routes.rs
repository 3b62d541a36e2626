use axum::{
    extract::{Query, State},
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use crate::errors::ApiError;
use crate::models::{MessageDatagram, MessageForm};
use crate::router::AppState;
use crate::templates;

pub async fn home() -> impl IntoResponse {
    templates::IndexTemplate
}

#[derive(Deserialize, Default)]
pub struct StatusQuery {
    success: Option<String>,
    error: Option<String>,
}

pub async fn message_page(Query(status): Query<StatusQuery>) -> impl IntoResponse {
    templates::MessagePageTemplate {
        success: status.success.as_deref() == Some("1"),
        error: status.error.as_deref() == Some("1"),
    }
}

/// Form ingestor. Validation failures redirect with an error flag; once
/// validation passes the user always sees the success flag, even if the
/// datagram never left the process. Delivery is unacknowledged by design.
#[axum::debug_handler]
pub async fn submit_message(
    State(state): State<AppState>,
    Form(form): Form<MessageForm>,
) -> impl IntoResponse {
    let Some((username, message)) = form.validated() else {
        return found("/message.html?error=1");
    };

    let datagram = MessageDatagram::new(username, message);
    match state.transport.send(&datagram) {
        Ok(()) => log::info!("relayed message from {}", datagram.username),
        Err(e) => log::warn!("failed to relay message from {}: {e}", datagram.username),
    }

    found("/message.html?success=1")
}

pub async fn styles() -> Result<impl IntoResponse, ApiError> {
    let response = Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/css")
        .body(include_str!("../assets/style.css").to_owned())?;

    Ok(response)
}

pub async fn script() -> Result<impl IntoResponse, ApiError> {
    let response = Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/javascript")
        .body(include_str!("../assets/script.js").to_owned())?;

    Ok(response)
}

pub async fn not_found(uri: Uri) -> impl IntoResponse {
    log::debug!("no route for {uri}");
    (StatusCode::NOT_FOUND, templates::ErrorTemplate)
}

fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_owned())]).into_response()
}
