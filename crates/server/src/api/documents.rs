use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::response::Response;
use docintake_handlers::HandlerError;

use super::{AppState, render};

/// `POST /documents`: hand the raw body to document intake.
pub async fn create_document(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let response = match body {
        Ok(body) => state.intake.handle(&body).await,
        Err(rejection) => state
            .intake
            .failure(&HandlerError::Body(rejection.body_text())),
    };
    render(response)
}
