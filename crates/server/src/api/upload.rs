use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::response::Response;
use docintake_handlers::HandlerError;

use super::{AppState, render};

/// `POST /upload-url`: hand the raw body to the upload URL issuer.
pub async fn upload_url(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let response = match body {
        Ok(body) => state.upload.handle(&body).await,
        Err(rejection) => state
            .upload
            .failure(&HandlerError::Body(rejection.body_text())),
    };
    render(response)
}
