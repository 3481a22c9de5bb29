pub mod documents;
pub mod health;
pub mod upload;

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;
use tracing::warn;

use docintake_core::IdGenerator;
use docintake_handlers::{DocumentIntake, HandlerResponse, UploadUrlIssuer};

use crate::backend_factory::Backends;

/// Request body limit when none is configured (axum's own default).
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Shared application state accessible from all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Issues pre-signed upload URLs.
    pub upload: Arc<UploadUrlIssuer>,
    /// Records documents and notifies the processing queue.
    pub intake: Arc<DocumentIntake>,
    /// Largest accepted request body, in bytes. Larger bodies get the
    /// handler's 500 response.
    pub max_body_bytes: usize,
}

impl AppState {
    /// Wire both handlers to the same set of backends.
    pub fn new(backends: &Backends, ids: Arc<dyn IdGenerator>) -> Self {
        let upload = UploadUrlIssuer::new(Arc::clone(&backends.signer));
        let intake = DocumentIntake::new(
            Arc::clone(&backends.store),
            Arc::clone(&backends.publisher),
        )
        .with_id_generator(ids);
        Self {
            upload: Arc::new(upload),
            intake: Arc::new(intake),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    #[must_use]
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_body_bytes);
    Router::new()
        .route("/health", get(health::health))
        .route("/upload-url", post(upload::upload_url))
        .route("/documents", post(documents::create_document))
        .with_state(state)
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
}

/// Copy a handler response into an HTTP response unchanged.
pub(crate) fn render(response: HandlerResponse) -> Response {
    let status = StatusCode::from_u16(response.status_code)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut http = (status, Body::from(response.body)).into_response();

    let headers = http.headers_mut();
    for (name, value) in &response.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => warn!(header = %name, "dropping invalid response header"),
        }
    }
    http
}
