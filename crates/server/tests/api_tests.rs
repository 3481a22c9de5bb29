use std::sync::Arc;

use axum::body::Body;
use axum::http::{self, Request, StatusCode};
use tower::ServiceExt;

use docintake_backend::{DocumentStore, MessagePublisher, UploadSigner};
use docintake_core::{IdGenerator, TimestampIdGenerator};
use docintake_memory::{MemoryDocumentStore, MemoryQueue, MemoryUploadSigner};
use docintake_server::api::{AppState, router};
use docintake_server::backend_factory::Backends;

// -- Helpers --------------------------------------------------------------

struct TestApp {
    state: AppState,
    signer: Arc<MemoryUploadSigner>,
    store: Arc<MemoryDocumentStore>,
    queue: Arc<MemoryQueue>,
}

fn build_test_app(bucket: Option<&str>) -> TestApp {
    let signer = Arc::new(MemoryUploadSigner::new(bucket.map(str::to_owned)));
    let store = Arc::new(MemoryDocumentStore::new());
    let queue = Arc::new(MemoryQueue::new());
    let backends = Backends {
        signer: Arc::clone(&signer) as Arc<dyn UploadSigner>,
        store: Arc::clone(&store) as Arc<dyn DocumentStore>,
        publisher: Arc::clone(&queue) as Arc<dyn MessagePublisher>,
    };
    let ids: Arc<dyn IdGenerator> = Arc::new(TimestampIdGenerator);
    TestApp {
        state: AppState::new(&backends, ids),
        signer,
        store,
        queue,
    }
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    post_bytes(uri, body.as_bytes().to_vec())
}

fn post_bytes(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(http::Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

const NOT_UTF8: [u8; 4] = [0xff, 0xfe, b'{', b'}'];

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn assert_cors_json(resp: &axum::response::Response) {
    assert_eq!(
        resp.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/json"
    );
}

// -- Health ---------------------------------------------------------------

#[tokio::test]
async fn health_returns_ok() {
    let app = router(build_test_app(Some("uploads")).state);

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["status"], "ok");
}

// -- Upload URL -----------------------------------------------------------

#[tokio::test]
async fn upload_url_returns_presigned_url() {
    let test = build_test_app(Some("uploads"));
    let app = router(test.state);

    let resp = app
        .oneshot(post_json(
            "/upload-url",
            r#"{"fileName":"report.pdf","fileType":"application/pdf"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_cors_json(&resp);
    let body = body_json(resp).await;
    let url = body["uploadURL"].as_str().unwrap();
    assert!(url.contains("/uploads/report.pdf"));
    assert!(url.contains("X-Amz-Expires=300"));
    assert_eq!(body.as_object().unwrap().len(), 1);
    assert_eq!(test.signer.calls(), 1);
}

#[tokio::test]
async fn upload_url_without_bucket_hides_error_detail() {
    let app = router(build_test_app(None).state);

    let resp = app
        .oneshot(post_json(
            "/upload-url",
            r#"{"fileName":"a.txt","fileType":"text/plain"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors_json(&resp);
    let body = body_json(resp).await;
    assert_eq!(
        body,
        serde_json::json!({"message": "Error generating presigned URL"})
    );
}

#[tokio::test]
async fn upload_url_malformed_body_is_500() {
    let app = router(build_test_app(Some("uploads")).state);

    let resp = app.oneshot(post_json("/upload-url", "not json")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(resp).await["message"],
        "Error generating presigned URL"
    );
}

#[tokio::test]
async fn upload_url_non_utf8_body_is_500_json() {
    let test = build_test_app(Some("uploads"));
    let app = router(test.state);

    let resp = app
        .oneshot(post_bytes("/upload-url", NOT_UTF8.to_vec()))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors_json(&resp);
    assert_eq!(
        body_json(resp).await,
        serde_json::json!({"message": "Error generating presigned URL"})
    );
    assert_eq!(test.signer.calls(), 0);
}

#[tokio::test]
async fn upload_url_oversized_body_is_500_json() {
    let test = build_test_app(Some("uploads"));
    let app = router(test.state.with_max_body_bytes(16));

    let resp = app
        .oneshot(post_json(
            "/upload-url",
            r#"{"fileName":"a-rather-long-name.pdf","fileType":"application/pdf"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors_json(&resp);
    assert_eq!(
        body_json(resp).await,
        serde_json::json!({"message": "Error generating presigned URL"})
    );
    assert_eq!(test.signer.calls(), 0);
}

// -- Documents ------------------------------------------------------------

#[tokio::test]
async fn create_document_non_utf8_body_is_500_json() {
    let test = build_test_app(Some("uploads"));
    let app = router(test.state);

    let resp = app
        .oneshot(post_bytes("/documents", NOT_UTF8.to_vec()))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors_json(&resp);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "Error processing document");
    assert!(!body["error"].as_str().unwrap().is_empty());
    assert_eq!(test.store.put_calls(), 0);
}

#[tokio::test]
async fn create_document_oversized_body_is_500_json() {
    let test = build_test_app(Some("uploads"));
    let app = router(test.state.with_max_body_bytes(16));

    let resp = app
        .oneshot(post_json(
            "/documents",
            r#"{"customerId":"c-1","documentLocation":"s3://uploads/report.pdf"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors_json(&resp);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "Error processing document");
    assert!(body["error"].as_str().unwrap().starts_with("request body could not be read"));
    assert_eq!(test.store.put_calls(), 0);
}

#[tokio::test]
async fn create_document_keeps_metadata_key_order() {
    let test = build_test_app(Some("uploads"));
    let app = router(test.state);

    let resp = app
        .oneshot(post_json(
            "/documents",
            r#"{"customerId":"c-1","metadata":{"zeta":1,"alpha":2}}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let published = test.queue.last_message().unwrap();
    assert!(
        published
            .message
            .body
            .contains(r#""metadata":{"zeta":1,"alpha":2}"#)
    );
}

#[tokio::test]
async fn create_document_persists_and_publishes() {
    let test = build_test_app(Some("uploads"));
    let app = router(test.state);

    let resp = app
        .oneshot(post_json(
            "/documents",
            r#"{"customerId":"c-1","documentLocation":"s3://uploads/report.pdf","metadata":{"lang":"en"}}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_cors_json(&resp);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "Document processed successfully");
    let id = body["documentId"].as_str().unwrap();
    assert!(id.starts_with("doc_"));

    let record = test.store.get(id).await.unwrap().unwrap();
    assert_eq!(record.customer_id.as_deref(), Some("c-1"));
    assert_eq!(record.metadata["lang"], "en");

    let published = test.queue.last_message().unwrap();
    let message: serde_json::Value = serde_json::from_str(&published.message.body).unwrap();
    assert_eq!(message["documentId"], id);
    assert_eq!(
        published.message.attributes.get("DocumentType").unwrap(),
        "RAG"
    );
}

#[tokio::test]
async fn create_document_store_failure_reports_error() {
    let test = build_test_app(Some("uploads"));
    test.store.fail_puts("table unavailable");
    let app = router(test.state);

    let resp = app
        .oneshot(post_json(
            "/documents",
            r#"{"customerId":"c-1","documentLocation":"s3://b/k"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors_json(&resp);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "Error processing document");
    assert!(body["error"].as_str().unwrap().contains("table unavailable"));
    assert!(test.queue.messages().is_empty());
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = router(build_test_app(Some("uploads")).state);

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
