use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tokio::sync::mpsc;
use tower::ServiceExt;

use cranescope::application::services::{
    BatchMessage, BatchWorker, CancellationRegistry, PagePipeline, PipelineOptions,
    PromptTemplates, RetryPolicy,
};
use cranescope::infrastructure::llm::MockLlmClient;
use cranescope::infrastructure::persistence::InMemoryBatchRepository;
use cranescope::infrastructure::text_processing::{CompositeDocumentReader, PdfDocumentReader};
use cranescope::presentation::{AppState, create_router};

const BOUNDARY: &str = "cranescope-test-boundary";
const MAX_FILE_SIZE_MB: usize = 1;

fn scripted_model() -> MockLlmClient {
    MockLlmClient::new().with_responder(|prompt| {
        if prompt.starts_with("From the page below") {
            Ok("4 RTG cranes in Long Beach".to_string())
        } else if prompt.contains("Long Beach orders") {
            Ok("Summary: Crane order\nInclude or Exclude: Include\nReason: Purchase".to_string())
        } else {
            Ok("Summary: Tires\nInclude or Exclude: Exclude\nReason: Not cranes".to_string())
        }
    })
}

/// Router with a live worker behind it.
fn app_with_worker() -> Router {
    let repository = Arc::new(InMemoryBatchRepository::new());
    let cancellations = CancellationRegistry::new();
    let (sender, receiver) = mpsc::channel(4);

    let pipeline = Arc::new(PagePipeline::new(
        Arc::new(scripted_model()),
        Arc::new(CompositeDocumentReader::standard(PdfDocumentReader::default())),
        PromptTemplates::default(),
        RetryPolicy::new(1, Duration::ZERO),
        PipelineOptions::default(),
    ));
    let worker = BatchWorker::new(
        receiver,
        pipeline,
        repository.clone(),
        cancellations.clone(),
    );
    tokio::spawn(worker.run());

    create_router(AppState::new(
        repository,
        sender,
        cancellations,
        MAX_FILE_SIZE_MB,
    ))
}

/// Router whose queue is never drained, so batches stay registered.
fn app_without_worker() -> (Router, mpsc::Receiver<BatchMessage>) {
    let (sender, receiver) = mpsc::channel(4);
    let state = AppState::new(
        Arc::new(InMemoryBatchRepository::new()),
        sender,
        CancellationRegistry::new(),
        MAX_FILE_SIZE_MB,
    );
    (create_router(state), receiver)
}

fn multipart_request(files: &[(&str, &str, &[u8])]) -> Request<Body> {
    let mut body = Vec::new();
    for (filename, content_type, data) in files {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"files\"; filename=\"{}\"\r\n",
                filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/v1/batches")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn wait_until_finished(app: &Router, batch_id: &str) -> Value {
    for _ in 0..200 {
        let response = app
            .clone()
            .oneshot(get(&format!("/api/v1/batches/{}", batch_id)))
            .await
            .unwrap();
        let status = body_json(response).await;
        if status["status"] == "DONE" || status["status"] == "CANCELLED" {
            return status;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("batch {} did not finish", batch_id);
}

#[tokio::test]
async fn given_health_request_when_called_then_returns_healthy() {
    let (app, _receiver) = app_without_worker();

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "healthy");
}

#[tokio::test]
async fn given_request_without_files_when_creating_batch_then_returns_bad_request() {
    let (app, _receiver) = app_without_worker();

    let response = app.oneshot(multipart_request(&[])).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_unsupported_file_type_when_creating_batch_then_returns_unsupported_media_type() {
    let (app, _receiver) = app_without_worker();

    let response = app
        .oneshot(multipart_request(&[("scan.png", "image/png", "PNG".as_bytes())]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn given_oversized_file_when_creating_batch_then_returns_payload_too_large() {
    let (app, _receiver) = app_without_worker();
    let data = vec![b'a'; MAX_FILE_SIZE_MB * 1024 * 1024 + 1];

    let response = app
        .oneshot(multipart_request(&[("big.txt", "text/plain", data.as_slice())]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn given_generic_mime_with_known_extension_when_creating_batch_then_accepts_it() {
    let (app, mut receiver) = app_without_worker();

    let response = app
        .oneshot(multipart_request(&[(
            "notes.txt",
            "application/octet-stream",
            "page".as_bytes(),
        )]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let queued = receiver.recv().await.unwrap();
    assert_eq!(queued.documents.len(), 1);
    assert_eq!(queued.documents[0].filename(), "notes.txt");
}

#[tokio::test]
async fn given_malformed_batch_id_when_fetching_status_then_returns_bad_request() {
    let (app, _receiver) = app_without_worker();

    let response = app.oneshot(get("/api/v1/batches/not-a-uuid")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_unknown_batch_id_when_fetching_status_then_returns_not_found() {
    let (app, _receiver) = app_without_worker();

    let response = app
        .oneshot(get(&format!("/api/v1/batches/{}", uuid::Uuid::new_v4())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_uploaded_documents_when_batch_finishes_then_results_and_exports_are_available() {
    let app = app_with_worker();
    let pages = "Port of Long Beach orders 4 RTG cranes.\x0cTire shortage hits terminals.";

    let response = app
        .clone()
        .oneshot(multipart_request(&[
            ("issue.txt", "text/plain", pages.as_bytes()),
            ("empty.txt", "text/plain", "".as_bytes()),
        ]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let created = body_json(response).await;
    let batch_id = created["batch_id"].as_str().unwrap().to_string();
    assert_eq!(created["documents"].as_array().unwrap().len(), 2);

    let status = wait_until_finished(&app, &batch_id).await;
    assert_eq!(status["status"], "DONE");
    assert_eq!(status["progress"], 1.0);
    assert_eq!(status["total_pages"], 2);
    assert_eq!(status["page_results"], 2);
    assert_eq!(status["project_records"], 1);
    assert_eq!(status["warnings"].as_array().unwrap().len(), 1);

    let results = body_json(
        app.clone()
            .oneshot(get(&format!("/api/v1/batches/{}/results", batch_id)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(results["pages"][0]["include_or_exclude"], "Include");
    assert_eq!(results["pages"][1]["include_or_exclude"], "Exclude");
    assert_eq!(results["projects"][0]["project"], "4 RTG cranes in Long Beach");

    let pages_csv = app
        .clone()
        .oneshot(get(&format!("/api/v1/batches/{}/pages.csv", batch_id)))
        .await
        .unwrap();
    assert_eq!(pages_csv.status(), StatusCode::OK);
    assert!(
        pages_csv.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/csv")
    );
    let pages_csv = body_text(pages_csv).await;
    assert!(pages_csv.starts_with("filename,page,summary,include_or_exclude,reason\n"));
    assert!(pages_csv.contains("issue.txt,1,Crane order,Include,Purchase"));

    let projects_csv = body_text(
        app.clone()
            .oneshot(get(&format!("/api/v1/batches/{}/projects.csv", batch_id)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(
        projects_csv,
        "filename,page,project\nissue.txt,1,4 RTG cranes in Long Beach\n"
    );
}

#[tokio::test]
async fn given_queued_batch_when_cancelling_then_accepts_and_flags_message() {
    let (app, mut receiver) = app_without_worker();

    let created = body_json(
        app.clone()
            .oneshot(multipart_request(&[("a.txt", "text/plain", "page".as_bytes())]))
            .await
            .unwrap(),
    )
    .await;
    let batch_id = created["batch_id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/batches/{}/cancel", batch_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let queued = receiver.recv().await.unwrap();
    assert!(queued.cancel.is_cancelled());
}

#[tokio::test]
async fn given_unknown_batch_when_cancelling_then_returns_not_found() {
    let (app, _receiver) = app_without_worker();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/batches/{}/cancel", uuid::Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_full_batch_queue_when_creating_batch_then_returns_service_unavailable() {
    let (sender, _receiver) = mpsc::channel(1);
    let app = create_router(AppState::new(
        Arc::new(InMemoryBatchRepository::new()),
        sender,
        CancellationRegistry::new(),
        MAX_FILE_SIZE_MB,
    ));

    let first = app
        .clone()
        .oneshot(multipart_request(&[("a.txt", "text/plain", "page".as_bytes())]))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::ACCEPTED);

    let second = tokio::time::timeout(
        Duration::from_secs(5),
        app.oneshot(multipart_request(&[("b.txt", "text/plain", "page".as_bytes())])),
    )
    .await
    .expect("request must not wait for queue space")
    .unwrap();

    assert_eq!(second.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(second).await;
    assert!(json["error"].as_str().unwrap().contains("queue full"));
}

#[tokio::test]
async fn given_stopped_worker_when_creating_batch_then_returns_service_unavailable() {
    let (app, receiver) = app_without_worker();
    drop(receiver);

    let response = app
        .oneshot(multipart_request(&[("a.txt", "text/plain", "page".as_bytes())]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
