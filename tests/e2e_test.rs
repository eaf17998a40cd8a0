use axum::body::Body;
use axum::http::{Request, StatusCode};
use rusty_library_catalog::api::handlers::AppState;
use rusty_library_catalog::api::router::create_router;
use rusty_library_catalog::api::types::*;
use rusty_library_catalog::application::{ServiceDependencies, loan};
use rusty_library_catalog::domain::LoanId;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

mod common;

// ============================================================================
// E2Eテスト用のヘルパー関数
// ============================================================================

/// E2Eテスト用のアプリケーションセットアップ
///
/// インメモリアダプターと実際のAPIルーターを使用します。
fn setup_e2e_app() -> (axum::Router, ServiceDependencies) {
    let service_deps = common::in_memory_deps();
    let app_state = Arc::new(AppState {
        service_deps: service_deps.clone(),
    });

    (create_router(app_state), service_deps)
}

async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, bytes.to_vec())
}

fn parse<T: DeserializeOwned>(bytes: &[u8]) -> T {
    serde_json::from_slice(bytes).unwrap()
}

fn new_book_json() -> Value {
    json!({ "title": "As aventuras", "author": "Arthur", "isbn": "001" })
}

async fn create_book(app: &axum::Router, body: Value) -> BookResponse {
    let (status, bytes) = send(app, "POST", "/api/books", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    parse(&bytes)
}

// ============================================================================
// 書籍
// ============================================================================

#[tokio::test]
async fn test_e2e_create_book() {
    let (app, _) = setup_e2e_app();

    let book = create_book(&app, new_book_json()).await;

    assert!(book.id.is_some());
    assert_eq!(book.title, "As aventuras");
    assert_eq!(book.author, "Arthur");
    assert_eq!(book.isbn, "001");
}

#[tokio::test]
async fn test_e2e_create_invalid_book_reports_every_field() {
    let (app, _) = setup_e2e_app();

    let (status, bytes) = send(&app, "POST", "/api/books", Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = parse(&bytes);
    assert_eq!(error.errors.len(), 3);
}

#[tokio::test]
async fn test_e2e_create_book_with_duplicate_isbn() {
    let (app, _) = setup_e2e_app();
    create_book(&app, new_book_json()).await;

    let (status, bytes) = send(&app, "POST", "/api/books", Some(new_book_json())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = parse(&bytes);
    assert_eq!(error.errors, vec!["Isbn já Cadastrado".to_string()]);
}

#[tokio::test]
async fn test_e2e_get_book_details() {
    let (app, _) = setup_e2e_app();
    let created = create_book(&app, new_book_json()).await;

    let uri = format!("/api/books/{}", created.id.unwrap());
    let (status, bytes) = send(&app, "GET", &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse::<BookResponse>(&bytes), created);
}

#[tokio::test]
async fn test_e2e_get_book_not_found() {
    let (app, _) = setup_e2e_app();

    let (status, _) = send(&app, "GET", "/api/books/1", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_e2e_update_book() {
    let (app, _) = setup_e2e_app();
    let created = create_book(&app, new_book_json()).await;

    let uri = format!("/api/books/{}", created.id.unwrap());
    let (status, bytes) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({ "title": "some title", "author": "some author" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let updated: BookResponse = parse(&bytes);
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "some title");
    assert_eq!(updated.author, "some author");
    assert_eq!(updated.isbn, "001");
}

#[tokio::test]
async fn test_e2e_update_inexistent_book() {
    let (app, _) = setup_e2e_app();

    let (status, _) = send(
        &app,
        "PUT",
        "/api/books/1",
        Some(json!({ "title": "some title", "author": "some author" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_e2e_delete_book() {
    let (app, _) = setup_e2e_app();
    let created = create_book(&app, new_book_json()).await;
    let uri = format!("/api/books/{}", created.id.unwrap());

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_e2e_delete_inexistent_book() {
    let (app, _) = setup_e2e_app();

    let (status, _) = send(&app, "DELETE", "/api/books/1", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_e2e_find_books_with_filter_and_pagination() {
    let (app, _) = setup_e2e_app();
    create_book(&app, new_book_json()).await;
    create_book(
        &app,
        json!({ "title": "Aventuras no Mar", "author": "Maria", "isbn": "002" }),
    )
    .await;
    create_book(
        &app,
        json!({ "title": "Dom Casmurro", "author": "Machado", "isbn": "003" }),
    )
    .await;

    let (status, bytes) = send(
        &app,
        "GET",
        "/api/books?title=aventuras&page=0&size=1",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let page: PageResponse<BookResponse> = parse(&bytes);
    assert_eq!(page.total_elements, 2);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.content[0].isbn, "001");

    let (_, bytes) = send(&app, "GET", "/api/books", None).await;
    let page: PageResponse<BookResponse> = parse(&bytes);
    assert_eq!(page.total_elements, 3);
    assert_eq!(page.size, 10);
}

// ============================================================================
// 貸出
// ============================================================================

#[tokio::test]
async fn test_e2e_create_loan() {
    let (app, deps) = setup_e2e_app();
    create_book(&app, new_book_json()).await;

    let (status, bytes) = send(
        &app,
        "POST",
        "/api/loan",
        Some(json!({ "isbn": "001", "customer": "Arthur" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let loan_id: i64 = parse(&bytes);

    let stored = loan::get_loan_by_id(&deps, LoanId::from_i64(loan_id))
        .await
        .unwrap()
        .expect("loan should be persisted");
    assert_eq!(stored.customer, "Arthur");
    assert_eq!(stored.loan_date, chrono::Local::now().date_naive());
}

#[tokio::test]
async fn test_e2e_create_loan_for_unknown_isbn() {
    let (app, _) = setup_e2e_app();

    let (status, bytes) = send(
        &app,
        "POST",
        "/api/loan",
        Some(json!({ "isbn": "001", "customer": "Arthur" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = parse(&bytes);
    assert_eq!(error.errors, vec!["Book not found for passed isbn".to_string()]);
}

#[tokio::test]
async fn test_e2e_health_check() {
    let (app, _) = setup_e2e_app();

    let (status, bytes) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"OK");
}
