use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, create_book, create_loan, delete_book, find_books, get_book, update_book,
};

/// Creates the API router with all catalog and loan endpoints
///
/// Book endpoints:
/// - POST /api/books - Create a book
/// - GET /api/books - Search books with filters and pagination
/// - GET /api/books/:id - Get book details
/// - PUT /api/books/:id - Update title and author
/// - DELETE /api/books/:id - Delete a book
///
/// Loan endpoints:
/// - POST /api/loan - Create a loan for a book identified by isbn (body: new loan id)
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/api/books", post(create_book).get(find_books))
        .route(
            "/api/books/:id",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/api/loan", post(create_loan))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
