use crate::application::{ServiceDependencies, book, loan};
use crate::domain::BookId;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;
use validator::Validate;

use super::{
    error::ApiError,
    types::{
        BookRequest, BookResponse, ListBooksQuery, LoanRequest, PageResponse, UpdateBookRequest,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

// ============================================================================
// Book handlers
// ============================================================================

/// POST /api/books - 書籍を登録
///
/// title, author, isbnが空でないことを検証してから登録する。
/// ISBNが重複している場合は400を返す。
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    req.validate()?;

    let book = book::create_book(&state.service_deps, req.into_book()).await?;

    Ok((StatusCode::CREATED, Json(BookResponse::from(book))))
}

/// GET /api/books/:id - 書籍をIDで取得
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = book::get_book_by_id(&state.service_deps, BookId::from_i64(id))
        .await?
        .ok_or(ApiError::BookNotFound)?;

    Ok(Json(BookResponse::from(book)))
}

/// PUT /api/books/:id - 書籍のタイトルと著者を更新
///
/// 取得 → 変更 → 保存の順で処理する。存在しない場合は404。
pub async fn update_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateBookRequest>,
) -> Result<Json<BookResponse>, ApiError> {
    req.validate()?;

    let current = book::get_book_by_id(&state.service_deps, BookId::from_i64(id))
        .await?
        .ok_or(ApiError::BookNotFound)?;

    let updated =
        book::update_book(&state.service_deps, current.revise(req.title, req.author)).await?;

    Ok(Json(BookResponse::from(updated)))
}

/// DELETE /api/books/:id - 書籍を削除
///
/// 存在しない場合は404。
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let current = book::get_book_by_id(&state.service_deps, BookId::from_i64(id))
        .await?
        .ok_or(ApiError::BookNotFound)?;

    book::delete_book(&state.service_deps, &current).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/books - フィルタ付き書籍検索
///
/// クエリパラメータ:
/// - title, author, isbn: 部分一致（大文字小文字を区別しない）、指定したものだけAND結合
/// - page: 0始まりのページ番号（既定0）
/// - size: ページサイズ（既定10、最大100）
pub async fn find_books(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListBooksQuery>,
) -> Result<Json<PageResponse<BookResponse>>, ApiError> {
    let page = book::find_books(
        &state.service_deps,
        &query.to_filter(),
        query.to_page_request(),
    )
    .await?;

    Ok(Json(PageResponse::from(page.map(BookResponse::from))))
}

// ============================================================================
// Loan handlers
// ============================================================================

/// POST /api/loan - 貸出を作成
///
/// レスポンスボディは採番された貸出IDの数値のみ。
/// ISBNに一致する書籍がない場合は400を返す。
/// 貸出日はリクエストを受けた日（ローカル日付）。
pub async fn create_loan(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoanRequest>,
) -> Result<(StatusCode, Json<i64>), ApiError> {
    req.validate()?;

    let today = chrono::Local::now().date_naive();
    let loan_id = loan::create_loan(&state.service_deps, req.to_command(today)).await?;

    Ok((StatusCode::CREATED, Json(loan_id.value())))
}
