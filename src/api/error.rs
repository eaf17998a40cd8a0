use crate::application::LibraryError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use validator::ValidationErrors;

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーと入力検証エラーをHTTPレスポンスにマッピングする。
#[derive(Debug)]
pub enum ApiError {
    /// アプリケーション層のエラー
    Application(LibraryError),
    /// リクエストの検証エラー（項目ごとのメッセージ）
    Validation(Vec<String>),
    /// パスで指定された書籍が存在しない
    BookNotFound,
}

impl From<LibraryError> for ApiError {
    fn from(err: LibraryError) -> Self {
        ApiError::Application(err)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{field} is invalid"))
                })
            })
            .collect();
        messages.sort();
        ApiError::Validation(messages)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(messages) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::from_messages(messages),
            ),
            ApiError::BookNotFound => {
                (StatusCode::NOT_FOUND, ErrorResponse::new("Book not found"))
            }

            // 400 Bad Request - ビジネスルール違反（メッセージはそのまま返す）
            ApiError::Application(
                err @ (LibraryError::InvalidArgument(_)
                | LibraryError::DuplicateKey(_)
                | LibraryError::NotFound(_)),
            ) => (StatusCode::BAD_REQUEST, ErrorResponse::new(err.to_string())),

            // 500 Internal Server Error - システム障害
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            ApiError::Application(LibraryError::StoreError(e)) => {
                tracing::error!(error.cause_chain = ?e, error.message = %e, "Store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("An unexpected error occurred"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
