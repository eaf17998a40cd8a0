use thiserror::Error;

use crate::ports::StoreError;

/// ISBN重複時のメッセージ
pub const DUPLICATE_ISBN_MESSAGE: &str = "Isbn já Cadastrado";

/// IDなしで更新・削除しようとした時のメッセージ
pub const MISSING_BOOK_ID_MESSAGE: &str = "Book id cant be null.";

/// 貸出対象の書籍が見つからない時のメッセージ
pub const BOOK_NOT_FOUND_FOR_ISBN_MESSAGE: &str = "Book not found for passed isbn";

/// カタログ・貸出アプリケーション層のエラー
///
/// ビジネスエラーは人が読めるメッセージをそのまま保持し、
/// API層はこれをレスポンスに転記する。
#[derive(Debug, Error)]
pub enum LibraryError {
    /// 呼び出し側の入力不備（更新・削除時のID欠落など）
    #[error("{0}")]
    InvalidArgument(String),

    /// ISBNの一意性違反
    #[error("{0}")]
    DuplicateKey(String),

    /// 要求されたレコードが存在しない
    #[error("{0}")]
    NotFound(String),

    /// ストアのエラー（そのまま呼び出し側へ伝播）
    #[error("Store error")]
    StoreError(#[source] StoreError),
}

impl LibraryError {
    pub(crate) fn duplicate_isbn() -> Self {
        LibraryError::DuplicateKey(DUPLICATE_ISBN_MESSAGE.to_string())
    }

    pub(crate) fn missing_book_id() -> Self {
        LibraryError::InvalidArgument(MISSING_BOOK_ID_MESSAGE.to_string())
    }

    pub(crate) fn book_not_found_for_isbn() -> Self {
        LibraryError::NotFound(BOOK_NOT_FOUND_FOR_ISBN_MESSAGE.to_string())
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, LibraryError>;
