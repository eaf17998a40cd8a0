use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{Book, BookFilter, DEFAULT_PAGE_SIZE, Page, PageRequest, commands::LoanBook};

/// 書籍登録リクエスト（POST /api/books）
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BookRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "author must not be empty"))]
    pub author: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "isbn must not be empty"))]
    pub isbn: String,
}

impl BookRequest {
    pub fn into_book(self) -> Book {
        Book::new(self.title, self.author, self.isbn)
    }
}

/// 書籍更新リクエスト（PUT /api/books/:id）
///
/// ISBNは更新対象外のため受け付けない。
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateBookRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "author must not be empty"))]
    pub author: String,
}

/// 書籍レスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookResponse {
    pub id: Option<i64>,
    pub title: String,
    pub author: String,
    pub isbn: String,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id.map(|id| id.value()),
            title: book.title,
            author: book.author,
            isbn: book.isbn,
        }
    }
}

/// 書籍検索のクエリパラメータ（GET /api/books）
#[derive(Debug, Default, Deserialize)]
pub struct ListBooksQuery {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    /// 0始まりのページ番号
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl ListBooksQuery {
    pub fn to_filter(&self) -> BookFilter {
        BookFilter::new(self.title.clone(), self.author.clone(), self.isbn.clone())
    }

    pub fn to_page_request(&self) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(0),
            self.size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}

/// ページレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub page: u32,
    pub size: u32,
}

impl<T> From<Page<T>> for PageResponse<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            total_pages: page.total_pages(),
            total_elements: page.total_elements,
            page: page.page,
            size: page.size,
            content: page.content,
        }
    }
}

/// 貸出リクエスト（POST /api/loan）
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoanRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "isbn must not be empty"))]
    pub isbn: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "customer must not be empty"))]
    pub customer: String,
}

impl LoanRequest {
    /// 貸出日を付与してコマンドに変換する
    pub fn to_command(&self, loan_date: NaiveDate) -> LoanBook {
        LoanBook {
            isbn: self.isbn.clone(),
            customer: self.customer.clone(),
            loan_date,
        }
    }
}

/// エラーレスポンス
///
/// 検証エラーは項目ごとに1件ずつ、ビジネスエラーは1件のメッセージを持つ。
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub errors: Vec<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
        }
    }

    pub fn from_messages(errors: Vec<String>) -> Self {
        Self { errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_book_request_reports_each_field() {
        let req: BookRequest = serde_json::from_str("{}").unwrap();
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 3);
    }

    #[test]
    fn test_list_query_defaults() {
        let query = ListBooksQuery::default();
        assert!(query.to_filter().is_empty());
        assert_eq!(query.to_page_request(), PageRequest::new(0, DEFAULT_PAGE_SIZE));
    }

    #[test]
    fn test_list_query_ignores_blank_filters() {
        let query = ListBooksQuery {
            title: Some(String::new()),
            author: Some("Arthur".to_string()),
            ..Default::default()
        };
        let filter = query.to_filter();
        assert_eq!(filter.title, None);
        assert_eq!(filter.author.as_deref(), Some("Arthur"));
    }
}
