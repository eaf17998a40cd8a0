use crate::domain::{Book, BookFilter, BookId, Page, PageRequest};
use crate::ports::book_repository::{BookRepository as BookRepositoryTrait, Result, StoreError};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, Row, postgres::PgRow};

use super::error::map_sqlx_error;

/// PostgreSQLの行データをBookに変換する
fn map_row_to_book(row: &PgRow) -> Book {
    Book {
        id: Some(BookId::from_i64(row.get("id"))),
        title: row.get("title"),
        author: row.get("author"),
        isbn: row.get("isbn"),
    }
}

/// LIKEパターンの特殊文字をエスケープする
///
/// ILIKEの既定エスケープ文字（バックスラッシュ）を使う。
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// フィルタの有効な条件をWHERE句として追加する
///
/// 条件値はすべてバインドパラメータで渡す。
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &BookFilter) {
    let mut separator = " WHERE ";
    for (field, value) in filter.criteria() {
        builder
            .push(separator)
            .push(field.column())
            .push(" ILIKE '%' || ")
            .push_bind(escape_like(value))
            .push(" || '%'");
        separator = " AND ";
    }
}

/// BookRepositoryのPostgreSQL実装
///
/// ISBNの一意性は`books_isbn_key`ユニーク制約で保証し、
/// 違反は`StoreError::UniqueViolation`として返す。
pub struct BookRepository {
    pool: PgPool,
}

impl BookRepository {
    /// PostgreSQLコネクションプールから新しいBookRepositoryを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepositoryTrait for BookRepository {
    async fn exists_by_isbn(&self, isbn: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM books WHERE isbn = $1)")
                .bind(isbn)
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(exists)
    }

    /// 書籍を保存する
    ///
    /// IDなしはINSERT、IDありはUPDATE。いずれも保存後の行を返す。
    async fn save(&self, book: Book) -> Result<Book> {
        let row = match book.id {
            None => sqlx::query(
                r#"
                INSERT INTO books (title, author, isbn)
                VALUES ($1, $2, $3)
                RETURNING id, title, author, isbn
                "#,
            )
            .bind(&book.title)
            .bind(&book.author)
            .bind(&book.isbn)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?,
            Some(id) => sqlx::query(
                r#"
                UPDATE books
                SET title = $2, author = $3, isbn = $4
                WHERE id = $1
                RETURNING id, title, author, isbn
                "#,
            )
            .bind(id.value())
            .bind(&book.title)
            .bind(&book.author)
            .bind(&book.isbn)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or_else(|| {
                StoreError::NoRowsAffected(format!("book {} does not exist", id.value()))
            })?,
        };

        Ok(map_row_to_book(&row))
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>> {
        let row = sqlx::query("SELECT id, title, author, isbn FROM books WHERE id = $1")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.as_ref().map(map_row_to_book))
    }

    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<Book>> {
        let row = sqlx::query("SELECT id, title, author, isbn FROM books WHERE isbn = $1")
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.as_ref().map(map_row_to_book))
    }

    async fn delete(&self, id: BookId) -> Result<()> {
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    /// フィルタ付きページ検索
    ///
    /// 件数取得とページ取得は同じWHERE句で並行に実行する。
    async fn find(&self, filter: &BookFilter, page: PageRequest) -> Result<Page<Book>> {
        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM books");
        push_filter(&mut count_query, filter);

        let mut select_query =
            QueryBuilder::<Postgres>::new("SELECT id, title, author, isbn FROM books");
        push_filter(&mut select_query, filter);
        select_query
            .push(" ORDER BY id ASC LIMIT ")
            .push_bind(i64::from(page.size()))
            .push(" OFFSET ")
            .push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));

        let (total, rows) = futures::try_join!(
            count_query
                .build_query_scalar::<i64>()
                .fetch_one(&self.pool),
            select_query.build().fetch_all(&self.pool),
        )
        .map_err(map_sqlx_error)?;

        let content = rows.iter().map(map_row_to_book).collect();

        Ok(Page::new(content, total.max(0) as u64, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_escapes_wildcards() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("Arthur"), "Arthur");
    }

    #[test]
    fn test_push_filter_without_criteria_adds_nothing() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM books");
        push_filter(&mut builder, &BookFilter::default());
        assert_eq!(builder.sql(), "SELECT COUNT(*) FROM books");
    }

    #[test]
    fn test_push_filter_joins_criteria_with_and() {
        let filter = BookFilter::new(
            Some("aventuras".to_string()),
            None,
            Some("001".to_string()),
        );
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM books");
        push_filter(&mut builder, &filter);
        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM books WHERE title ILIKE '%' || $1 || '%' AND isbn ILIKE '%' || $2 || '%'"
        );
    }
}
