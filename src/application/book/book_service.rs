use crate::domain::{Book, BookFilter, BookId, Page, PageRequest};
use crate::ports::StoreError;

use crate::application::{LibraryError, Result, ServiceDependencies};

/// ストアのエラーをアプリケーション層のエラーに変換する
///
/// ユニーク制約違反はISBN重複として扱う（チェックをすり抜けた競合も含む）。
fn map_store_error(err: StoreError) -> LibraryError {
    match err {
        StoreError::UniqueViolation(_) => LibraryError::duplicate_isbn(),
        other => LibraryError::StoreError(other),
    }
}

/// 書籍を登録する
///
/// ビジネスルール：
/// - 同じISBNの書籍が既に存在しないこと
///
/// 事前の存在確認は早期リジェクトのためのもので、
/// 同時登録の競合はストアのユニーク制約違反で検出する。
///
/// # 引数
/// * `deps` - サービスの依存関係
/// * `book` - 登録する書籍（title, author, isbnは呼び出し側で検証済み）
///
/// # 戻り値
/// IDが採番された書籍
///
/// # エラー
/// - DuplicateKey: ISBNが既に登録されている
/// - StoreError: ストアの障害
pub async fn create_book(deps: &ServiceDependencies, book: Book) -> Result<Book> {
    // 1. ISBN重複の事前確認
    let exists = deps
        .book_repository
        .exists_by_isbn(&book.isbn)
        .await
        .map_err(LibraryError::StoreError)?;

    if exists {
        tracing::warn!(isbn = %book.isbn, "Rejected book with duplicate isbn");
        return Err(LibraryError::duplicate_isbn());
    }

    // 2. 保存（ユニーク制約違反が確定シグナル）
    let saved = deps
        .book_repository
        .save(Book { id: None, ..book })
        .await
        .map_err(map_store_error)?;

    tracing::info!(book_id = ?saved.id, isbn = %saved.isbn, "Book created");

    Ok(saved)
}

/// IDで書籍を取得する
///
/// 存在しない場合はエラーではなく`None`を返す。
pub async fn get_book_by_id(deps: &ServiceDependencies, id: BookId) -> Result<Option<Book>> {
    deps.book_repository
        .find_by_id(id)
        .await
        .map_err(LibraryError::StoreError)
}

/// ISBNで書籍を取得する
///
/// 貸出作成時の書籍解決に使用される。存在しない場合は`None`。
pub async fn get_book_by_isbn(deps: &ServiceDependencies, isbn: &str) -> Result<Option<Book>> {
    deps.book_repository
        .find_by_isbn(isbn)
        .await
        .map_err(LibraryError::StoreError)
}

/// 書籍を更新する
///
/// 存在確認は行わない。呼び出し側が事前に取得し、
/// タイトル・著者を変更してから渡すこと。
///
/// # エラー
/// - InvalidArgument: 書籍にIDがない
/// - StoreError: ストアの障害
pub async fn update_book(deps: &ServiceDependencies, book: Book) -> Result<Book> {
    let Some(id) = book.id else {
        return Err(LibraryError::missing_book_id());
    };

    let saved = deps
        .book_repository
        .save(book)
        .await
        .map_err(map_store_error)?;

    tracing::info!(book_id = id.value(), "Book updated");

    Ok(saved)
}

/// 書籍を削除する
///
/// # エラー
/// - InvalidArgument: 書籍にIDがない
/// - StoreError: ストアの障害
pub async fn delete_book(deps: &ServiceDependencies, book: &Book) -> Result<()> {
    let Some(id) = book.id else {
        return Err(LibraryError::missing_book_id());
    };

    deps.book_repository
        .delete(id)
        .await
        .map_err(LibraryError::StoreError)?;

    tracing::info!(book_id = id.value(), "Book deleted");

    Ok(())
}

/// フィルタテンプレートで書籍を検索する
///
/// フィルタで値が指定された属性ごとに、保存値がその値を
/// 大文字小文字を区別せず部分文字列として含むことを要求し、
/// すべての条件をANDで結合する。指定のない属性は制約しない。
pub async fn find_books(
    deps: &ServiceDependencies,
    filter: &BookFilter,
    page: PageRequest,
) -> Result<Page<Book>> {
    tracing::debug!(?filter, page = page.page(), size = page.size(), "Searching books");

    deps.book_repository
        .find(filter, page)
        .await
        .map_err(LibraryError::StoreError)
}
