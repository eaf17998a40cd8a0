use crate::domain::{Book, BookFilter, BookId, Page, PageRequest};
use async_trait::async_trait;

pub use super::error::{Result, StoreError};

/// 書籍カタログストアポート
///
/// 書籍の永続化を抽象化する。IDの採番とISBNの一意性はストアの責務。
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// 指定ISBNの書籍が存在するか確認する
    async fn exists_by_isbn(&self, isbn: &str) -> Result<bool>;

    /// 書籍を保存する
    ///
    /// IDがない場合は新規登録してIDを採番し、ある場合は更新する。
    /// 存在しないIDの更新は`StoreError::NoRowsAffected`を返す。
    /// ISBNが重複する場合は`StoreError::UniqueViolation`を返す。
    async fn save(&self, book: Book) -> Result<Book>;

    /// IDで書籍を取得する
    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>>;

    /// ISBNで書籍を取得する（完全一致）
    ///
    /// 貸出作成時の書籍解決に使用される。
    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<Book>>;

    /// 書籍を削除する
    ///
    /// 存在しないIDの削除は何もしない。
    async fn delete(&self, id: BookId) -> Result<()>;

    /// フィルタに一致する書籍をページ単位で取得する
    ///
    /// 有効な各条件を大文字小文字を区別しない部分一致でAND結合する。
    /// 並び順はID昇順。
    async fn find(&self, filter: &BookFilter, page: PageRequest) -> Result<Page<Book>>;
}
