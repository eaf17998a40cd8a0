use crate::domain::{Book, BookFilter, BookId, Page, PageRequest};
use crate::ports::book_repository::{BookRepository as BookRepositoryTrait, Result, StoreError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

struct State {
    next_id: i64,
    books: BTreeMap<BookId, Book>,
}

impl State {
    /// 指定ISBNを自分以外の書籍が使っているか
    fn isbn_taken(&self, isbn: &str, except: Option<BookId>) -> bool {
        self.books
            .iter()
            .any(|(id, book)| Some(*id) != except && book.isbn == isbn)
    }
}

/// BookRepositoryのインメモリ実装
///
/// IDは1から順に採番する。ISBNの確認と挿入は同じロック内で行うため、
/// 同時登録でもユニーク制約はPostgreSQL実装と同様に守られる。
pub struct BookRepository {
    state: Mutex<State>,
}

impl BookRepository {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                next_id: 1,
                books: BTreeMap::new(),
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| StoreError::Backend("in-memory book store lock poisoned".into()))
    }
}

impl Default for BookRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookRepositoryTrait for BookRepository {
    async fn exists_by_isbn(&self, isbn: &str) -> Result<bool> {
        Ok(self.lock()?.isbn_taken(isbn, None))
    }

    async fn save(&self, book: Book) -> Result<Book> {
        let mut state = self.lock()?;

        if state.isbn_taken(&book.isbn, book.id) {
            return Err(StoreError::UniqueViolation(format!(
                "isbn {} already exists",
                book.isbn
            )));
        }

        let saved = match book.id {
            Some(id) => {
                if !state.books.contains_key(&id) {
                    return Err(StoreError::NoRowsAffected(format!(
                        "book {} does not exist",
                        id.value()
                    )));
                }
                book
            }
            None => {
                let id = BookId::from_i64(state.next_id);
                state.next_id += 1;
                book.with_id(id)
            }
        };

        if let Some(id) = saved.id {
            state.books.insert(id, saved.clone());
        }

        Ok(saved)
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>> {
        Ok(self.lock()?.books.get(&id).cloned())
    }

    async fn find_by_isbn(&self, isbn: &str) -> Result<Option<Book>> {
        Ok(self
            .lock()?
            .books
            .values()
            .find(|book| book.isbn == isbn)
            .cloned())
    }

    async fn delete(&self, id: BookId) -> Result<()> {
        self.lock()?.books.remove(&id);
        Ok(())
    }

    /// BTreeMapのキー順（ID昇順）で一致した書籍を切り出す
    async fn find(&self, filter: &BookFilter, page: PageRequest) -> Result<Page<Book>> {
        let state = self.lock()?;
        let matching: Vec<&Book> = state
            .books
            .values()
            .filter(|book| filter.matches(book))
            .collect();

        let total = matching.len() as u64;
        let content = matching
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(page.size() as usize)
            .cloned()
            .collect();

        Ok(Page::new(content, total, page))
    }
}
