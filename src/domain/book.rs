use serde::{Deserialize, Serialize};

use super::BookId;

/// 書籍 - カタログ管理の集約
///
/// 不変条件：
/// - 永続化済みの書籍同士でISBNが重複しない（ストアのユニーク制約で保証）
/// - IDはストアが採番し、以後変更されない
/// - ISBNは公開された操作では変更されない
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: Option<BookId>,
    pub title: String,
    pub author: String,
    pub isbn: String,
}

impl Book {
    /// 未永続化の書籍を作成する（IDなし）
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
        }
    }

    /// ストアが採番したIDを付与する
    pub fn with_id(self, id: BookId) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }

    /// タイトルと著者を変更する
    ///
    /// ISBNは変更対象外。
    pub fn revise(self, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            ..self
        }
    }
}

/// 検索条件の対象となる書籍の属性
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookField {
    Title,
    Author,
    Isbn,
}

impl BookField {
    /// 永続化層での列名
    pub fn column(&self) -> &'static str {
        match self {
            BookField::Title => "title",
            BookField::Author => "author",
            BookField::Isbn => "isbn",
        }
    }

    /// 書籍から対応する属性値を取り出す
    pub fn value_of<'a>(&self, book: &'a Book) -> &'a str {
        match self {
            BookField::Title => &book.title,
            BookField::Author => &book.author,
            BookField::Isbn => &book.isbn,
        }
    }
}

/// 書籍検索のフィルタテンプレート
///
/// 各属性は「値あり」か「指定なし」のどちらか。
/// 空文字列は構築時に「指定なし」へ正規化される。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookFilter {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
}

impl BookFilter {
    pub fn new(title: Option<String>, author: Option<String>, isbn: Option<String>) -> Self {
        Self {
            title: normalize(title),
            author: normalize(author),
            isbn: normalize(isbn),
        }
    }

    /// 有効な条件（値が指定された属性）だけを列挙する
    pub fn criteria(&self) -> impl Iterator<Item = (BookField, &str)> {
        [
            (BookField::Title, self.title.as_deref()),
            (BookField::Author, self.author.as_deref()),
            (BookField::Isbn, self.isbn.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| match value {
            Some(v) if !v.is_empty() => Some((field, v)),
            _ => None,
        })
    }

    /// 条件が1つも指定されていないか
    pub fn is_empty(&self) -> bool {
        self.criteria().next().is_none()
    }

    /// 書籍がフィルタに一致するか
    ///
    /// 有効な各条件について、対応する属性値が条件値を
    /// 大文字小文字を区別せず部分文字列として含むこと（AND結合）。
    pub fn matches(&self, book: &Book) -> bool {
        self.criteria()
            .all(|(field, needle)| contains_ignore_case(field.value_of(book), needle))
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
