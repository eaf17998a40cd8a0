pub mod book;
mod dependencies;
mod errors;
pub mod loan;

pub use dependencies::ServiceDependencies;
pub use errors::{
    BOOK_NOT_FOUND_FOR_ISBN_MESSAGE, DUPLICATE_ISBN_MESSAGE, LibraryError,
    MISSING_BOOK_ID_MESSAGE, Result,
};
