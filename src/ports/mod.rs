pub mod book_repository;
pub mod error;
pub mod loan_repository;

pub use book_repository::BookRepository;
pub use error::StoreError;
pub use loan_repository::LoanRepository;
