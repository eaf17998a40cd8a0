pub mod book;
pub mod commands;
pub mod loan;
pub mod page;
pub mod value_objects;

pub use book::*;
pub use loan::Loan;
pub use page::*;
pub use value_objects::*;
