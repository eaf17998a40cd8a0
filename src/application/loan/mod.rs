mod loan_service;

pub use loan_service::{create_loan, get_loan_by_id};
