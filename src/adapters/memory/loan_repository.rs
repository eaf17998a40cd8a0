use crate::domain::{Loan, LoanId};
use crate::ports::loan_repository::{LoanRepository as LoanRepositoryTrait, Result, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// LoanRepositoryのインメモリ実装
pub struct LoanRepository {
    loans: Mutex<HashMap<LoanId, Loan>>,
}

impl LoanRepository {
    pub fn new() -> Self {
        Self {
            loans: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for LoanRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LoanRepositoryTrait for LoanRepository {
    async fn save(&self, loan: Loan) -> Result<Loan> {
        let mut loans = self
            .loans
            .lock()
            .map_err(|_| StoreError::Backend("in-memory loan store lock poisoned".into()))?;

        let id = match loan.id {
            Some(id) => {
                if !loans.contains_key(&id) {
                    return Err(StoreError::NoRowsAffected(format!(
                        "loan {} does not exist",
                        id.value()
                    )));
                }
                id
            }
            None => {
                let next = loans.keys().map(LoanId::value).max().unwrap_or(0) + 1;
                LoanId::from_i64(next)
            }
        };

        let saved = Loan {
            id: Some(id),
            ..loan
        };
        loans.insert(id, saved.clone());

        Ok(saved)
    }

    async fn find_by_id(&self, id: LoanId) -> Result<Option<Loan>> {
        let loans = self
            .loans
            .lock()
            .map_err(|_| StoreError::Backend("in-memory loan store lock poisoned".into()))?;

        Ok(loans.get(&id).cloned())
    }
}
