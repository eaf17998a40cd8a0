use crate::domain::{BookId, Loan, LoanId};
use crate::ports::loan_repository::{LoanRepository as LoanRepositoryTrait, Result, StoreError};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use super::error::map_sqlx_error;

/// PostgreSQLの行データをLoanに変換する
fn map_row_to_loan(row: &PgRow) -> Loan {
    Loan {
        id: Some(LoanId::from_i64(row.get("id"))),
        isbn: row.get("isbn"),
        customer: row.get("customer"),
        book_id: BookId::from_i64(row.get("book_id")),
        loan_date: row.get("loan_date"),
        returned: row.get("returned"),
    }
}

/// LoanRepositoryのPostgreSQL実装
pub struct LoanRepository {
    pool: PgPool,
}

impl LoanRepository {
    /// PostgreSQLコネクションプールから新しいLoanRepositoryを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoanRepositoryTrait for LoanRepository {
    async fn save(&self, loan: Loan) -> Result<Loan> {
        let row = match loan.id {
            None => sqlx::query(
                r#"
                INSERT INTO loans (isbn, customer, book_id, loan_date, returned)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, isbn, customer, book_id, loan_date, returned
                "#,
            )
            .bind(&loan.isbn)
            .bind(&loan.customer)
            .bind(loan.book_id.value())
            .bind(loan.loan_date)
            .bind(loan.returned)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?,
            Some(id) => sqlx::query(
                r#"
                UPDATE loans
                SET isbn = $2, customer = $3, book_id = $4, loan_date = $5, returned = $6
                WHERE id = $1
                RETURNING id, isbn, customer, book_id, loan_date, returned
                "#,
            )
            .bind(id.value())
            .bind(&loan.isbn)
            .bind(&loan.customer)
            .bind(loan.book_id.value())
            .bind(loan.loan_date)
            .bind(loan.returned)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or_else(|| {
                StoreError::NoRowsAffected(format!("loan {} does not exist", id.value()))
            })?,
        };

        Ok(map_row_to_loan(&row))
    }

    async fn find_by_id(&self, id: LoanId) -> Result<Option<Loan>> {
        let row = sqlx::query(
            r#"
            SELECT id, isbn, customer, book_id, loan_date, returned
            FROM loans
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.as_ref().map(map_row_to_loan))
    }
}
