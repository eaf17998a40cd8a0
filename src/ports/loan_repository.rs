use crate::domain::{Loan, LoanId};
use async_trait::async_trait;

pub use super::error::{Result, StoreError};

/// 貸出ストアポート
#[async_trait]
pub trait LoanRepository: Send + Sync {
    /// 貸出を保存する（IDがなければ採番する）
    async fn save(&self, loan: Loan) -> Result<Loan>;

    /// IDで貸出を取得する
    async fn find_by_id(&self, id: LoanId) -> Result<Option<Loan>>;
}
