use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// コマンド：書籍を貸し出す
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanBook {
    pub isbn: String,
    pub customer: String,
    pub loan_date: NaiveDate,
}
