use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Book, BookId, LoanId};

/// 貸出 - 1冊の書籍の1回の貸出記録
///
/// 書籍への参照は所有しない（書籍のライフサイクルには関与しない）。
/// 同じ書籍に対する複数の貸出記録は禁止されていない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub id: Option<LoanId>,
    /// 貸出時点の書籍ISBN（非正規化コピー）
    pub isbn: String,
    pub customer: String,
    pub book_id: BookId,
    pub loan_date: NaiveDate,
    /// 返却済みフラグ（作成時は未設定）
    ///
    /// 現時点で値を遷移させる操作は存在しない。
    pub returned: Option<bool>,
}

/// 永続化済みの書籍から新しい貸出を作成する（純粋な関数）
///
/// # 戻り値
/// 書籍がIDを持たない（未永続化）場合は`None`
pub fn open_loan(
    book: &Book,
    customer: impl Into<String>,
    loan_date: NaiveDate,
) -> Option<Loan> {
    let book_id = book.id?;

    Some(Loan {
        id: None,
        isbn: book.isbn.clone(),
        customer: customer.into(),
        book_id,
        loan_date,
        returned: None,
    })
}
