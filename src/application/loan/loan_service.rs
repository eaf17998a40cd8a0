use crate::application::{LibraryError, Result, ServiceDependencies, book};
use crate::domain::{self, Loan, LoanId, commands::LoanBook};

/// 書籍を貸し出す
///
/// ビジネスルール：
/// - ISBNに一致する書籍がカタログに存在すること
///
/// 書籍はカタログサービス経由でISBNから解決し、
/// 貸出日はコマンドの`loan_date`（呼び出し時点の日付）とする。
///
/// # 引数
/// * `deps` - サービスの依存関係
/// * `cmd` - 貸出コマンド
///
/// # 戻り値
/// 成功時は作成された貸出のID
///
/// # エラー
/// - NotFound: ISBNに一致する書籍がない
/// - StoreError: ストアの障害
pub async fn create_loan(deps: &ServiceDependencies, cmd: LoanBook) -> Result<LoanId> {
    // 1. ISBNから書籍を解決
    let Some(found) = book::get_book_by_isbn(deps, &cmd.isbn).await? else {
        tracing::warn!(isbn = %cmd.isbn, "No book found for loan request");
        return Err(LibraryError::book_not_found_for_isbn());
    };

    // 2. ドメイン層の純粋関数で貸出を組み立てる
    let loan = domain::loan::open_loan(&found, cmd.customer, cmd.loan_date)
        .ok_or_else(LibraryError::book_not_found_for_isbn)?;

    // 3. 貸出を保存
    let saved = deps
        .loan_repository
        .save(loan)
        .await
        .map_err(LibraryError::StoreError)?;

    let loan_id = saved.id.ok_or_else(|| {
        LibraryError::StoreError(crate::ports::StoreError::Backend(
            "loan store returned a record without id".into(),
        ))
    })?;

    tracing::info!(
        loan_id = loan_id.value(),
        isbn = %saved.isbn,
        customer = %saved.customer,
        "Loan created"
    );

    Ok(loan_id)
}

/// IDで貸出を取得する
pub async fn get_loan_by_id(deps: &ServiceDependencies, id: LoanId) -> Result<Option<Loan>> {
    deps.loan_repository
        .find_by_id(id)
        .await
        .map_err(LibraryError::StoreError)
}
