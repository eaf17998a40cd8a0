use crate::ports::{BookRepository, LoanRepository};
use std::sync::Arc;

/// サービスの依存関係
///
/// コンテナを介さず、ストアを明示的に注入する。
/// サービス関数は振る舞いだけを持ち、依存はこの構造体で受け取る。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub book_repository: Arc<dyn BookRepository>,
    pub loan_repository: Arc<dyn LoanRepository>,
}

impl ServiceDependencies {
    pub fn new(
        book_repository: Arc<dyn BookRepository>,
        loan_repository: Arc<dyn LoanRepository>,
    ) -> Self {
        Self {
            book_repository,
            loan_repository,
        }
    }
}
