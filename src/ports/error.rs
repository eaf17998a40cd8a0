use thiserror::Error;

/// ストア（永続化ポート）のエラー
#[derive(Debug, Error)]
pub enum StoreError {
    /// ユニーク制約違反
    ///
    /// ISBN重複の唯一の確定シグナルとして扱われる。
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// 対象のレコードが存在せず、1行も更新されなかった
    #[error("No rows affected: {0}")]
    NoRowsAffected(String),

    /// バックエンド（DB接続、クエリ実行など）の障害
    #[error("Store backend error")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        StoreError::Backend(Box::new(err))
    }
}

/// ストアポート共通の Result型
pub type Result<T> = std::result::Result<T, StoreError>;
