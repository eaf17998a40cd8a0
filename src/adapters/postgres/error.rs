use crate::ports::StoreError;

/// PostgreSQLのユニーク制約違反（SQLSTATE 23505）か判定する
fn is_unique_violation(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        if let Some(code) = db_err.code() {
            return code.as_ref() == "23505";
        }
    }
    false
}

/// sqlxのエラーをストアポートのエラーに変換する
pub(super) fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    if is_unique_violation(&err) {
        let constraint = match &err {
            sqlx::Error::Database(db_err) => db_err.constraint().unwrap_or("unknown").to_string(),
            _ => "unknown".to_string(),
        };
        return StoreError::UniqueViolation(constraint);
    }
    StoreError::backend(err)
}
