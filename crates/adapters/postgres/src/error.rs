//! sqlx 错误分类

use cuba_errors::AppError;

/// 将 sqlx 错误转换为 AppError
///
/// 唯一约束、外键与检查约束违反归类为 `Conflict`，其余为 `Database`。
pub fn map_sqlx_error(context: &str, err: sqlx::Error) -> AppError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation()
            || db_err.is_foreign_key_violation()
            || db_err.is_check_violation()
        {
            let constraint = db_err.constraint().unwrap_or("unknown");
            return AppError::conflict(format!(
                "{}: integrity constraint '{}' violated",
                context, constraint
            ));
        }
    }
    AppError::database(format!("{}: {}", context, err))
}
