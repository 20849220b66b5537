//! 服务错误定义

use cuba_errors::AppError;
use thiserror::Error;

use crate::domain::ProductId;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found with id: {0}")]
    NotFound(ProductId),

    #[error("Product with id {0} is deleted")]
    AlreadyDeleted(ProductId),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    UpdateFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Store(#[from] AppError),
}

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => AppError::not_found(err.to_string()),
            ProductError::AlreadyDeleted(_) => AppError::gone(err.to_string()),
            ProductError::AlreadyExists(msg) => AppError::conflict(msg),
            ProductError::UpdateFailed(msg) => AppError::internal(msg),
            ProductError::InvalidInput(msg) => AppError::validation(msg),
            ProductError::Store(inner) => inner,
        }
    }
}

pub type ProductResult<T> = Result<T, ProductError>;
