//! cuba-errors - 统一错误处理
//!
//! 所有 crate 共用的 `AppError`，可转换为 RFC 7807 Problem Details。

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// 资源存在但已被软删除
    #[error("Gone: {0}")]
    Gone(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    // ========== 构造 ==========

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn gone(msg: impl Into<String>) -> Self {
        Self::Gone(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    /// 是否为完整性冲突（唯一约束、外键等）
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    fn descriptor(&self) -> (u16, &'static str, &'static str) {
        match self {
            Self::NotFound(_) => (404, "not-found", "Resource Not Found"),
            Self::Gone(_) => (410, "gone", "Resource Deleted"),
            Self::Validation(_) => (400, "validation", "Validation Error"),
            Self::Conflict(_) => (409, "conflict", "Conflict"),
            Self::Internal(_) => (500, "internal", "Internal Server Error"),
            Self::Database(_) => (500, "database", "Database Error"),
        }
    }

    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        self.descriptor().0
    }

    /// 转换为 Problem Details
    pub fn to_problem_details(&self) -> ProblemDetails {
        let (status, slug, title) = self.descriptor();
        ProblemDetails {
            r#type: format!("{PROBLEM_BASE_URI}/{slug}"),
            title: title.to_string(),
            status,
            detail: self.to_string(),
            instance: None,
        }
    }
}

const PROBLEM_BASE_URI: &str = "https://api.cuba-erp.com/problems";

/// RFC 7807 Problem Details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    pub r#type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ProblemDetails {
    /// 设置出错的资源实例
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;
