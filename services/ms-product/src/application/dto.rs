//! 商品传输对象

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ProductId;
use crate::error::{ProductError, ProductResult};

const MAX_TITLE_LEN: usize = 255;

/// 商品 DTO
///
/// 与 `Product` 的标量字段相同，分类展平为名称。内容字段均为可选，
/// 同一结构既用于创建请求，也用于部分更新请求（`None` 表示不修改）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub image: Option<String>,
    #[serde(default)]
    pub deleted: bool,
    pub deleted_on: Option<DateTime<Utc>>,
    /// 分类名称
    pub category: Option<String>,
}

impl ProductDto {
    /// 创建请求的校验
    pub fn validate_for_create(&self) -> ProductResult<()> {
        let title = self
            .title
            .as_deref()
            .ok_or_else(|| ProductError::InvalidInput("title is required".to_string()))?;
        if title.trim().is_empty() {
            return Err(ProductError::InvalidInput("title must not be blank".to_string()));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(ProductError::InvalidInput(format!(
                "title must not exceed {} characters",
                MAX_TITLE_LEN
            )));
        }
        Ok(())
    }
}
