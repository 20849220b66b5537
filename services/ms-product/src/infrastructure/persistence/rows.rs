//! 数据库行映射结构

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// 分类数据库行
#[derive(Debug, FromRow)]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub deleted: bool,
    pub deleted_on: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 商品数据库行，分类列来自 LEFT JOIN，未关联分类时全部为空
#[derive(Debug, FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub image: Option<String>,
    pub deleted: bool,
    pub deleted_on: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub category_description: Option<String>,
    pub category_deleted: Option<bool>,
    pub category_deleted_on: Option<DateTime<Utc>>,
    pub category_created_at: Option<DateTime<Utc>>,
    pub category_updated_at: Option<DateTime<Utc>>,
}

impl ProductRow {
    /// 拆出关联的分类行
    pub fn category_row(&self) -> Option<CategoryRow> {
        Some(CategoryRow {
            id: self.category_id?,
            name: self.category_name.clone()?,
            description: self.category_description.clone(),
            deleted: self.category_deleted?,
            deleted_on: self.category_deleted_on,
            created_at: self.category_created_at?,
            updated_at: self.category_updated_at?,
        })
    }
}
