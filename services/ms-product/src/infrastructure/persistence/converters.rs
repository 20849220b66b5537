//! 数据库行到领域对象的转换

use cuba_errors::{AppError, AppResult};

use crate::domain::value_objects::{AuditInfo, CategoryId, DeletionState, ProductId};
use crate::domain::{Category, Product};

use super::rows::{CategoryRow, ProductRow};

fn deletion_from_row(
    entity: &str,
    id: i64,
    deleted: bool,
    deleted_on: Option<chrono::DateTime<chrono::Utc>>,
) -> AppResult<DeletionState> {
    DeletionState::from_parts(deleted, deleted_on).ok_or_else(|| {
        AppError::internal(format!(
            "{} {} 的删除标志与删除时间不一致",
            entity, id
        ))
    })
}

/// 将 CategoryRow 转换为 Category
pub fn category_from_row(row: CategoryRow) -> AppResult<Category> {
    let deletion = deletion_from_row("分类", row.id, row.deleted, row.deleted_on)?;

    Ok(Category::from_parts(
        CategoryId(row.id),
        row.name,
        row.description,
        deletion,
        AuditInfo {
            created_at: row.created_at,
            updated_at: row.updated_at,
        },
    ))
}

/// 将 ProductRow 转换为 Product
pub fn product_from_row(row: ProductRow) -> AppResult<Product> {
    let category = row.category_row().map(category_from_row).transpose()?;
    let deletion = deletion_from_row("商品", row.id, row.deleted, row.deleted_on)?;

    Ok(Product::from_parts(
        ProductId(row.id),
        row.title,
        row.description,
        row.price,
        row.image,
        deletion,
        category,
        AuditInfo {
            created_at: row.created_at,
            updated_at: row.updated_at,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn product_row() -> ProductRow {
        let now = Utc::now();
        ProductRow {
            id: 7,
            title: "Lamp".to_string(),
            description: Some("Desk lamp".to_string()),
            price: Some(Decimal::new(1999, 2)),
            image: None,
            deleted: false,
            deleted_on: None,
            created_at: now,
            updated_at: now,
            category_id: None,
            category_name: None,
            category_description: None,
            category_deleted: None,
            category_deleted_on: None,
            category_created_at: None,
            category_updated_at: None,
        }
    }

    #[test]
    fn test_product_without_category() {
        let product = product_from_row(product_row()).unwrap();
        assert_eq!(product.id(), Some(ProductId(7)));
        assert_eq!(product.price(), Some(Decimal::new(1999, 2)));
        assert!(product.category().is_none());
        assert!(!product.is_deleted());
    }

    #[test]
    fn test_product_with_joined_category() {
        let now = Utc::now();
        let row = ProductRow {
            category_id: Some(3),
            category_name: Some("Lighting".to_string()),
            category_deleted: Some(false),
            category_created_at: Some(now),
            category_updated_at: Some(now),
            ..product_row()
        };

        let product = product_from_row(row).unwrap();
        let category = product.category().unwrap();
        assert_eq!(category.id(), Some(CategoryId(3)));
        assert_eq!(category.name(), "Lighting");
    }

    #[test]
    fn test_inconsistent_deletion_is_rejected() {
        let row = ProductRow {
            deleted: true,
            deleted_on: None,
            ..product_row()
        };

        let err = product_from_row(row).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
