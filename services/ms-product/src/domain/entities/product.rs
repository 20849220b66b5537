//! 商品实体

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::entities::Category;
use crate::domain::value_objects::{AuditInfo, DeletionState, ProductId};

/// 商品实体
///
/// 标题在未删除的商品中唯一。删除只是状态变化，记录永远保留在存储中。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// 未保存时为空
    id: Option<ProductId>,
    title: String,
    description: Option<String>,
    price: Option<Decimal>,
    /// 图片地址
    image: Option<String>,
    deletion: DeletionState,
    category: Option<Category>,
    audit_info: AuditInfo,
}

impl Product {
    /// 创建未保存的商品
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        price: Option<Decimal>,
        image: Option<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            description,
            price,
            image,
            deletion: DeletionState::Active,
            category: None,
            audit_info: AuditInfo::new(),
        }
    }

    /// 从持久化数据重建
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: ProductId,
        title: String,
        description: Option<String>,
        price: Option<Decimal>,
        image: Option<String>,
        deletion: DeletionState,
        category: Option<Category>,
        audit_info: AuditInfo,
    ) -> Self {
        Self {
            id: Some(id),
            title,
            description,
            price,
            image,
            deletion,
            category,
            audit_info,
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> Option<ProductId> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price(&self) -> Option<Decimal> {
        self.price
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn deletion(&self) -> DeletionState {
        self.deletion
    }

    pub fn is_deleted(&self) -> bool {
        self.deletion.is_deleted()
    }

    pub fn deleted_on(&self) -> Option<DateTime<Utc>> {
        self.deletion.deleted_on()
    }

    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    pub fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    // ========== Setters ==========

    /// 存储层分配 ID 后调用
    pub fn with_id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn update_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.audit_info.touch();
    }

    pub fn update_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
        self.audit_info.touch();
    }

    pub fn update_price(&mut self, price: Decimal) {
        self.price = Some(price);
        self.audit_info.touch();
    }

    pub fn update_image(&mut self, image: impl Into<String>) {
        self.image = Some(image.into());
        self.audit_info.touch();
    }

    pub fn assign_category(&mut self, category: Option<Category>) {
        self.category = category;
        self.audit_info.touch();
    }

    /// 软删除
    pub fn soft_delete(&mut self, at: DateTime<Utc>) {
        if !self.is_deleted() {
            self.deletion.delete(at);
            self.audit_info.touch();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product::new(
            "Desk Lamp",
            Some("LED lamp".to_string()),
            Some(Decimal::new(2499, 2)),
            Some("https://img.example.com/lamp.png".to_string()),
        )
    }

    #[test]
    fn test_new_product_is_unsaved_and_active() {
        let product = sample();
        assert!(product.id().is_none());
        assert!(!product.is_deleted());
        assert!(product.deleted_on().is_none());
        assert!(product.category().is_none());
    }

    #[test]
    fn test_soft_delete_sets_timestamp_once() {
        let mut product = sample().with_id(ProductId(1));
        let at = Utc::now();
        product.soft_delete(at);
        assert!(product.is_deleted());
        assert_eq!(product.deleted_on(), Some(at));

        product.soft_delete(at + chrono::Duration::minutes(5));
        assert_eq!(product.deleted_on(), Some(at));
    }

    #[test]
    fn test_field_updates_leave_others_untouched() {
        let mut product = sample();
        product.update_price(Decimal::new(999, 2));
        assert_eq!(product.price(), Some(Decimal::new(999, 2)));
        assert_eq!(product.title(), "Desk Lamp");
        assert_eq!(product.description(), Some("LED lamp"));
        assert_eq!(product.image(), Some("https://img.example.com/lamp.png"));
    }
}
