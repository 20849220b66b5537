//! Product business logic

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::application::dto::ProductDto;
use crate::application::mapper;
use crate::domain::{Category, CategoryRepository, Product, ProductId, ProductRepository};
use crate::error::{ProductError, ProductResult};

/// 商品服务
///
/// 无状态门面，每次调用都从仓储读取最新状态。
pub struct ProductService {
    product_repo: Arc<dyn ProductRepository>,
    category_repo: Arc<dyn CategoryRepository>,
}

impl ProductService {
    pub fn new(
        product_repo: Arc<dyn ProductRepository>,
        category_repo: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            product_repo,
            category_repo,
        }
    }

    // ========== 查询 ==========

    /// 按删除标志列出全部商品
    pub async fn find_all_products(&self, deleted: bool) -> ProductResult<Vec<ProductDto>> {
        let products = self.product_repo.find_all_by_deleted(deleted).await?;

        info!(count = products.len(), deleted, "Found products");
        Ok(products.iter().map(mapper::to_dto).collect())
    }

    /// 根据 ID 获取商品，已删除的商品视为错误
    pub async fn find_product_by_id(&self, id: &ProductId) -> ProductResult<ProductDto> {
        let product = self.product_repo.find_by_id(id).await?;

        match product {
            Some(p) if p.is_deleted() => {
                error!(product_id = %id, "Product is already deleted");
                Err(ProductError::AlreadyDeleted(*id))
            }
            Some(p) => {
                info!(product_id = %id, "Product found");
                Ok(mapper::to_dto(&p))
            }
            None => {
                error!(product_id = %id, "Product not found");
                Err(ProductError::NotFound(*id))
            }
        }
    }

    // ========== 写入 ==========

    /// 创建商品，分类不存在时按需创建
    pub async fn save_product(&self, dto: &ProductDto) -> ProductResult<ProductDto> {
        dto.validate_for_create()?;
        self.ensure_title_available(dto).await?;

        let resolved = match dto.category.as_deref() {
            Some(name) => {
                debug!(category = name, "Resolving category before saving");
                let existing = self.category_repo.find_by_name_not_deleted(name).await?;
                Some((name, existing))
            }
            None => None,
        };

        let mut product = mapper::to_entity(dto);

        match resolved {
            Some((name, existing)) => {
                self.attach_category(dto, name, existing, &mut product).await?
            }
            None => product.assign_category(None),
        }

        let saved = self.product_repo.save(&product).await?;

        metrics::counter!("ms_product_products_created_total").increment(1);
        info!(product_id = ?saved.id(), title = saved.title(), "Product saved");
        Ok(mapper::to_dto(&saved))
    }

    /// 部分更新商品：只覆盖 DTO 中有值的字段
    ///
    /// 前置条件按优先级检查：商品不存在、商品已删除、请求为空。
    pub async fn update_product(
        &self,
        id: &ProductId,
        dto: Option<&ProductDto>,
    ) -> ProductResult<ProductDto> {
        let existing = self.product_repo.find_by_id(id).await?;

        let (dto, mut product) = match (dto, existing) {
            (_, None) => {
                error!(product_id = %id, "Product not found for update");
                return Err(ProductError::NotFound(*id));
            }
            (_, Some(p)) if p.is_deleted() => {
                error!(product_id = %id, "Cannot update a deleted product");
                return Err(ProductError::AlreadyDeleted(*id));
            }
            (None, Some(_)) => {
                warn!(product_id = %id, "Update request without payload");
                return Err(ProductError::UpdateFailed(
                    "Updating product failed! Please contact the system administrator.".to_string(),
                ));
            }
            (Some(dto), Some(p)) => (dto, p),
        };

        debug!(product_id = %id, "Applying product patch");
        if let Some(title) = &dto.title {
            product.update_title(title.clone());
        }
        if let Some(description) = &dto.description {
            product.update_description(description.clone());
        }
        if let Some(price) = dto.price {
            product.update_price(price);
        }
        if let Some(image) = &dto.image {
            product.update_image(image.clone());
        }
        if let Some(name) = dto.category.as_deref() {
            // 不过滤已删除的分类
            let category = self.category_repo.find_by_name(name).await?;
            self.attach_category(dto, name, category, &mut product).await?;
        }

        let saved = self.product_repo.save(&product).await?;

        metrics::counter!("ms_product_products_updated_total").increment(1);
        info!(product_id = %id, "Product updated");
        Ok(mapper::to_dto(&saved))
    }

    /// 软删除商品
    pub async fn delete_product(&self, id: &ProductId) -> ProductResult<()> {
        let mut product = self
            .product_repo
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(*id))?;

        if product.is_deleted() {
            error!(product_id = %id, "Product is already deleted");
            return Err(ProductError::AlreadyDeleted(*id));
        }

        product.soft_delete(Utc::now());

        let deleted = match self.product_repo.save(&product).await {
            Ok(p) => p,
            Err(e) if e.is_conflict() => {
                error!(product_id = %id, error = %e, "Integrity conflict while deleting product");
                return Err(ProductError::AlreadyExists(format!(
                    "Product with id {} already exists in deleted state",
                    id
                )));
            }
            Err(e) => return Err(e.into()),
        };

        if !deleted.is_deleted() {
            error!(product_id = %id, "Store did not persist the deletion");
            return Err(ProductError::UpdateFailed(
                "Deleting product failed! Please contact the system administrator.".to_string(),
            ));
        }

        metrics::counter!("ms_product_products_deleted_total").increment(1);
        info!(product_id = %id, "Product deleted");
        Ok(())
    }

    // ========== 内部 ==========

    async fn ensure_title_available(&self, dto: &ProductDto) -> ProductResult<()> {
        let title = dto.title.as_deref().unwrap_or_default();
        if self.product_repo.find_active_by_title(title).await?.is_some() {
            error!(title, "Product with the same title already exists");
            return Err(ProductError::AlreadyExists(format!(
                "Product with title '{}' already exists.",
                title
            )));
        }
        Ok(())
    }

    /// 绑定已有分类，不存在时以商品描述创建新分类
    async fn attach_category(
        &self,
        dto: &ProductDto,
        name: &str,
        existing: Option<Category>,
        product: &mut Product,
    ) -> ProductResult<()> {
        let category = match existing {
            Some(category) => {
                info!(category = name, "Category found, attaching existing category");
                category
            }
            None => {
                info!(category = name, "Category not found, creating new category");
                let created = self
                    .category_repo
                    .save(&Category::new(name, dto.description.clone()))
                    .await?;
                metrics::counter!("ms_product_categories_created_total").increment(1);
                created
            }
        };
        product.assign_category(Some(category));
        Ok(())
    }
}
