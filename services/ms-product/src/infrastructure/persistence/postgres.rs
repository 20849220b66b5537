//! PostgreSQL repository implementation

use async_trait::async_trait;
use cuba_adapter_postgres::map_sqlx_error;
use cuba_errors::{AppError, AppResult};
use sqlx::PgPool;
use tracing::debug;

use crate::domain::repositories::{CategoryRepository, ProductRepository};
use crate::domain::value_objects::{CategoryId, ProductId};
use crate::domain::{Category, Product};

use super::converters::{category_from_row, product_from_row};
use super::rows::{CategoryRow, ProductRow};

const PRODUCT_SELECT: &str = r#"
    SELECT p.id, p.title, p.description, p.price, p.image,
           p.deleted, p.deleted_on, p.created_at, p.updated_at,
           c.id AS category_id, c.name AS category_name,
           c.description AS category_description, c.deleted AS category_deleted,
           c.deleted_on AS category_deleted_on, c.created_at AS category_created_at,
           c.updated_at AS category_updated_at
    FROM products p
    LEFT JOIN categories c ON c.id = p.category_id
"#;

const CATEGORY_SELECT: &str = r#"
    SELECT id, name, description, deleted, deleted_on, created_at, updated_at
    FROM categories
"#;

// ============================================================================
// ProductRepository 实现
// ============================================================================

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, product: &Product) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO products (title, description, price, image, deleted, deleted_on,
                                  category_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(product.title())
        .bind(product.description())
        .bind(product.price())
        .bind(product.image())
        .bind(product.is_deleted())
        .bind(product.deleted_on())
        .bind(category_key(product))
        .bind(product.audit_info().created_at)
        .bind(product.audit_info().updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("插入商品失败", e))
    }

    async fn update(&self, id: ProductId, product: &Product) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE products
            SET title = $2, description = $3, price = $4, image = $5,
                deleted = $6, deleted_on = $7, category_id = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id.0)
        .bind(product.title())
        .bind(product.description())
        .bind(product.price())
        .bind(product.image())
        .bind(product.is_deleted())
        .bind(product.deleted_on())
        .bind(category_key(product))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("更新商品失败", e))?
        .ok_or_else(|| AppError::not_found(format!("Product not found with id: {}", id)))
    }
}

fn category_key(product: &Product) -> Option<i64> {
    product.category().and_then(Category::id).map(|id| id.0)
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn find_all_by_deleted(&self, deleted: bool) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "{} WHERE p.deleted = $1 ORDER BY p.id",
            PRODUCT_SELECT
        ))
        .bind(deleted)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("查询商品列表失败", e))?;

        rows.into_iter().map(product_from_row).collect()
    }

    async fn find_by_id(&self, id: &ProductId) -> AppResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!("{} WHERE p.id = $1", PRODUCT_SELECT))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("查询商品失败", e))?;

        row.map(product_from_row).transpose()
    }

    async fn find_active_by_title(&self, title: &str) -> AppResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "{} WHERE p.title = $1 AND p.deleted = FALSE AND p.deleted_on IS NULL LIMIT 1",
            PRODUCT_SELECT
        ))
        .bind(title)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("按标题查询商品失败", e))?;

        row.map(product_from_row).transpose()
    }

    async fn save(&self, product: &Product) -> AppResult<Product> {
        let id = match product.id() {
            Some(id) => self.update(id, product).await?,
            None => self.insert(product).await?,
        };
        debug!(product_id = id, "Product row written");

        self.find_by_id(&ProductId(id))
            .await?
            .ok_or_else(|| AppError::internal(format!("Saved product {} could not be reloaded", id)))
    }
}

// ============================================================================
// CategoryRepository 实现
// ============================================================================

pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_name_not_deleted(&self, name: &str) -> AppResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "{} WHERE name = $1 AND deleted = FALSE ORDER BY id LIMIT 1",
            CATEGORY_SELECT
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("查询分类失败", e))?;

        row.map(category_from_row).transpose()
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "{} WHERE name = $1 ORDER BY deleted ASC, id ASC LIMIT 1",
            CATEGORY_SELECT
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("查询分类失败", e))?;

        row.map(category_from_row).transpose()
    }

    async fn save(&self, category: &Category) -> AppResult<Category> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO categories (name, description, deleted, deleted_on, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(category.name())
        .bind(category.description())
        .bind(category.is_deleted())
        .bind(category.deletion().deleted_on())
        .bind(category.audit_info().created_at)
        .bind(category.audit_info().updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("插入分类失败", e))?;

        Ok(category.clone().with_id(CategoryId(id)))
    }
}
