//! 内存仓储实现
//!
//! 与 PostgreSQL 实现遵循相同的约束：商品的 (title, deleted) 组合唯一，
//! ID 由存储按顺序分配。用于测试与本地运行。

use std::collections::BTreeMap;

use async_trait::async_trait;
use cuba_errors::{AppError, AppResult};
use tokio::sync::RwLock;

use crate::domain::repositories::{CategoryRepository, ProductRepository};
use crate::domain::value_objects::{CategoryId, ProductId};
use crate::domain::{Category, Product};

struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn allocate(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

// ========== 商品 ==========

#[derive(Default)]
pub struct InMemoryProductRepository {
    table: RwLock<Table<Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前存储的记录数，包括已删除的
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all_by_deleted(&self, deleted: bool) -> AppResult<Vec<Product>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|p| p.is_deleted() == deleted)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &ProductId) -> AppResult<Option<Product>> {
        Ok(self.table.read().await.rows.get(&id.0).cloned())
    }

    async fn find_active_by_title(&self, title: &str) -> AppResult<Option<Product>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .find(|p| p.title() == title && !p.is_deleted() && p.deleted_on().is_none())
            .cloned())
    }

    async fn save(&self, product: &Product) -> AppResult<Product> {
        let mut table = self.table.write().await;

        let duplicate = table.rows.values().any(|other| {
            other.id() != product.id()
                && other.title() == product.title()
                && other.is_deleted() == product.is_deleted()
        });
        if duplicate {
            return Err(AppError::conflict(format!(
                "integrity constraint 'products_title_deleted_key' violated for title '{}'",
                product.title()
            )));
        }

        let id = match product.id() {
            Some(id) if table.rows.contains_key(&id.0) => id.0,
            Some(id) => {
                return Err(AppError::not_found(format!(
                    "Product not found with id: {}",
                    id
                )));
            }
            None => table.allocate(),
        };

        let saved = product.clone().with_id(ProductId(id));
        table.rows.insert(id, saved.clone());
        Ok(saved)
    }
}

// ========== 分类 ==========

#[derive(Default)]
pub struct InMemoryCategoryRepository {
    table: RwLock<Table<Category>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 全部分类，按 ID 排序
    pub async fn all(&self) -> Vec<Category> {
        self.table.read().await.rows.values().cloned().collect()
    }

    /// 直接写入一条分类记录，保留其删除状态
    pub async fn insert(&self, category: Category) -> Category {
        let mut table = self.table.write().await;
        let id = table.allocate();
        let stored = category.with_id(CategoryId(id));
        table.rows.insert(id, stored.clone());
        stored
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_by_name_not_deleted(&self, name: &str) -> AppResult<Option<Category>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .find(|c| c.name() == name && !c.is_deleted())
            .cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Category>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|c| c.name() == name)
            .min_by_key(|c| c.is_deleted())
            .cloned())
    }

    async fn save(&self, category: &Category) -> AppResult<Category> {
        Ok(self.insert(category.clone()).await)
    }
}
