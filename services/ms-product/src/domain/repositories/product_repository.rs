//! 商品仓储接口

use async_trait::async_trait;
use cuba_errors::AppResult;

use crate::domain::entities::Product;
use crate::domain::value_objects::ProductId;

/// 商品仓储接口
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// 按删除标志查询全部商品
    async fn find_all_by_deleted(&self, deleted: bool) -> AppResult<Vec<Product>>;

    /// 根据 ID 查找商品（包括已删除的）
    async fn find_by_id(&self, id: &ProductId) -> AppResult<Option<Product>>;

    /// 按标题查找未删除且无删除时间的商品
    async fn find_active_by_title(&self, title: &str) -> AppResult<Option<Product>>;

    /// 保存商品：无 ID 时插入，否则更新
    ///
    /// 返回持久化后的记录。违反完整性约束时返回 `AppError::Conflict`。
    async fn save(&self, product: &Product) -> AppResult<Product>;
}
