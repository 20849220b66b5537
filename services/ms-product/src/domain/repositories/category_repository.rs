//! 分类仓储接口

use async_trait::async_trait;
use cuba_errors::AppResult;

use crate::domain::entities::Category;

/// 分类仓储接口
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// 按名称查找未删除的分类
    async fn find_by_name_not_deleted(&self, name: &str) -> AppResult<Option<Category>>;

    /// 按名称查找分类，不区分删除状态（同名时优先未删除的）
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Category>>;

    /// 保存分类并返回分配了 ID 的记录
    async fn save(&self, category: &Category) -> AppResult<Category>;
}
