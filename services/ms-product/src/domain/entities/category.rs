//! 分类实体

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{AuditInfo, CategoryId, DeletionState};

/// 分类实体
///
/// 以名称作为自然查找键。由保存或更新商品时按需创建，本服务从不修改或删除分类。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    id: Option<CategoryId>,
    name: String,
    description: Option<String>,
    deletion: DeletionState,
    audit_info: AuditInfo,
}

impl Category {
    /// 创建未保存的分类
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description,
            deletion: DeletionState::Active,
            audit_info: AuditInfo::new(),
        }
    }

    /// 从持久化数据重建
    pub fn from_parts(
        id: CategoryId,
        name: String,
        description: Option<String>,
        deletion: DeletionState,
        audit_info: AuditInfo,
    ) -> Self {
        Self {
            id: Some(id),
            name,
            description,
            deletion,
            audit_info,
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> Option<CategoryId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn deletion(&self) -> DeletionState {
        self.deletion
    }

    pub fn is_deleted(&self) -> bool {
        self.deletion.is_deleted()
    }

    pub fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    /// 存储层分配 ID 后调用
    pub fn with_id(mut self, id: CategoryId) -> Self {
        self.id = Some(id);
        self
    }
}
