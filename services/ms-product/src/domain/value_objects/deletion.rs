//! 软删除状态
//!
//! `deleted` 标志与 `deleted_on` 时间戳由同一个值推导，
//! 保证 `deleted_on` 非空当且仅当 `deleted` 为真。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 软删除状态，只允许 `Active -> Deleted` 单向转换
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeletionState {
    #[default]
    Active,
    Deleted { on: DateTime<Utc> },
}

impl DeletionState {
    /// 从持久化的两列重建状态，两列不一致时返回 `None`
    pub fn from_parts(deleted: bool, deleted_on: Option<DateTime<Utc>>) -> Option<Self> {
        match (deleted, deleted_on) {
            (false, None) => Some(Self::Active),
            (true, Some(on)) => Some(Self::Deleted { on }),
            _ => None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted { .. })
    }

    pub fn deleted_on(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Active => None,
            Self::Deleted { on } => Some(*on),
        }
    }

    /// 标记为已删除；已删除时保留原时间戳
    pub fn delete(&mut self, at: DateTime<Utc>) {
        if let Self::Active = self {
            *self = Self::Deleted { on: at };
        }
    }
}
