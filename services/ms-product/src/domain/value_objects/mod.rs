//! 值对象模块

mod audit;
mod deletion;
mod ids;

pub use audit::AuditInfo;
pub use deletion::DeletionState;
pub use ids::{CategoryId, ProductId};
