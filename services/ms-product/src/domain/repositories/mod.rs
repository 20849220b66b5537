//! 仓储接口模块

mod category_repository;
mod product_repository;

pub use category_repository::CategoryRepository;
pub use product_repository::ProductRepository;
