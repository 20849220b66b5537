//! 实体模块

mod category;
mod product;

pub use category::Category;
pub use product::Product;
