//! ms-product - 商品服务库

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::{ProductDto, ProductService};
pub use error::{ProductError, ProductResult};
