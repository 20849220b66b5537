//! 应用层

pub mod dto;
pub mod mapper;
mod service;

pub use dto::ProductDto;
pub use service::ProductService;
