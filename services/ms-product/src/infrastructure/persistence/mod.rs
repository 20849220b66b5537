//! Persistence implementations

mod converters;
mod memory;
mod migrations;
mod postgres;
mod rows;

pub use memory::{InMemoryCategoryRepository, InMemoryProductRepository};
pub use migrations::migrations;
pub use postgres::{PostgresCategoryRepository, PostgresProductRepository};
