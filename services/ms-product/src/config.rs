//! 服务配置

use cuba_adapter_postgres::PostgresConfig;
use cuba_config::DatabaseConfig;
use secrecy::ExposeSecret;

/// 配置目录，可通过 `CONFIG_DIR` 覆盖
pub fn config_dir() -> String {
    std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string())
}

/// 由数据库配置构建连接池配置
pub fn postgres_config(database: &DatabaseConfig) -> PostgresConfig {
    PostgresConfig::new(database.url.expose_secret().clone())
        .with_max_connections(database.max_connections)
        .with_min_connections(database.min_connections)
        .with_connect_timeout(database.connect_timeout())
}
