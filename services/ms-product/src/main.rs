//! ms-product Service - 商品目录

use std::sync::Arc;

use cuba_adapter_postgres::{MigrationManager, check_connection, create_pool};
use cuba_config::AppConfig;
use cuba_telemetry::LogFormat;
use tracing::{error, info};

use ms_product::ProductService;
use ms_product::config::{config_dir, postgres_config};
use ms_product::infrastructure::persistence::{
    PostgresCategoryRepository, PostgresProductRepository, migrations,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load(&config_dir())?;
    cuba_telemetry::init(
        &config.telemetry.log_level,
        LogFormat::from_json_flag(config.telemetry.json || config.is_production()),
    )?;

    info!(app = %config.app_name, env = config.app_env.as_str(), "Initializing ms-product Service...");

    let pool = create_pool(&postgres_config(&config.database)).await?;
    check_connection(&pool).await?;

    let result = MigrationManager::new(pool.clone())
        .migrate(&migrations())
        .await?;
    for failure in &result.errors {
        error!(
            version = failure.version,
            name = %failure.name,
            error = %failure.error,
            "Migration failed"
        );
    }
    if !result.is_success() {
        return Err("database migration failed".into());
    }
    info!(
        applied = result.applied_count(),
        skipped = result.skipped.len(),
        "Migrations complete"
    );

    let product_repo = Arc::new(PostgresProductRepository::new(pool.clone()));
    let category_repo = Arc::new(PostgresCategoryRepository::new(pool));
    info!("Repositories initialized");

    let service = ProductService::new(product_repo, category_repo);

    let active = service.find_all_products(false).await?;
    let deleted = service.find_all_products(true).await?;
    info!(
        active = active.len(),
        deleted = deleted.len(),
        "ms-product Service ready"
    );

    Ok(())
}
