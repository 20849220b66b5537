//! 数据库表结构迁移

use cuba_adapter_postgres::Migration;

const CREATE_CATEGORIES: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id          BIGSERIAL PRIMARY KEY,
    name        VARCHAR(255) NOT NULL,
    description TEXT,
    deleted     BOOLEAN NOT NULL DEFAULT FALSE,
    deleted_on  TIMESTAMPTZ,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT categories_deleted_on_check CHECK (deleted = (deleted_on IS NOT NULL))
);

CREATE INDEX IF NOT EXISTS idx_categories_name ON categories (name);
"#;

const CREATE_PRODUCTS: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id          BIGSERIAL PRIMARY KEY,
    title       VARCHAR(255) NOT NULL,
    description TEXT,
    price       NUMERIC(12, 2),
    image       TEXT,
    deleted     BOOLEAN NOT NULL DEFAULT FALSE,
    deleted_on  TIMESTAMPTZ,
    category_id BIGINT REFERENCES categories (id),
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT products_title_deleted_key UNIQUE (title, deleted),
    CONSTRAINT products_deleted_on_check CHECK (deleted = (deleted_on IS NOT NULL))
);

CREATE INDEX IF NOT EXISTS idx_products_deleted ON products (deleted);
"#;

/// 按版本排列的全部迁移
pub fn migrations() -> Vec<Migration> {
    vec![
        Migration::new(1, "create_categories", CREATE_CATEGORIES),
        Migration::new(2, "create_products", CREATE_PRODUCTS),
    ]
}
