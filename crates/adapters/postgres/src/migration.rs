//! 表结构迁移
//!
//! 每个迁移以版本号标识，执行后写入 `schema_history` 表。
//! 历史中保存 SQL 的 SHA-256，已执行的迁移被改动时拒绝继续。

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use cuba_errors::AppResult;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use tracing::{debug, info, warn};

use crate::error::map_sqlx_error;

const DEFAULT_HISTORY_TABLE: &str = "schema_history";

/// 一个版本化的 DDL 脚本
#[derive(Debug, Clone)]
pub struct Migration {
    pub version: i64,
    pub name: String,
    /// 可包含多条语句
    pub up_sql: String,
    pub checksum: String,
}

impl Migration {
    pub fn new(version: i64, name: impl Into<String>, up_sql: impl Into<String>) -> Self {
        let up_sql = up_sql.into();
        Self {
            version,
            name: name.into(),
            checksum: hex::encode(Sha256::digest(up_sql.as_bytes())),
            up_sql,
        }
    }
}

/// 历史表中的一行
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AppliedMigration {
    pub version: i64,
    pub name: String,
    pub checksum: String,
    pub applied_at: DateTime<Utc>,
}

/// 单个迁移相对于历史记录的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationStatus {
    Pending,
    Applied,
    /// 已执行过，但脚本内容与历史中的校验和不一致
    Modified,
}

/// 对照历史记录给每个迁移定级，按版本升序返回
pub fn classify<'a>(
    migrations: &'a [Migration],
    history: &BTreeMap<i64, String>,
) -> Vec<(&'a Migration, MigrationStatus)> {
    let mut planned: Vec<_> = migrations
        .iter()
        .map(|m| {
            let status = match history.get(&m.version) {
                None => MigrationStatus::Pending,
                Some(checksum) if *checksum == m.checksum => MigrationStatus::Applied,
                Some(_) => MigrationStatus::Modified,
            };
            (m, status)
        })
        .collect();
    planned.sort_by_key(|(m, _)| m.version);
    planned
}

/// 迁移执行器
pub struct MigrationManager {
    pool: PgPool,
    history_table: String,
}

impl MigrationManager {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            history_table: DEFAULT_HISTORY_TABLE.to_string(),
        }
    }

    pub fn with_table_name(mut self, name: impl Into<String>) -> Self {
        self.history_table = name.into();
        self
    }

    async fn ensure_history_table(&self) -> AppResult<()> {
        let ddl = format!(
            "CREATE TABLE IF NOT EXISTS {} (
                version    BIGINT PRIMARY KEY,
                name       TEXT NOT NULL,
                checksum   CHAR(64) NOT NULL,
                applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )",
            self.history_table
        );
        sqlx::query(&ddl)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("创建迁移历史表失败", e))?;
        Ok(())
    }

    /// 读取已执行的迁移
    pub async fn history(&self) -> AppResult<Vec<AppliedMigration>> {
        let sql = format!(
            "SELECT version, name, checksum, applied_at FROM {} ORDER BY version",
            self.history_table
        );
        sqlx::query_as::<_, AppliedMigration>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("读取迁移历史失败", e))
    }

    /// 在一个事务中执行脚本并写入历史
    async fn apply(&self, migration: &Migration) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("开启迁移事务失败", e))?;

        sqlx::raw_sql(&migration.up_sql)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error(&format!("执行迁移 {} 失败", migration.version), e))?;

        sqlx::query(&format!(
            "INSERT INTO {} (version, name, checksum) VALUES ($1, $2, $3)",
            self.history_table
        ))
        .bind(migration.version)
        .bind(&migration.name)
        .bind(&migration.checksum)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("写入迁移历史失败", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("提交迁移事务失败", e))
    }

    /// 执行全部待处理的迁移
    ///
    /// 任何已执行的迁移被改动时不执行新迁移；执行失败时停在该版本。
    pub async fn migrate(&self, migrations: &[Migration]) -> AppResult<MigrationResult> {
        self.ensure_history_table().await?;

        let history: BTreeMap<i64, String> = self
            .history()
            .await?
            .into_iter()
            .map(|row| (row.version, row.checksum))
            .collect();
        let planned = classify(migrations, &history);

        let mut result = MigrationResult::default();
        for (migration, _) in planned
            .iter()
            .filter(|(_, status)| *status == MigrationStatus::Modified)
        {
            warn!(version = migration.version, name = %migration.name, "Applied migration was modified");
            result.errors.push(MigrationError::new(
                migration,
                "checksum differs from schema history",
            ));
        }
        if !result.errors.is_empty() {
            return Ok(result);
        }

        for (migration, status) in planned {
            if status == MigrationStatus::Applied {
                debug!(version = migration.version, "Migration already applied");
                result.skipped.push(migration.version);
                continue;
            }
            match self.apply(migration).await {
                Ok(()) => {
                    info!(version = migration.version, name = %migration.name, "Migration applied");
                    result.applied.push(migration.version);
                }
                Err(e) => {
                    result.errors.push(MigrationError::new(migration, e.to_string()));
                    break;
                }
            }
        }

        Ok(result)
    }
}

/// 一次迁移运行的结果
#[derive(Debug, Clone, Default)]
pub struct MigrationResult {
    pub applied: Vec<i64>,
    pub skipped: Vec<i64>,
    pub errors: Vec<MigrationError>,
}

impl MigrationResult {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }
}

#[derive(Debug, Clone)]
pub struct MigrationError {
    pub version: i64,
    pub name: String,
    pub error: String,
}

impl MigrationError {
    fn new(migration: &Migration, error: impl Into<String>) -> Self {
        Self {
            version: migration.version,
            name: migration.name.clone(),
            error: error.into(),
        }
    }
}
