//! 嵌入式SQLite存储实现
//!
//! 适用于单进程部署：连接时自动建库建表，启用外键约束和WAL模式。

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

use hmms_core::{DatabaseConfig, MaintenanceResult};

mod sqlite_plan_repository;
mod sqlite_user_repository;
mod sqlite_work_order_repository;

pub use sqlite_plan_repository::SqlitePlanRepository;
pub use sqlite_user_repository::SqliteUserRepository;
pub use sqlite_work_order_repository::SqliteWorkOrderRepository;

/// 创建嵌入式SQLite连接池，自动初始化数据库
pub async fn create_embedded_pool(config: &DatabaseConfig) -> MaintenanceResult<SqlitePool> {
    debug!("Creating embedded SQLite pool at: {}", config.url);

    let connect_options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
        .connect_with(connect_options)
        .await?;

    run_migrations(&pool).await?;

    debug!("Successfully created embedded SQLite pool");
    Ok(pool)
}

/// 运行数据库迁移
pub async fn run_migrations(pool: &SqlitePool) -> MaintenanceResult<()> {
    debug!("Running SQLite database migrations");

    // 维护计划表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS preventive_plans (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT,
            frequency TEXT NOT NULL,
            asset_id TEXT,
            assigned_to_id TEXT,
            next_due DATETIME NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at DATETIME NOT NULL,
            updated_at DATETIME NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 工单表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS work_orders (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT,
            priority TEXT NOT NULL DEFAULT 'MEDIUM',
            status TEXT NOT NULL DEFAULT 'PENDING',
            asset_id TEXT,
            assigned_to_id TEXT,
            created_by_id TEXT NOT NULL,
            plan_id TEXT,
            plan_due DATETIME,
            created_at DATETIME NOT NULL,
            updated_at DATETIME NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 用户表（调度核心只读写push_token）
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            push_token TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 索引。(plan_id, plan_due) 唯一索引保证同一到期时刻不会重复生成工单
    let indexes = vec![
        "CREATE INDEX IF NOT EXISTS idx_plans_is_active ON preventive_plans(is_active)",
        "CREATE INDEX IF NOT EXISTS idx_plans_next_due ON preventive_plans(next_due)",
        "CREATE INDEX IF NOT EXISTS idx_work_orders_status ON work_orders(status)",
        "CREATE INDEX IF NOT EXISTS idx_work_orders_assigned_to ON work_orders(assigned_to_id)",
        "CREATE INDEX IF NOT EXISTS idx_work_orders_created_at ON work_orders(created_at)",
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_work_orders_plan_due \
         ON work_orders(plan_id, plan_due) WHERE plan_id IS NOT NULL",
    ];

    for index_sql in indexes {
        sqlx::query(index_sql).execute(pool).await?;
    }

    debug!("Successfully completed SQLite database migrations");
    Ok(())
}
