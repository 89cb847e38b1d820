use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    // Create pipeline versions table. Each row is one immutable version of
    // the log-pipelines element; deploy_status/deploy_result are the only
    // columns the lifecycle mutates after insert.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS pipeline_versions (
            id VARCHAR(255) PRIMARY KEY,
            version INTEGER NOT NULL UNIQUE,
            element_type VARCHAR(100) NOT NULL,
            active BOOLEAN NOT NULL DEFAULT FALSE,
            is_valid BOOLEAN NOT NULL DEFAULT FALSE,
            disabled BOOLEAN NOT NULL DEFAULT FALSE,
            deploy_status VARCHAR(50) NOT NULL,
            deploy_result TEXT NOT NULL DEFAULT '',
            last_hash VARCHAR(255) NOT NULL,
            last_conf JSONB NOT NULL,
            created_by VARCHAR(255) NOT NULL,
            created_by_name VARCHAR(255) NOT NULL DEFAULT '',
            created_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes for better query performance
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_pipeline_versions_created_at ON pipeline_versions(created_at DESC)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_pipeline_versions_deploy_status ON pipeline_versions(deploy_status)",
    )
    .execute(pool)
    .await?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}
