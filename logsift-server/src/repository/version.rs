//! Version Repository
//!
//! Handles all database operations related to pipeline versions. Rows are
//! inserted once per save; only the deploy status/result columns are updated
//! afterwards.

use logsift_core::domain::deploy::DeployStatus;
use logsift_core::domain::history::HistoryEntry;
use sqlx::PgPool;

/// Insert a new pipeline version row
pub async fn insert(pool: &PgPool, entry: &HistoryEntry) -> Result<(), sqlx::Error> {
    let conf: serde_json::Value =
        serde_json::from_str(&entry.last_conf).unwrap_or(serde_json::Value::Null);

    sqlx::query(
        r#"
        INSERT INTO pipeline_versions (
            id, version, element_type, active, is_valid, disabled,
            deploy_status, deploy_result, last_hash, last_conf,
            created_by, created_by_name, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        "#,
    )
    .bind(&entry.id)
    .bind(entry.version)
    .bind(&entry.element_type)
    .bind(entry.active)
    .bind(entry.is_valid)
    .bind(entry.disabled)
    .bind(status_to_string(entry.deploy_status))
    .bind(&entry.deploy_result)
    .bind(&entry.last_hash)
    .bind(conf)
    .bind(&entry.created_by)
    .bind(&entry.created_by_name)
    .bind(entry.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Find a version by its number
pub async fn find_by_version(
    pool: &PgPool,
    version: i32,
) -> Result<Option<HistoryEntry>, sqlx::Error> {
    let row = sqlx::query_as::<_, VersionRow>(
        r#"
        SELECT id, version, element_type, active, is_valid, disabled,
               deploy_status, deploy_result, last_hash, last_conf,
               created_by, created_by_name, created_at
        FROM pipeline_versions
        WHERE version = $1
        "#,
    )
    .bind(version)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.into()))
}

/// Find the newest version, if any was ever saved
pub async fn find_latest(pool: &PgPool) -> Result<Option<HistoryEntry>, sqlx::Error> {
    let row = sqlx::query_as::<_, VersionRow>(
        r#"
        SELECT id, version, element_type, active, is_valid, disabled,
               deploy_status, deploy_result, last_hash, last_conf,
               created_by, created_by_name, created_at
        FROM pipeline_versions
        ORDER BY version DESC
        LIMIT 1
        "#,
    )
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.into()))
}

/// List the full version ledger, newest first
pub async fn list_history(pool: &PgPool) -> Result<Vec<HistoryEntry>, sqlx::Error> {
    let rows = sqlx::query_as::<_, VersionRow>(
        r#"
        SELECT id, version, element_type, active, is_valid, disabled,
               deploy_status, deploy_result, last_hash, last_conf,
               created_by, created_by_name, created_at
        FROM pipeline_versions
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

/// Update a version's deploy status and result message
pub async fn update_deploy_status(
    pool: &PgPool,
    version: i32,
    status: DeployStatus,
    message: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE pipeline_versions
        SET deploy_status = $1, deploy_result = $2
        WHERE version = $3
        "#,
    )
    .bind(status_to_string(status))
    .bind(message)
    .bind(version)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Mark every in-flight version except the given one as superseded
pub async fn mark_superseded(pool: &PgPool, except_version: i32) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE pipeline_versions
        SET deploy_status = $1, deploy_result = $2
        WHERE deploy_status = $3 AND version <> $4
        "#,
    )
    .bind(status_to_string(DeployStatus::Dirty))
    .bind("Superseded before deployment completed")
    .bind(status_to_string(DeployStatus::InProgress))
    .bind(except_version)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

// =============================================================================
// Helper Functions
// =============================================================================

fn status_to_string(status: DeployStatus) -> &'static str {
    match status {
        DeployStatus::Deployed => "DEPLOYED",
        DeployStatus::InProgress => "IN_PROGRESS",
        DeployStatus::Dirty => "DIRTY",
        DeployStatus::Failed => "FAILED",
        DeployStatus::Unknown => "UNKNOWN",
    }
}

fn string_to_status(s: &str) -> DeployStatus {
    match s {
        "DEPLOYED" => DeployStatus::Deployed,
        "IN_PROGRESS" => DeployStatus::InProgress,
        "DIRTY" => DeployStatus::Dirty,
        "FAILED" => DeployStatus::Failed,
        _ => DeployStatus::Unknown,
    }
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct VersionRow {
    id: String,
    version: i32,
    element_type: String,
    active: bool,
    is_valid: bool,
    disabled: bool,
    deploy_status: String,
    deploy_result: String,
    last_hash: String,
    last_conf: serde_json::Value,
    created_by: String,
    created_by_name: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<VersionRow> for HistoryEntry {
    fn from(row: VersionRow) -> Self {
        let status = string_to_status(&row.deploy_status);

        HistoryEntry {
            id: row.id,
            version: row.version,
            element_type: row.element_type,
            active: row.active,
            is_valid: row.is_valid,
            disabled: row.disabled,
            deploy_status: status,
            deploy_result: row.deploy_result,
            last_hash: row.last_hash,
            last_conf: row.last_conf.to_string(),
            created_by: row.created_by,
            created_by_name: row.created_by_name,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_round_trip() {
        let statuses = [
            DeployStatus::Deployed,
            DeployStatus::InProgress,
            DeployStatus::Dirty,
            DeployStatus::Failed,
            DeployStatus::Unknown,
        ];

        for status in statuses {
            assert_eq!(string_to_status(status_to_string(status)), status);
        }
    }

    #[test]
    fn test_unrecognized_stored_status_degrades_to_unknown() {
        assert_eq!(string_to_status("ROLLING_BACK"), DeployStatus::Unknown);
        assert_eq!(string_to_status(""), DeployStatus::Unknown);
    }
}
