//! Pipeline Service
//!
//! Business logic for pipeline versioning and the deploy lifecycle.

use std::collections::HashSet;

use logsift_core::domain::deploy::DeployStatus;
use logsift_core::domain::history::{ELEMENT_TYPE_LOG_PIPELINES, HistoryEntry, conf_hash};
use logsift_core::domain::operation::OperationKind;
use logsift_core::domain::pipeline::Pipeline;
use logsift_core::domain::stage::Stage;
use logsift_core::dto::deploy::DeployStatusUpdate;
use logsift_core::dto::pipeline::{PostableStage, SavePipelines, VersionSummary};
use sqlx::PgPool;
use uuid::Uuid;

use crate::repository::version_repository;

/// Service error type
#[derive(Debug)]
pub enum PipelineError {
    NotFound(i32),
    NoVersions,
    ValidationError(String),
    CorruptConf(serde_json::Error),
    DatabaseError(sqlx::Error),
}

impl From<sqlx::Error> for PipelineError {
    fn from(err: sqlx::Error) -> Self {
        PipelineError::DatabaseError(err)
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Save a new pipeline version
///
/// Assigns the next version number, mints stage identities, and inserts an
/// immutable version row with deploy status DIRTY (saved but not deployed).
pub async fn save_pipelines(pool: &PgPool, req: SavePipelines) -> Result<Pipeline> {
    // Validate request
    validate_save_request(&req)?;

    let latest = version_repository::find_latest(pool).await?;
    let version = latest.map(|e| e.version + 1).unwrap_or(1);
    let now = chrono::Utc::now();

    let created_by = req.created_by.clone();
    let stages: Vec<Stage> = req
        .stages
        .into_iter()
        .map(|s| assign_stage_identity(s, &created_by, now))
        .collect();

    let entry = HistoryEntry {
        id: Uuid::new_v4().to_string(),
        version,
        element_type: ELEMENT_TYPE_LOG_PIPELINES.to_string(),
        active: stages.iter().any(|s| s.enabled),
        is_valid: true,
        disabled: false,
        deploy_status: DeployStatus::Dirty,
        deploy_result: String::new(),
        last_hash: conf_hash(ELEMENT_TYPE_LOG_PIPELINES, version),
        last_conf: serde_json::to_string(&stages).unwrap(),
        created_by: req.created_by,
        created_by_name: req.created_by_name,
        created_at: now,
    };

    version_repository::insert(pool, &entry).await?;

    tracing::info!(
        "Pipeline version {} saved by {} ({} stage(s))",
        version,
        entry.created_by,
        stages.len()
    );

    materialize(pool, entry).await
}

/// Get the newest pipeline version as a full definition
pub async fn latest_pipeline(pool: &PgPool) -> Result<Pipeline> {
    let entry = version_repository::find_latest(pool)
        .await?
        .ok_or(PipelineError::NoVersions)?;

    materialize(pool, entry).await
}

/// Get a specific pipeline version as a full definition
pub async fn get_pipeline(pool: &PgPool, version: i32) -> Result<Pipeline> {
    let entry = version_repository::find_by_version(pool, version)
        .await?
        .ok_or(PipelineError::NotFound(version))?;

    materialize(pool, entry).await
}

/// The full version ledger, newest first
///
/// An empty ledger is a valid empty list, not an error.
pub async fn history(pool: &PgPool) -> Result<Vec<HistoryEntry>> {
    let entries = version_repository::list_history(pool).await?;
    Ok(entries)
}

/// Lightweight version summaries for listing, newest first
pub async fn list_versions(pool: &PgPool) -> Result<Vec<VersionSummary>> {
    let entries = version_repository::list_history(pool).await?;
    Ok(entries.into_iter().map(|e| e.into()).collect())
}

/// Start deploying a version
///
/// Any other version still in flight is marked DIRTY (superseded), then the
/// target transitions to IN_PROGRESS.
pub async fn deploy(pool: &PgPool, version: i32) -> Result<HistoryEntry> {
    let _entry = version_repository::find_by_version(pool, version)
        .await?
        .ok_or(PipelineError::NotFound(version))?;

    let superseded = version_repository::mark_superseded(pool, version).await?;
    if superseded > 0 {
        tracing::warn!(
            "{} in-flight version(s) superseded by deploy of version {}",
            superseded,
            version
        );
    }

    version_repository::update_deploy_status(
        pool,
        version,
        DeployStatus::InProgress,
        "Deployment is in progress",
    )
    .await?;

    tracing::info!("Deployment of pipeline version {} started", version);

    // Return updated entry
    version_repository::find_by_version(pool, version)
        .await?
        .ok_or(PipelineError::NotFound(version))
}

/// Record the outcome of a deployment attempt
///
/// Reported by the deployment agent once the collector config has been
/// applied (or failed to apply).
pub async fn complete_deploy(
    pool: &PgPool,
    version: i32,
    update: DeployStatusUpdate,
) -> Result<HistoryEntry> {
    let entry = version_repository::find_by_version(pool, version)
        .await?
        .ok_or(PipelineError::NotFound(version))?;

    // Tolerate out-of-order agent reports
    if entry.deploy_status != DeployStatus::InProgress {
        tracing::warn!(
            "Completing deploy for version {} that is not in progress (current: {:?})",
            version,
            entry.deploy_status
        );
    }

    let (status, default_message) = if update.success {
        (DeployStatus::Deployed, "Deployment was successful")
    } else {
        (DeployStatus::Failed, "Deployment failed")
    };

    let message = if update.message.is_empty() {
        default_message.to_string()
    } else {
        update.message
    };

    version_repository::update_deploy_status(pool, version, status, &message).await?;

    tracing::info!(
        "Deployment of pipeline version {} completed with status {:?}",
        version,
        status
    );

    version_repository::find_by_version(pool, version)
        .await?
        .ok_or(PipelineError::NotFound(version))
}

/// Materialize a version row into a full pipeline definition
///
/// Decodes the stored stage configuration and embeds the complete history
/// ledger.
async fn materialize(pool: &PgPool, entry: HistoryEntry) -> Result<Pipeline> {
    let stages: Vec<Stage> =
        serde_json::from_str(&entry.last_conf).map_err(PipelineError::CorruptConf)?;

    let history = version_repository::list_history(pool).await?;

    Ok(Pipeline {
        id: entry.id,
        version: entry.version,
        element_type: entry.element_type,
        active: entry.active,
        is_valid: entry.is_valid,
        disabled: entry.disabled,
        deploy_status: entry.deploy_status,
        deploy_result: entry.deploy_result,
        last_hash: entry.last_hash,
        last_conf: entry.last_conf,
        created_by: entry.created_by,
        pipelines: stages,
        history,
    })
}

fn assign_stage_identity(
    posted: PostableStage,
    created_by: &str,
    now: chrono::DateTime<chrono::Utc>,
) -> Stage {
    Stage {
        id: Uuid::new_v4().to_string(),
        order_id: posted.order_id,
        name: posted.name,
        alias: posted.alias,
        description: posted.description,
        enabled: posted.enabled,
        filter: posted.filter,
        config: posted.config,
        created_by: created_by.to_string(),
        created_at: now,
    }
}

// =============================================================================
// Validation
// =============================================================================

fn validate_save_request(req: &SavePipelines) -> Result<()> {
    if req.created_by.trim().is_empty() {
        return Err(PipelineError::ValidationError(
            "createdBy cannot be empty".to_string(),
        ));
    }

    let mut aliases = HashSet::new();

    for (i, stage) in req.stages.iter().enumerate() {
        if stage.name.trim().is_empty() {
            return Err(PipelineError::ValidationError(format!(
                "Stage {} has an empty name",
                i + 1
            )));
        }

        if stage.alias.trim().is_empty() {
            return Err(PipelineError::ValidationError(format!(
                "Stage '{}' has an empty alias",
                stage.name
            )));
        }

        if !aliases.insert(stage.alias.clone()) {
            return Err(PipelineError::ValidationError(format!(
                "Duplicate stage alias '{}'",
                stage.alias
            )));
        }

        // Stage order must be 1-based and contiguous.
        let expected = i as i32 + 1;
        if stage.order_id != expected {
            return Err(PipelineError::ValidationError(format!(
                "Stage '{}' has orderId {} but position {} (order must be contiguous from 1)",
                stage.alias, stage.order_id, expected
            )));
        }

        validate_stage_config(stage)?;
    }

    Ok(())
}

fn validate_stage_config(stage: &PostableStage) -> Result<()> {
    let op_ids: Vec<&str> = stage.config.iter().map(|op| op.id.as_str()).collect();

    for (i, op) in stage.config.iter().enumerate() {
        let expected = i as i32 + 1;
        if op.order_id != expected {
            return Err(PipelineError::ValidationError(format!(
                "Operation '{}' in stage '{}' has orderId {} but position {}",
                op.name, stage.alias, op.order_id, expected
            )));
        }

        // An output must reference a later operation in the same chain.
        if let Some(output) = &op.output {
            let points_forward = op_ids[i + 1..].contains(&output.as_str());
            if !points_forward {
                return Err(PipelineError::ValidationError(format!(
                    "Operation '{}' in stage '{}' outputs to unknown or earlier operation '{}'",
                    op.name, stage.alias, output
                )));
            }
        }

        match &op.kind {
            OperationKind::RegexParser { regex, .. } if regex.trim().is_empty() => {
                return Err(PipelineError::ValidationError(format!(
                    "Regex operation '{}' in stage '{}' has an empty pattern",
                    op.name, stage.alias
                )));
            }
            OperationKind::GrokParser { pattern, .. } if pattern.trim().is_empty() => {
                return Err(PipelineError::ValidationError(format!(
                    "Grok operation '{}' in stage '{}' has an empty pattern",
                    op.name, stage.alias
                )));
            }
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use logsift_core::domain::filter::FilterSet;
    use logsift_core::domain::operation::{OnError, Operation};

    fn regex_operation(order_id: i32, id: &str, output: Option<&str>, regex: &str) -> Operation {
        Operation {
            id: id.to_string(),
            output: output.map(|s| s.to_string()),
            order_id,
            enabled: true,
            name: format!("op {}", id),
            kind: OperationKind::RegexParser {
                regex: regex.to_string(),
                parse_from: "body".to_string(),
                parse_to: "attributes".to_string(),
                on_error: OnError::Send,
            },
        }
    }

    fn postable_stage(order_id: i32, alias: &str, config: Vec<Operation>) -> PostableStage {
        PostableStage {
            order_id,
            name: format!("stage {}", alias),
            alias: alias.to_string(),
            description: String::new(),
            enabled: true,
            filter: FilterSet::match_all(),
            config,
        }
    }

    fn save_request(stages: Vec<PostableStage>) -> SavePipelines {
        SavePipelines {
            stages,
            created_by: "user-1".to_string(),
            created_by_name: "Test User".to_string(),
        }
    }

    #[test]
    fn test_validate_valid_request() {
        let ops = vec![
            regex_operation(1, "a", Some("b"), ".+"),
            regex_operation(2, "b", None, ".*"),
        ];
        let req = save_request(vec![
            postable_stage(1, "first", ops),
            postable_stage(2, "second", vec![]),
        ]);

        assert!(validate_save_request(&req).is_ok());
    }

    #[test]
    fn test_validate_empty_stage_list_is_ok() {
        // Saving with no stages is a valid way to clear the element.
        let req = save_request(vec![]);
        assert!(validate_save_request(&req).is_ok());
    }

    #[test]
    fn test_validate_empty_name() {
        let mut stage = postable_stage(1, "first", vec![]);
        stage.name = String::new();
        let req = save_request(vec![stage]);

        let result = validate_save_request(&req);
        assert!(matches!(result, Err(PipelineError::ValidationError(_))));
    }

    #[test]
    fn test_validate_duplicate_alias() {
        let req = save_request(vec![
            postable_stage(1, "same", vec![]),
            postable_stage(2, "same", vec![]),
        ]);

        let result = validate_save_request(&req);
        assert!(matches!(result, Err(PipelineError::ValidationError(_))));
    }

    #[test]
    fn test_validate_stage_order_gap() {
        let req = save_request(vec![
            postable_stage(1, "first", vec![]),
            postable_stage(3, "third", vec![]),
        ]);

        let result = validate_save_request(&req);
        assert!(matches!(result, Err(PipelineError::ValidationError(_))));
    }

    #[test]
    fn test_validate_operation_order_must_start_at_one() {
        let ops = vec![regex_operation(2, "a", None, ".+")];
        let req = save_request(vec![postable_stage(1, "first", ops)]);

        let result = validate_save_request(&req);
        assert!(matches!(result, Err(PipelineError::ValidationError(_))));
    }

    #[test]
    fn test_validate_output_must_point_forward() {
        // "b" points back to "a": invalid chain.
        let ops = vec![
            regex_operation(1, "a", Some("b"), ".+"),
            regex_operation(2, "b", Some("a"), ".*"),
        ];
        let req = save_request(vec![postable_stage(1, "first", ops)]);

        let result = validate_save_request(&req);
        assert!(matches!(result, Err(PipelineError::ValidationError(_))));
    }

    #[test]
    fn test_validate_output_to_unknown_operation() {
        let ops = vec![regex_operation(1, "a", Some("missing"), ".+")];
        let req = save_request(vec![postable_stage(1, "first", ops)]);

        let result = validate_save_request(&req);
        assert!(matches!(result, Err(PipelineError::ValidationError(_))));
    }

    #[test]
    fn test_validate_empty_regex_pattern() {
        let ops = vec![regex_operation(1, "a", None, "  ")];
        let req = save_request(vec![postable_stage(1, "first", ops)]);

        let result = validate_save_request(&req);
        assert!(matches!(result, Err(PipelineError::ValidationError(_))));
    }
}
