//! Pipeline API Handlers
//!
//! HTTP endpoints for pipeline version management and the deploy lifecycle.

use axum::{
    Json,
    extract::{Path, State},
};
use logsift_core::domain::history::HistoryEntry;
use logsift_core::domain::pipeline::Pipeline;
use logsift_core::dto::deploy::DeployStatusUpdate;
use logsift_core::dto::pipeline::{SavePipelines, VersionSummary};
use sqlx::PgPool;

use crate::api::error::{ApiError, ApiResult};
use crate::service::pipeline_service;

fn map_error(e: pipeline_service::PipelineError) -> ApiError {
    match e {
        pipeline_service::PipelineError::NotFound(version) => {
            ApiError::NotFound(format!("Pipeline version {} not found", version))
        }
        pipeline_service::PipelineError::NoVersions => {
            ApiError::NotFound("No pipeline versions saved yet".to_string())
        }
        pipeline_service::PipelineError::ValidationError(msg) => ApiError::BadRequest(msg),
        pipeline_service::PipelineError::CorruptConf(err) => {
            ApiError::InternalError(format!("Stored configuration is not decodable: {}", err))
        }
        pipeline_service::PipelineError::DatabaseError(err) => ApiError::DatabaseError(err),
    }
}

/// POST /pipeline/save
/// Save a new pipeline version
pub async fn save_pipelines(
    State(pool): State<PgPool>,
    Json(req): Json<SavePipelines>,
) -> ApiResult<Json<Pipeline>> {
    tracing::info!("Saving pipeline version ({} stage(s))", req.stages.len());

    let pipeline = pipeline_service::save_pipelines(&pool, req)
        .await
        .map_err(map_error)?;

    Ok(Json(pipeline))
}

/// GET /pipeline/list
/// List all pipeline versions as lightweight summaries
pub async fn list_versions(State(pool): State<PgPool>) -> ApiResult<Json<Vec<VersionSummary>>> {
    tracing::debug!("Listing all pipeline versions");

    let versions = pipeline_service::list_versions(&pool)
        .await
        .map_err(map_error)?;

    Ok(Json(versions))
}

/// GET /pipeline/latest
/// Get the newest pipeline version as a full definition
pub async fn latest_pipeline(State(pool): State<PgPool>) -> ApiResult<Json<Pipeline>> {
    tracing::debug!("Getting latest pipeline version");

    let pipeline = pipeline_service::latest_pipeline(&pool)
        .await
        .map_err(map_error)?;

    Ok(Json(pipeline))
}

/// GET /pipeline/history
/// Get the full version ledger, newest first
pub async fn get_history(State(pool): State<PgPool>) -> ApiResult<Json<Vec<HistoryEntry>>> {
    tracing::debug!("Getting pipeline change history");

    let history = pipeline_service::history(&pool).await.map_err(map_error)?;

    Ok(Json(history))
}

/// GET /pipeline/{version}
/// Get a specific pipeline version as a full definition
pub async fn get_pipeline(
    State(pool): State<PgPool>,
    Path(version): Path<i32>,
) -> ApiResult<Json<Pipeline>> {
    tracing::debug!("Getting pipeline version: {}", version);

    let pipeline = pipeline_service::get_pipeline(&pool, version)
        .await
        .map_err(map_error)?;

    Ok(Json(pipeline))
}

/// POST /pipeline/{version}/deploy
/// Start deploying a pipeline version
pub async fn deploy_pipeline(
    State(pool): State<PgPool>,
    Path(version): Path<i32>,
) -> ApiResult<Json<HistoryEntry>> {
    tracing::info!("Deploying pipeline version: {}", version);

    let entry = pipeline_service::deploy(&pool, version)
        .await
        .map_err(map_error)?;

    Ok(Json(entry))
}

/// POST /pipeline/{version}/status
/// Record the deployment outcome reported by the deployment agent
pub async fn report_deploy_status(
    State(pool): State<PgPool>,
    Path(version): Path<i32>,
    Json(update): Json<DeployStatusUpdate>,
) -> ApiResult<Json<HistoryEntry>> {
    tracing::info!(
        "Deploy status report for version {}: success={}",
        version,
        update.success
    );

    let entry = pipeline_service::complete_deploy(&pool, version, update)
        .await
        .map_err(map_error)?;

    Ok(Json(entry))
}
