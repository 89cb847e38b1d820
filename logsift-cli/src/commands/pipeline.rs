//! Pipeline command handlers
//!
//! Handles all pipeline-related CLI commands including saving new versions,
//! listing, viewing, deploying, and rendering the change history.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use logsift_core::domain::deploy::DeployCategory;
use logsift_core::domain::history::HistoryEntry;
use logsift_core::domain::pipeline::Pipeline;
use logsift_core::dto::pipeline::{PostableStage, SavePipelines};

use crate::config::Config;
use logsift_client::PipelineClient;

/// Pipeline subcommands
#[derive(Subcommand)]
pub enum PipelineCommands {
    /// List all saved versions
    List,
    /// Show the latest pipeline definition
    Latest,
    /// Show a specific pipeline version
    Get {
        /// Version number
        version: i32,
    },
    /// Save a new pipeline version from a JSON stages file
    Save {
        /// Path to a JSON file with the stage list
        #[arg(short, long)]
        file: String,

        /// Author identifier
        #[arg(long)]
        created_by: String,

        /// Author display name
        #[arg(long, default_value = "")]
        created_by_name: String,
    },
    /// Deploy a pipeline version
    Deploy {
        /// Version number
        version: i32,
    },
    /// Show the change history
    History,
}

/// Handle pipeline commands
///
/// Routes pipeline subcommands to their respective handlers.
///
/// # Arguments
/// * `command` - The pipeline command to execute
/// * `config` - The CLI configuration
pub async fn handle_pipeline_command(command: PipelineCommands, config: &Config) -> Result<()> {
    let client = PipelineClient::new(&config.server_url);

    match command {
        PipelineCommands::List => list_versions(&client).await,
        PipelineCommands::Latest => show_latest(&client).await,
        PipelineCommands::Get { version } => get_version(&client, version).await,
        PipelineCommands::Save {
            file,
            created_by,
            created_by_name,
        } => save_pipelines(&client, &file, created_by, created_by_name).await,
        PipelineCommands::Deploy { version } => deploy_version(&client, version).await,
        PipelineCommands::History => show_history(&client).await,
    }
}

/// Save a new pipeline version from a JSON stages file
async fn save_pipelines(
    client: &PipelineClient,
    file_path: &str,
    created_by: String,
    created_by_name: String,
) -> Result<()> {
    let content = std::fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read stages file: {}", file_path))?;

    let stages: Vec<PostableStage> =
        serde_json::from_str(&content).context("Failed to parse stages file as a JSON array")?;

    let req = SavePipelines {
        stages,
        created_by,
        created_by_name,
    };

    let pipeline = client.save(req).await?;

    println!("{}", "✓ Pipeline version saved!".green().bold());
    println!("  Version: {}", pipeline.version.to_string().cyan());
    println!("  Hash:    {}", pipeline.last_hash.dimmed());
    println!(
        "  Stages:  {}",
        pipeline
            .pipelines
            .iter()
            .map(|s| s.alias.as_str())
            .collect::<Vec<_>>()
            .join(", ")
            .dimmed()
    );

    Ok(())
}

/// List all saved versions
async fn list_versions(client: &PipelineClient) -> Result<()> {
    let versions = client.list_versions().await?;

    if versions.is_empty() {
        println!("{}", "No pipeline versions found.".yellow());
    } else {
        println!("{}", format!("Found {} version(s):", versions.len()).bold());
        println!();
        for version in versions {
            let state_label = status_label(version.deploy_status.category());
            println!(
                "  {} v{} {} {}",
                "▸".cyan(),
                version.version.to_string().bold(),
                state_label,
                version.created_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
            );
            if !version.deploy_result.is_empty() {
                println!("    {}", version.deploy_result.dimmed());
            }
        }
    }

    Ok(())
}

/// Show the latest pipeline definition
async fn show_latest(client: &PipelineClient) -> Result<()> {
    let pipeline = client.latest().await?;
    print_pipeline_details(&pipeline);
    Ok(())
}

/// Show a specific pipeline version
async fn get_version(client: &PipelineClient, version: i32) -> Result<()> {
    let pipeline = client.get_version(version).await?;
    print_pipeline_details(&pipeline);
    Ok(())
}

/// Deploy a pipeline version
async fn deploy_version(client: &PipelineClient, version: i32) -> Result<()> {
    let entry = client.deploy(version).await?;

    println!("{}", "✓ Deployment started!".green().bold());
    println!("  Version: {}", entry.version.to_string().cyan());
    println!("  Status:  {}", status_label(entry.deploy_status.category()));

    Ok(())
}

/// Render the change history, newest first
async fn show_history(client: &PipelineClient) -> Result<()> {
    let history = client.history().await?;

    if history.is_empty() {
        println!("{}", "No history entries.".yellow());
        return Ok(());
    }

    println!("{}", "Change history (newest first):".bold());
    println!();
    for entry in &history {
        print_history_entry(entry);
    }

    Ok(())
}

/// Print one history entry
fn print_history_entry(entry: &HistoryEntry) {
    let state = entry.deploy_state();

    println!(
        "  {} v{} {}",
        "▸".cyan(),
        entry.version.to_string().bold(),
        status_label(state.category)
    );
    if !state.message.is_empty() {
        println!("    {}", state.message.dimmed());
    }
    println!(
        "    By:   {} {}",
        entry.created_by_name.cyan(),
        format!("({})", entry.created_by).dimmed()
    );
    println!(
        "    At:   {}",
        entry
            .created_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .dimmed()
    );
    println!("    Hash: {}", entry.last_hash.dimmed());
}

/// Print full pipeline details
fn print_pipeline_details(pipeline: &Pipeline) {
    println!("{}", format!("Pipeline v{}", pipeline.version).bold());
    println!("  Status: {}", status_label(pipeline.deploy_status.category()));
    if !pipeline.deploy_result.is_empty() {
        println!("  Result: {}", pipeline.deploy_result.dimmed());
    }
    println!("  Hash:   {}", pipeline.last_hash.dimmed());
    println!("  By:     {}", pipeline.created_by.dimmed());
    println!();

    if pipeline.pipelines.is_empty() {
        println!("  {}", "No stages.".yellow());
    } else {
        println!("  {}", format!("{} stage(s):", pipeline.pipelines.len()).bold());
        for stage in &pipeline.pipelines {
            let enabled = if stage.enabled {
                "enabled".green()
            } else {
                "disabled".yellow()
            };
            println!(
                "    {}. {} ({}) [{}]",
                stage.order_id,
                stage.name.bold(),
                stage.alias.dimmed(),
                enabled
            );
            for op in &stage.config {
                println!(
                    "       {} {} {}",
                    "-".dimmed(),
                    op.name,
                    format!("({})", op.kind_name()).dimmed()
                );
            }
        }
    }

    if !pipeline.history().is_empty() {
        println!();
        println!(
            "  {}",
            format!("{} history entr(ies)", pipeline.history().len()).dimmed()
        );
    }
}

/// Colored label for a deploy-status category
fn status_label(category: DeployCategory) -> ColoredString {
    match category {
        DeployCategory::Success => "DEPLOYED".green().bold(),
        DeployCategory::InProgress => "IN PROGRESS".cyan(),
        DeployCategory::Warning => "DIRTY".yellow(),
        DeployCategory::Failure => "FAILED".red().bold(),
        DeployCategory::Unknown => "UNKNOWN".dimmed(),
    }
}
