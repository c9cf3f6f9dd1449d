//! tasklist - task list client
//!
//! CLI entry point. The terminal frontend plays the renderer role: it issues
//! intents to the sync store, reads snapshots, and prints them. It also
//! decides Create vs Update per subcommand and validates the title before
//! dispatching, as the form does in a graphical frontend.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use eyre::{Context, Result, eyre};
use tracing::info;

use tasklist::api::{HttpTaskClient, TaskApi};
use tasklist::cli::{Cli, Command, OutputFormat};
use tasklist::config::Config;
use tasklist::domain::{Priority, Task, TaskStatus};
use tasklist::store::TaskSyncStore;

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tasklist")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Setup tracing subscriber - write to log file, not stdout/stderr
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("tasklist.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!("tasklist loaded config: service={}", config.service.base_url);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let api: Arc<dyn TaskApi> =
        Arc::new(HttpTaskClient::from_config(&config.service).context("Failed to create task service client")?);
    let store = TaskSyncStore::spawn(api, &config.store);

    let result = match command {
        Command::List { format } => cmd_list(&store, format).await,
        Command::Add { title, description } => cmd_add(&store, &title, &description).await,
        Command::Edit { id, title, description } => cmd_edit(&store, id, title, description).await,
        Command::Rm { id } => cmd_rm(&store, id).await,
    };

    let _ = store.shutdown().await;
    result
}

/// Fetch the collection, mapping a failure to its renderer-facing message
async fn load_or_fail(store: &TaskSyncStore) -> Result<()> {
    store.load().await.map_err(|e| eyre!("{}", e))?;
    Ok(())
}

/// List all tasks
async fn cmd_list(store: &TaskSyncStore, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            load_or_fail(store).await?;
            let snapshot = store.snapshot().await.map_err(|e| eyre!("{}", e))?;
            println!("{}", serde_json::to_string_pretty(&snapshot.tasks)?);
        }
        OutputFormat::Text => {
            println!("{}", "Cargando tareas...".dimmed());
            if let Err(e) = store.load().await {
                println!("{}", e.to_string().red());
                std::process::exit(1);
            }

            let snapshot = store.snapshot().await.map_err(|e| eyre!("{}", e))?;
            println!();
            println!("{}", "Lista de Tareas".bold());
            println!();
            for task in &snapshot.tasks {
                print_task(task);
            }
        }
    }

    Ok(())
}

/// Add a new task
async fn cmd_add(store: &TaskSyncStore, title: &str, description: &str) -> Result<()> {
    // The form's `required` check lives here, not in the store
    if title.trim().is_empty() {
        return Err(eyre!("El título no puede estar vacío"));
    }

    load_or_fail(store).await?;

    store.set_drafts(title, description).await.map_err(|e| eyre!("{}", e))?;
    let task = store.create().await.map_err(|e| eyre!("{}", e))?;

    println!("{} Tarea creada:", "✓".green());
    print_task(&task);
    Ok(())
}

/// Edit an existing task
async fn cmd_edit(store: &TaskSyncStore, id: u64, title: Option<String>, description: Option<String>) -> Result<()> {
    load_or_fail(store).await?;

    // Pre-fill the drafts from the task, then overlay the provided fields
    let current = store.begin_edit(id).await.map_err(|e| eyre!("{}", e))?;
    let new_title = title.unwrap_or_else(|| current.title.clone());
    let new_description = description.unwrap_or_else(|| current.description.clone());

    if new_title.trim().is_empty() {
        return Err(eyre!("El título no puede estar vacío"));
    }

    store
        .set_drafts(&new_title, &new_description)
        .await
        .map_err(|e| eyre!("{}", e))?;
    let task = store.update().await.map_err(|e| eyre!("{}", e))?;

    println!("{} Tarea actualizada:", "✓".green());
    print_task(&task);
    Ok(())
}

/// Delete a task
async fn cmd_rm(store: &TaskSyncStore, id: u64) -> Result<()> {
    load_or_fail(store).await?;

    store.delete(id).await.map_err(|e| eyre!("{}", e))?;

    println!("{} Tarea eliminada: #{}", "✓".green(), id);
    Ok(())
}

/// Print a single task line
fn print_task(task: &Task) {
    let status = match task.status {
        TaskStatus::Pending => task.status.to_string().yellow(),
        TaskStatus::InProgress => task.status.to_string().blue(),
        TaskStatus::Completed => task.status.to_string().green(),
    };
    let priority = match task.priority {
        Priority::Low => task.priority.to_string().normal(),
        Priority::Medium => task.priority.to_string().yellow(),
        Priority::High => task.priority.to_string().red(),
    };

    println!("  #{} {} [{} | {}]", task.id, task.title.bold(), status, priority);
    if !task.description.is_empty() {
        println!("      {}", task.description.dimmed());
    }
}
